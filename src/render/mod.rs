/// Render pipeline: catalog traversal, grouping, sorting and markup output.
///
/// One invocation performs a bounded synchronous pass over the catalog and
/// returns a complete string. Nothing is cached across invocations and no
/// failure path escapes as an error; every outcome terminates in markup or a
/// fixed user-visible message.
pub mod markup;
pub mod options;

pub use options::{OptionsBuilder, RenderOptions};

use crate::catalog::{LessonCatalog, LessonId};
use crate::classifier;
use crate::video::oembed::EmbedService;
use crate::video::{resolve_video, VideoReference};
use tracing::{debug, info, warn};

/// Read-only projection of a lesson for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonSummary {
    pub id: LessonId,
    pub title: String,
    pub url: String,
    pub excerpt: Option<String>,
    pub thumbnail: Option<String>,
    pub video: Option<VideoReference>,
}

/// A course with its sample lessons, built once per render.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseGroup {
    pub id: LessonId,
    pub title: String,
    pub url: String,
    pub lessons: Vec<LessonSummary>,
}

/// Render the sample-lessons block.
///
/// Always returns a displayable string: the full markup, or a fixed notice
/// when the host platform is missing or nothing matched.
pub fn render_sample_lessons(
    catalog: &dyn LessonCatalog,
    options: &RenderOptions,
    embeds: &dyn EmbedService,
) -> String {
    if !catalog.available() {
        warn!("LMS content store unavailable, rendering notice");
        return markup::missing_platform_notice();
    }

    if options.order_by != "title" || !options.order.eq_ignore_ascii_case("asc") {
        // Accepted for shortcode compatibility; sorting stays title-ascending.
        debug!(
            "Ignoring order_by={} order={}, output is sorted by course title",
            options.order_by, options.order
        );
    }

    let groups = collect_course_groups(catalog, options, embeds);
    if groups.is_empty() {
        info!("No sample lessons matched the current options");
        return markup::no_lessons_notice();
    }

    markup::render_groups(&groups, options)
}

/// Traverse the catalog and build the sorted course groups.
///
/// Lessons keep catalog order within their group; groups are sorted by course
/// title, stable and case-insensitive.
pub fn collect_course_groups(
    catalog: &dyn LessonCatalog,
    options: &RenderOptions,
    embeds: &dyn EmbedService,
) -> Vec<CourseGroup> {
    let mut groups: Vec<CourseGroup> = Vec::new();

    for id in catalog.lesson_ids() {
        if !classifier::is_sample(catalog, id) {
            continue;
        }

        let course_id = match classifier::course_id_of(catalog, id) {
            Some(course_id) => course_id,
            None => {
                debug!("Skipping sample lesson {} with no course", id);
                continue;
            }
        };

        if !options.course_allowed(course_id) {
            continue;
        }

        let record = match catalog.lesson(id) {
            Some(record) => record,
            None => {
                warn!("Catalog listed lesson {} but returned no record", id);
                continue;
            }
        };

        let course = match catalog.course(course_id) {
            Some(course) => course,
            None => {
                warn!("Skipping lesson {}: course {} not found", id, course_id);
                continue;
            }
        };

        let video = if options.show_video {
            resolve_video(catalog, id, embeds)
        } else {
            None
        };

        let summary = LessonSummary {
            id,
            title: record.title,
            url: record.url,
            excerpt: record.excerpt,
            thumbnail: record.thumbnail,
            video,
        };

        match groups.iter_mut().find(|g| g.id == course_id) {
            Some(group) => group.lessons.push(summary),
            None => groups.push(CourseGroup {
                id: course_id,
                title: course.title,
                url: course.url,
                lessons: vec![summary],
            }),
        }
    }

    // Stable case-insensitive sort keeps equal titles in discovery order.
    groups.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));

    let total: usize = groups.iter().map(|g| g.lessons.len()).sum();
    info!("Collected {} sample lessons across {} courses", total, groups.len());

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MemoryCatalog, MemoryLesson};
    use crate::video::oembed::NullEmbedService;

    fn sample_lesson(id: LessonId, course: LessonId, title: &str) -> MemoryLesson {
        MemoryLesson {
            id,
            title: title.to_string(),
            url: format!("https://example.com/lessons/{}", id),
            sample: Some(true),
            course: Some(course),
            ..Default::default()
        }
    }

    #[test]
    fn test_unavailable_catalog_renders_notice() {
        let catalog = MemoryCatalog {
            available: false,
            ..Default::default()
        };
        let html =
            render_sample_lessons(&catalog, &RenderOptions::default(), &NullEmbedService);
        assert!(html.contains("slv-error"));
    }

    #[test]
    fn test_empty_catalog_renders_no_lessons_message() {
        let catalog = MemoryCatalog::new();
        let html =
            render_sample_lessons(&catalog, &RenderOptions::default(), &NullEmbedService);
        assert_eq!(html, r#"<p class="slv-no-lessons">No sample lessons found.</p>"#);
    }

    #[test]
    fn test_non_sample_lessons_are_skipped() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_course(10, "Course", "https://example.com/courses/10");
        let mut lesson = sample_lesson(1, 10, "Members only");
        lesson.sample = Some(false);
        catalog.add_lesson(lesson);

        let html =
            render_sample_lessons(&catalog, &RenderOptions::default(), &NullEmbedService);
        assert!(html.contains("slv-no-lessons"));
    }

    #[test]
    fn test_courses_sorted_case_insensitively() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_course(1, "zebra handling", "https://example.com/c/1");
        catalog.add_course(2, "Alpha Course", "https://example.com/c/2");
        catalog.add_course(3, "beta Course", "https://example.com/c/3");
        catalog.add_lesson(sample_lesson(11, 1, "Z lesson"));
        catalog.add_lesson(sample_lesson(12, 2, "A lesson"));
        catalog.add_lesson(sample_lesson(13, 3, "B lesson"));

        let groups = collect_course_groups(
            &catalog,
            &RenderOptions::default(),
            &NullEmbedService,
        );
        let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha Course", "beta Course", "zebra handling"]);
    }

    #[test]
    fn test_course_filter_limits_output() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_course(1, "Kept", "https://example.com/c/1");
        catalog.add_course(2, "Dropped", "https://example.com/c/2");
        catalog.add_lesson(sample_lesson(11, 1, "Kept lesson"));
        catalog.add_lesson(sample_lesson(12, 2, "Dropped lesson"));

        let options = OptionsBuilder::new().with_course_filter([1]).build();
        let groups = collect_course_groups(&catalog, &options, &NullEmbedService);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title, "Kept");
    }

    #[test]
    fn test_lesson_without_course_is_skipped() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_course(1, "Course", "https://example.com/c/1");
        let mut orphan = sample_lesson(11, 1, "Orphan");
        orphan.course = None;
        catalog.add_lesson(orphan);
        catalog.add_lesson(sample_lesson(12, 1, "Kept"));

        let groups = collect_course_groups(
            &catalog,
            &RenderOptions::default(),
            &NullEmbedService,
        );
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].lessons.len(), 1);
        assert_eq!(groups[0].lessons[0].title, "Kept");
    }

    #[test]
    fn test_video_resolution_miss_keeps_lesson() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_course(1, "Course", "https://example.com/c/1");
        let mut lesson = sample_lesson(11, 1, "No video");
        lesson.thumbnail = Some("https://example.com/thumb.jpg".to_string());
        catalog.add_lesson(lesson);

        let html =
            render_sample_lessons(&catalog, &RenderOptions::default(), &NullEmbedService);
        assert!(html.contains("No video"));
        assert!(html.contains("slv-lesson-thumbnail"));
        assert!(!html.contains("slv-video-wrapper"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_course(1, "Course", "https://example.com/c/1");
        let mut lesson = sample_lesson(11, 1, "Video lesson");
        lesson.video_url = Some("https://vimeo.com/76979871".to_string());
        catalog.add_lesson(lesson);

        let options = RenderOptions::default();
        let first = render_sample_lessons(&catalog, &options, &NullEmbedService);
        let second = render_sample_lessons(&catalog, &options, &NullEmbedService);
        assert_eq!(first, second);
    }
}
