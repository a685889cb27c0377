/// HTML assembly for the sample-lessons block.
///
/// Markup mirrors the classic `slv-*` class scheme so existing theme styles
/// keep working. Every interpolated value goes through the escaping helpers;
/// embed fragments are the only pre-built markup inserted verbatim, and those
/// are constructed exclusively by the classifier.
use super::{CourseGroup, LessonSummary};
use crate::html::{escape_attr, escape_text};
use crate::render::options::RenderOptions;

pub(crate) fn missing_platform_notice() -> String {
    r#"<p class="slv-error">An active LMS content store is required to display sample lessons.</p>"#
        .to_string()
}

pub(crate) fn no_lessons_notice() -> String {
    r#"<p class="slv-no-lessons">No sample lessons found.</p>"#.to_string()
}

pub(crate) fn render_groups(groups: &[CourseGroup], options: &RenderOptions) -> String {
    let mut out = String::from(r#"<div class="slv-sample-lessons-wrapper">"#);
    out.push('\n');

    for group in groups {
        if options.show_course {
            out.push_str(r#"<div class="slv-course-section">"#);
            out.push('\n');
            out.push_str(&format!(
                r#"<h2 class="slv-course-title"><a href="{}">{}</a></h2>"#,
                escape_attr(&group.url),
                escape_text(&group.title)
            ));
            out.push('\n');
        }

        out.push_str(&format!(
            r#"<div class="slv-lessons-grid slv-columns-{}">"#,
            options.clamped_columns()
        ));
        out.push('\n');

        for lesson in &group.lessons {
            out.push_str(&lesson_card(lesson, group, options));
        }

        out.push_str("</div>\n");

        if options.show_course {
            out.push_str("</div>\n");
        }
    }

    out.push_str("</div>\n");
    out
}

fn lesson_card(lesson: &LessonSummary, group: &CourseGroup, options: &RenderOptions) -> String {
    let mut out = String::from(r#"<div class="slv-lesson-card">"#);
    out.push('\n');

    if let Some(block) = media_block(lesson, options) {
        out.push_str(&block);
        out.push('\n');
    }

    out.push_str(r#"<div class="slv-lesson-content">"#);
    out.push('\n');
    out.push_str(&format!(
        r#"<h3 class="slv-lesson-title"><a href="{}">{}</a></h3>"#,
        escape_attr(&lesson.url),
        escape_text(&lesson.title)
    ));
    out.push('\n');

    if !options.show_course {
        out.push_str(&format!(
            r#"<span class="slv-lesson-course">{}</span>"#,
            escape_text(&group.title)
        ));
        out.push('\n');
    }

    if options.show_excerpt {
        if let Some(excerpt) = lesson.excerpt.as_deref().filter(|e| !e.is_empty()) {
            out.push_str(&format!(
                r#"<div class="slv-lesson-excerpt">{}</div>"#,
                escape_text(excerpt)
            ));
            out.push('\n');
        }
    }

    out.push_str(&format!(
        r#"<a href="{}" class="slv-lesson-link">View Lesson</a>"#,
        escape_attr(&lesson.url)
    ));
    out.push_str("\n</div>\n</div>\n");
    out
}

/// The card's media slot: live embed, deferred placeholder, or thumbnail.
///
/// A lesson whose video could not be resolved falls back to its thumbnail;
/// a lesson with neither renders no media block at all.
fn media_block(lesson: &LessonSummary, options: &RenderOptions) -> Option<String> {
    if options.show_video {
        if let Some(video) = lesson.video.as_ref().filter(|v| v.has_embed()) {
            if options.lazy_video {
                return Some(placeholder_block(lesson, &video.embed_fragment, video.thumbnail_url.as_deref()));
            }
            return Some(format!(
                r#"<div class="slv-video-wrapper">{}</div>"#,
                video.embed_fragment
            ));
        }
    }

    if options.show_thumbnail {
        if let Some(thumbnail) = lesson.thumbnail.as_deref().filter(|t| !t.is_empty()) {
            return Some(format!(
                r#"<div class="slv-lesson-thumbnail"><a href="{}"><img src="{}" alt="{}"></a></div>"#,
                escape_attr(&lesson.url),
                escape_attr(thumbnail),
                escape_attr(&lesson.title)
            ));
        }
    }

    None
}

/// Deferred-load placeholder: the script swaps `data-embed` in exactly once
/// on pointer activation.
fn placeholder_block(
    lesson: &LessonSummary,
    embed_fragment: &str,
    video_thumbnail: Option<&str>,
) -> String {
    let poster = video_thumbnail
        .or(lesson.thumbnail.as_deref())
        .filter(|t| !t.is_empty());

    let mut out = format!(
        r#"<div class="slv-video-wrapper slv-video-placeholder" role="button" tabindex="0" data-embed="{}">"#,
        escape_attr(embed_fragment)
    );
    if let Some(poster) = poster {
        out.push_str(&format!(
            r#"<img src="{}" alt="{}">"#,
            escape_attr(poster),
            escape_attr(&lesson.title)
        ));
    }
    out.push_str(r#"<span class="slv-video-play" aria-hidden="true"></span></div>"#);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::{Provider, VideoReference};

    fn lesson(title: &str) -> LessonSummary {
        LessonSummary {
            id: 1,
            title: title.to_string(),
            url: "https://example.com/lessons/1".to_string(),
            excerpt: None,
            thumbnail: None,
            video: None,
        }
    }

    fn group_of(lessons: Vec<LessonSummary>) -> CourseGroup {
        CourseGroup {
            id: 10,
            title: "Course".to_string(),
            url: "https://example.com/courses/10".to_string(),
            lessons,
        }
    }

    #[test]
    fn test_title_markup_is_escaped() {
        let groups = vec![group_of(vec![lesson("<script>alert(1)</script>")])];
        let html = render_groups(&groups, &RenderOptions::default());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_video_block_replaces_thumbnail() {
        let mut record = lesson("With video");
        record.thumbnail = Some("https://example.com/thumb.jpg".to_string());
        record.video = Some(VideoReference {
            source_url: "https://vimeo.com/1".to_string(),
            provider: Provider::Vimeo,
            provider_video_id: Some("1".to_string()),
            thumbnail_url: None,
            embed_fragment: r#"<iframe src="https://player.vimeo.com/video/1"></iframe>"#
                .to_string(),
        });
        let groups = vec![group_of(vec![record])];
        let html = render_groups(&groups, &RenderOptions::default());
        assert!(html.contains("slv-video-wrapper"));
        assert!(!html.contains("slv-lesson-thumbnail"));
    }

    #[test]
    fn test_thumbnail_fallback_when_video_missing() {
        let mut record = lesson("No video");
        record.thumbnail = Some("https://example.com/thumb.jpg".to_string());
        let groups = vec![group_of(vec![record])];
        let html = render_groups(&groups, &RenderOptions::default());
        assert!(!html.contains("slv-video-wrapper"));
        assert!(html.contains("slv-lesson-thumbnail"));
        assert!(html.contains("https://example.com/thumb.jpg"));
    }

    #[test]
    fn test_lazy_video_renders_placeholder() {
        let mut record = lesson("Lazy");
        record.video = Some(VideoReference {
            source_url: "https://vimeo.com/1".to_string(),
            provider: Provider::Vimeo,
            provider_video_id: Some("1".to_string()),
            thumbnail_url: None,
            embed_fragment: r#"<iframe src="https://player.vimeo.com/video/1"></iframe>"#
                .to_string(),
        });
        let groups = vec![group_of(vec![record])];
        let mut options = RenderOptions::default();
        options.lazy_video = true;
        let html = render_groups(&groups, &options);
        assert!(html.contains("slv-video-placeholder"));
        assert!(html.contains("data-embed=\"&lt;iframe"));
        // The live iframe must not be in the initial markup.
        assert!(!html.contains("<iframe"));
    }

    #[test]
    fn test_course_label_when_sections_hidden() {
        let groups = vec![group_of(vec![lesson("Inline course")])];
        let mut options = RenderOptions::default();
        options.show_course = false;
        let html = render_groups(&groups, &options);
        assert!(!html.contains("slv-course-section"));
        assert!(html.contains(r#"<span class="slv-lesson-course">Course</span>"#));
    }

    #[test]
    fn test_columns_class_uses_clamped_value() {
        let groups = vec![group_of(vec![lesson("One")])];
        let mut options = RenderOptions::default();
        options.columns = 99;
        let html = render_groups(&groups, &options);
        assert!(html.contains("slv-columns-4"));
    }
}
