/// Video URL resolution for a lesson.
///
/// Metadata sources are probed in strict priority order; the first non-empty
/// URL wins. The field and key names below have accumulated across host LMS
/// versions and are declared as explicit priority lists so the compatibility
/// shim stays auditable in one place.
use crate::catalog::{LessonCatalog, LessonId};
use crate::video::classify::classify_url;
use crate::video::content::extract_video_url;
use crate::video::oembed::EmbedService;
use crate::video::VideoReference;
use tracing::debug;

/// Settings-bundle fields that have carried the lesson video URL, newest
/// first.
pub const SETTINGS_VIDEO_FIELDS: &[&str] = &[
    "lesson_video_url",
    "sfwd-lessons_lesson_video_url",
    "lesson_video",
    "video_url",
];

/// Flat metadata keys that have carried the lesson video URL, newest first.
pub const META_VIDEO_KEYS: &[&str] = &[
    "lesson_video_url",
    "_lesson_video_url",
    "video_url",
    "lesson_video",
];

/// Resolve a lesson's preview video, if it has one.
///
/// Returns `None` when no source yields a URL; a lesson without a preview
/// video is an expected outcome, not an error. Whatever stage produced the
/// URL, it flows through the same classification path, so provider hints from
/// content extraction never shortcut the rule table.
pub fn resolve_video(
    catalog: &dyn LessonCatalog,
    id: LessonId,
    embeds: &dyn EmbedService,
) -> Option<VideoReference> {
    let url = settings_url(catalog, id)
        .or_else(|| meta_url(catalog, id))
        .or_else(|| catalog.video_url_setting(id))
        .or_else(|| body_url(catalog, id));

    let url = match url {
        Some(url) => url,
        None => {
            debug!("No video source found for lesson {}", id);
            return None;
        }
    };

    Some(classify_url(&url, embeds))
}

/// Stage 1: ordered settings-bundle fields.
fn settings_url(catalog: &dyn LessonCatalog, id: LessonId) -> Option<String> {
    let settings = catalog.settings(id)?;
    first_populated(SETTINGS_VIDEO_FIELDS, |key| {
        settings.get(key).map(str::to_string)
    })
}

/// Stage 2: ordered flat metadata keys.
fn meta_url(catalog: &dyn LessonCatalog, id: LessonId) -> Option<String> {
    first_populated(META_VIDEO_KEYS, |key| catalog.meta(id, key))
}

/// Stage 4: content extraction over the lesson body.
fn body_url(catalog: &dyn LessonCatalog, id: LessonId) -> Option<String> {
    let lesson = catalog.lesson(id)?;
    extract_video_url(&lesson.body).map(|extracted| extracted.url)
}

/// Ordered-lookup helper: first key whose value is non-empty wins.
fn first_populated(keys: &[&str], lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    keys.iter().find_map(|key| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}
