/// Sample-lesson classification against the host catalog.
///
/// Host LMS versions have stored the sample flag and course membership in
/// different places over time, so both lookups walk an ordered list of
/// strategies and stop at the first decisive answer. The ordering is a
/// compatibility shim, not an algorithm: canonical host query first, then the
/// structured settings bundle, then flat metadata keys.
use crate::catalog::{LessonCatalog, LessonId};
use tracing::debug;

/// Settings-bundle key carrying the sample flag.
const SAMPLE_SETTINGS_KEY: &str = "sfwd-lessons_sample_lesson";

/// Flat metadata key used by newer host versions.
const SAMPLE_META_KEY: &str = "sample_lesson";

/// Settings-bundle key carrying the owning course id.
const COURSE_SETTINGS_KEY: &str = "sfwd-lessons_course";

/// Flat metadata key for the owning course id.
const COURSE_META_KEY: &str = "course_id";

/// Metadata values accepted as "flag is on".
const TRUTHY_META_VALUES: &[&str] = &["on", "1", "true"];

/// Whether a lesson is flagged as a free-preview sample.
pub fn is_sample(catalog: &dyn LessonCatalog, id: LessonId) -> bool {
    // Strategy 1: canonical host query.
    if let Some(flag) = catalog.sample_flag(id) {
        return flag;
    }

    // Strategy 2: structured settings bundle.
    if let Some(settings) = catalog.settings(id) {
        if let Some(value) = settings.get(SAMPLE_SETTINGS_KEY) {
            return value == "on";
        }
    }

    // Strategy 3: flat metadata key.
    if let Some(value) = catalog.meta(id, SAMPLE_META_KEY) {
        return TRUTHY_META_VALUES.contains(&value.to_lowercase().as_str());
    }

    false
}

/// Resolve the course a lesson belongs to. A zero id from any strategy is
/// treated as "not set" and falls through to the next one.
pub fn course_id_of(catalog: &dyn LessonCatalog, id: LessonId) -> Option<LessonId> {
    // Strategy 1: canonical host query.
    if let Some(course_id) = catalog.course_id_hint(id).filter(|&c| c != 0) {
        return Some(course_id);
    }

    // Strategy 2: structured settings bundle.
    if let Some(settings) = catalog.settings(id) {
        if let Some(course_id) = settings
            .get(COURSE_SETTINGS_KEY)
            .and_then(|v| v.parse::<LessonId>().ok())
            .filter(|&c| c != 0)
        {
            return Some(course_id);
        }
    }

    // Strategy 3: flat metadata key.
    if let Some(course_id) = catalog
        .meta(id, COURSE_META_KEY)
        .and_then(|v| v.parse::<LessonId>().ok())
        .filter(|&c| c != 0)
    {
        return Some(course_id);
    }

    debug!("No course found for lesson {}", id);
    None
}
