/// Sample Lesson Viewer
///
/// Content-aggregation widget for LMS course catalogs: finds lessons flagged
/// as free-preview samples, groups them by course, resolves an optional
/// preview video per lesson, and renders an embeddable HTML block.

pub mod assets;
pub mod catalog;
pub mod classifier;
pub mod html;
pub mod render;
pub mod video;

// Re-export main types for easy access
pub use crate::assets::AssetBundle;
pub use crate::catalog::{
    CourseRecord, LessonCatalog, LessonId, LessonRecord, LessonSettings, MemoryCatalog,
    MemoryLesson,
};
pub use crate::classifier::{course_id_of, is_sample};
pub use crate::render::{
    collect_course_groups, render_sample_lessons, CourseGroup, LessonSummary, OptionsBuilder,
    RenderOptions,
};
pub use crate::video::{
    classify_url, extract_video_url, resolve_video, EmbedService, NullEmbedService, OEmbedClient,
    Provider, VideoReference,
};
