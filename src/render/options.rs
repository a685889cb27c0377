/// Render configuration accepted by the template tag.
use crate::catalog::LessonId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Options recognized by the sample-lessons render entry point.
///
/// `order_by` / `order` are accepted for compatibility with existing shortcode
/// markup but do not alter the fixed title-ascending course sort; see
/// DESIGN.md for the decision record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Grid columns, clamped to 1..=4 at render time.
    pub columns: u8,
    pub show_excerpt: bool,
    pub show_thumbnail: bool,
    pub show_video: bool,
    pub show_course: bool,
    /// Render a click-to-load placeholder instead of a live embed.
    pub lazy_video: bool,
    /// Restrict output to these course ids.
    pub course_filter: Option<BTreeSet<LessonId>>,
    pub order_by: String,
    pub order: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            columns: 3,
            show_excerpt: true,
            show_thumbnail: true,
            show_video: true,
            show_course: true,
            lazy_video: false,
            course_filter: None,
            order_by: "title".to_string(),
            order: "ASC".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn clamped_columns(&self) -> u8 {
        self.columns.clamp(1, 4)
    }

    pub fn course_allowed(&self, course_id: LessonId) -> bool {
        match &self.course_filter {
            Some(filter) => filter.contains(&course_id),
            None => true,
        }
    }
}

/// Builder for programmatic option construction.
pub struct OptionsBuilder {
    options: RenderOptions,
}

impl OptionsBuilder {
    pub fn new() -> Self {
        Self {
            options: RenderOptions::default(),
        }
    }

    pub fn with_columns(mut self, columns: u8) -> Self {
        self.options.columns = columns;
        self
    }

    pub fn show_excerpt(mut self, show: bool) -> Self {
        self.options.show_excerpt = show;
        self
    }

    pub fn show_thumbnail(mut self, show: bool) -> Self {
        self.options.show_thumbnail = show;
        self
    }

    pub fn show_video(mut self, show: bool) -> Self {
        self.options.show_video = show;
        self
    }

    pub fn show_course(mut self, show: bool) -> Self {
        self.options.show_course = show;
        self
    }

    pub fn lazy_video(mut self, lazy: bool) -> Self {
        self.options.lazy_video = lazy;
        self
    }

    pub fn with_course_filter(mut self, courses: impl IntoIterator<Item = LessonId>) -> Self {
        self.options.course_filter = Some(courses.into_iter().collect());
        self
    }

    pub fn build(self) -> RenderOptions {
        self.options
    }
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.columns, 3);
        assert!(options.show_excerpt);
        assert!(options.show_video);
        assert!(!options.lazy_video);
        assert!(options.course_allowed(123));
    }

    #[test]
    fn test_columns_clamping() {
        let mut options = RenderOptions::default();
        options.columns = 0;
        assert_eq!(options.clamped_columns(), 1);
        options.columns = 9;
        assert_eq!(options.clamped_columns(), 4);
        options.columns = 2;
        assert_eq!(options.clamped_columns(), 2);
    }

    #[test]
    fn test_course_filter() {
        let options = OptionsBuilder::new().with_course_filter([10, 20]).build();
        assert!(options.course_allowed(10));
        assert!(!options.course_allowed(30));
    }

    #[test]
    fn test_options_from_attribute_map() {
        let options: RenderOptions = serde_json::from_str(
            r#"{"columns": 2, "show_excerpt": false, "course_filter": [5]}"#,
        )
        .unwrap();
        assert_eq!(options.columns, 2);
        assert!(!options.show_excerpt);
        assert!(options.course_allowed(5));
        assert!(!options.course_allowed(6));
        // Unspecified fields keep their defaults.
        assert!(options.show_video);
        assert_eq!(options.order_by, "title");
    }
}
