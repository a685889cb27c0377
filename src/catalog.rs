/// Read-only collaborator boundary to the host LMS content store.
///
/// The widget never owns lesson data; everything is queried per render pass
/// through this trait. Implementations are expected to be cheap, synchronous
/// lookups against an already-materialized catalog.
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Identifier for lessons and courses in the host catalog.
pub type LessonId = u64;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog fixture: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Projection of a lesson entity used during a single render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonRecord {
    pub title: String,
    pub url: String,
    pub excerpt: Option<String>,
    pub thumbnail: Option<String>,
    /// Raw body markup, scanned as a last resort for video references.
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseRecord {
    pub title: String,
    pub url: String,
}

/// Structured per-lesson settings bundle.
///
/// Key names have shifted across host LMS versions, so callers probe this
/// bundle with declared priority lists rather than single keys.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LessonSettings(BTreeMap<String, String>);

impl LessonSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a field, treating empty/whitespace values as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LessonSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Query capability the host LMS exposes to the widget.
///
/// The `sample_flag`, `course_id_hint` and `video_url_setting` methods model
/// the host's canonical query functions; they return `None` when the host
/// version does not provide the capability, and callers fall back to the
/// settings bundle and flat metadata instead.
pub trait LessonCatalog {
    /// Whether the LMS content store is present at all.
    fn available(&self) -> bool;

    /// Published lesson ids in catalog order.
    fn lesson_ids(&self) -> Vec<LessonId>;

    fn lesson(&self, id: LessonId) -> Option<LessonRecord>;

    fn course(&self, id: LessonId) -> Option<CourseRecord>;

    /// Host canonical "is this a sample lesson" query.
    fn sample_flag(&self, id: LessonId) -> Option<bool>;

    /// Host canonical "which course owns this lesson" query.
    fn course_id_hint(&self, id: LessonId) -> Option<LessonId>;

    fn settings(&self, id: LessonId) -> Option<LessonSettings>;

    /// Flat metadata key/value lookup.
    fn meta(&self, id: LessonId, key: &str) -> Option<String>;

    /// Host settings accessor for the canonical lesson-video URL.
    fn video_url_setting(&self, id: LessonId) -> Option<String>;
}

/// In-memory catalog used by the demo binary and tests.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryCatalog {
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub lessons: Vec<MemoryLesson>,
    #[serde(default)]
    pub courses: Vec<MemoryCourse>,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryLesson {
    pub id: LessonId,
    pub title: String,
    #[serde(default)]
    pub url: String,
    pub excerpt: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub body: String,
    /// Canonical sample flag; `None` models a host without the query.
    pub sample: Option<bool>,
    /// Canonical course id; `None` models a host without the query.
    pub course: Option<LessonId>,
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
    /// Value behind the host's lesson-video settings accessor.
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryCourse {
    pub id: LessonId,
    pub title: String,
    #[serde(default)]
    pub url: String,
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            available: true,
            lessons: Vec::new(),
            courses: Vec::new(),
        }
    }

    /// Parse a catalog fixture from TOML.
    pub fn from_toml_str(input: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(input)?)
    }

    pub fn add_course(&mut self, id: LessonId, title: impl Into<String>, url: impl Into<String>) {
        self.courses.push(MemoryCourse {
            id,
            title: title.into(),
            url: url.into(),
        });
    }

    pub fn add_lesson(&mut self, lesson: MemoryLesson) {
        self.lessons.push(lesson);
    }

    fn find(&self, id: LessonId) -> Option<&MemoryLesson> {
        self.lessons.iter().find(|l| l.id == id)
    }
}

impl LessonCatalog for MemoryCatalog {
    fn available(&self) -> bool {
        self.available
    }

    fn lesson_ids(&self) -> Vec<LessonId> {
        self.lessons.iter().map(|l| l.id).collect()
    }

    fn lesson(&self, id: LessonId) -> Option<LessonRecord> {
        self.find(id).map(|l| LessonRecord {
            title: l.title.clone(),
            url: l.url.clone(),
            excerpt: l.excerpt.clone(),
            thumbnail: l.thumbnail.clone(),
            body: l.body.clone(),
        })
    }

    fn course(&self, id: LessonId) -> Option<CourseRecord> {
        self.courses.iter().find(|c| c.id == id).map(|c| CourseRecord {
            title: c.title.clone(),
            url: c.url.clone(),
        })
    }

    fn sample_flag(&self, id: LessonId) -> Option<bool> {
        self.find(id).and_then(|l| l.sample)
    }

    fn course_id_hint(&self, id: LessonId) -> Option<LessonId> {
        self.find(id).and_then(|l| l.course)
    }

    fn settings(&self, id: LessonId) -> Option<LessonSettings> {
        let lesson = self.find(id)?;
        if lesson.settings.is_empty() {
            return None;
        }
        Some(
            lesson
                .settings
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    fn meta(&self, id: LessonId, key: &str) -> Option<String> {
        self.find(id)
            .and_then(|l| l.meta.get(key))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn video_url_setting(&self, id: LessonId) -> Option<String> {
        self.find(id)
            .and_then(|l| l.video_url.clone())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_empty_values_are_absent() {
        let mut settings = LessonSettings::new();
        settings.set("lesson_video_url", "   ");
        settings.set("course", "42");

        assert_eq!(settings.get("lesson_video_url"), None);
        assert_eq!(settings.get("course"), Some("42"));
        assert_eq!(settings.get("missing"), None);
    }

    #[test]
    fn test_memory_catalog_from_toml() {
        let catalog = MemoryCatalog::from_toml_str(
            r#"
            [[courses]]
            id = 10
            title = "Guard Basics"
            url = "https://example.com/courses/guard-basics"

            [[lessons]]
            id = 1
            title = "Intro"
            url = "https://example.com/lessons/intro"
            sample = true
            course = 10

            [lessons.meta]
            video_url = "https://vimeo.com/76979871"
            "#,
        )
        .unwrap();

        assert!(catalog.available());
        assert_eq!(catalog.lesson_ids(), vec![1]);
        assert_eq!(catalog.sample_flag(1), Some(true));
        assert_eq!(catalog.course_id_hint(1), Some(10));
        assert_eq!(
            catalog.meta(1, "video_url").as_deref(),
            Some("https://vimeo.com/76979871")
        );
        assert_eq!(catalog.course(10).unwrap().title, "Guard Basics");
    }

    #[test]
    fn test_memory_catalog_unavailable() {
        let catalog = MemoryCatalog::from_toml_str("available = false").unwrap();
        assert!(!catalog.available());
        assert!(catalog.lesson_ids().is_empty());
    }
}
