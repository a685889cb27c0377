/// Presentation assets handed to the host page.
///
/// The host decides how to attach them (style/script tags, its own asset
/// pipeline); this crate only declares the contents and a registration
/// handle.

pub const ASSET_HANDLE: &str = "sample-lesson-viewer";

pub const STYLESHEET: &str = include_str!("../assets/sample-lesson-viewer.css");

pub const SCRIPT: &str = include_str!("../assets/sample-lesson-viewer.js");

#[derive(Debug, Clone, Copy)]
pub struct AssetBundle {
    pub handle: &'static str,
    pub stylesheet: &'static str,
    pub script: &'static str,
}

impl AssetBundle {
    pub fn new() -> Self {
        Self {
            handle: ASSET_HANDLE,
            stylesheet: STYLESHEET,
            script: SCRIPT,
        }
    }
}

impl Default for AssetBundle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_contents_are_present() {
        let bundle = AssetBundle::new();
        assert_eq!(bundle.handle, "sample-lesson-viewer");
        assert!(bundle.stylesheet.contains(".slv-lessons-grid"));
        assert!(bundle.script.contains("slv-video-wrapper"));
        assert!(bundle.script.contains("data-embed"));
    }
}
