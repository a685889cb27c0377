/// Video reference resolution and classification.
///
/// This is the core of the widget: given a lesson's metadata and body content,
/// locate a candidate video URL and normalize it into a provider tag plus a
/// render-ready embed fragment.
pub mod classify;
pub mod content;
pub mod oembed;
pub mod resolver;

// Re-export main types
pub use classify::classify_url;
pub use content::{extract_video_url, ExtractedVideo};
pub use oembed::{EmbedService, NullEmbedService, OEmbedClient};
pub use resolver::resolve_video;

use serde::{Deserialize, Serialize};

/// Video hosting platform or delivery mechanism a URL belongs to.
///
/// Mutually exclusive; assigned by the first matching rule in the ordered
/// classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    Youtube,
    Vimeo,
    Wistia,
    Bunny,
    Cloudflare,
    SelfHosted,
    GenericIframe,
    Oembed,
    Unknown,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Youtube => "youtube",
            Provider::Vimeo => "vimeo",
            Provider::Wistia => "wistia",
            Provider::Bunny => "bunny",
            Provider::Cloudflare => "cloudflare",
            Provider::SelfHosted => "self-hosted",
            Provider::GenericIframe => "generic-iframe",
            Provider::Oembed => "oembed",
            Provider::Unknown => "unknown",
        }
    }
}

/// Normalized description of where a video lives and how to render it.
///
/// `embed_fragment` is the single rendering artifact consumers use; it is
/// never re-derived from `source_url` downstream. The fragment is empty only
/// when no classification succeeded and the oEmbed fallback produced nothing
/// (`provider == Unknown`). Constructed fresh per lesson-render request and
/// discarded with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoReference {
    /// Raw URL as discovered in metadata or body content.
    pub source_url: String,
    pub provider: Provider,
    /// Stable platform id, present for youtube/vimeo/wistia only.
    pub provider_video_id: Option<String>,
    /// Predictable per-id thumbnail, currently youtube only.
    pub thumbnail_url: Option<String>,
    /// Ready-to-render iframe tag, video tag, or third-party fragment.
    pub embed_fragment: String,
}

impl VideoReference {
    pub fn has_embed(&self) -> bool {
        !self.embed_fragment.is_empty()
    }
}
