/// Body-content extraction, the last-resort stage of video resolution.
///
/// An ordered list of matchers runs over the lesson's raw body markup and
/// stops at the first hit. Embedded tags are checked before bare URL shapes so
/// an author's explicit embed wins over a pasted link further down the page.
/// The provider hint attached to a match is advisory only; classification
/// re-derives the authoritative provider from the URL itself so metadata URLs
/// and extracted URLs travel the same path.
use crate::video::Provider;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

static IFRAME_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("iframe").expect("iframe selector parses"));

static VIDEO_SOURCE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("video source").expect("video source selector parses"));

static VIDEO_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("video").expect("video selector parses"));

static YOUTUBE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"https?://(?:www\.)?(?:youtube\.com/(?:watch|embed|shorts)[^\s"'<>]*|youtu\.be/[^\s"'<>]+)"#,
    )
    .expect("youtube url pattern compiles")
});

static VIMEO_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://(?:www\.)?(?:player\.)?vimeo\.com/[^\s"'<>]+"#)
        .expect("vimeo url pattern compiles")
});

static BUNNY_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s"'<>]*(?:b-cdn\.net|mediadelivery\.net)[^\s"'<>]*"#)
        .expect("bunny url pattern compiles")
});

static CLOUDFLARE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s"'<>]*(?:cloudflarestream\.com|videodelivery\.net)[^\s"'<>]*"#)
        .expect("cloudflare url pattern compiles")
});

static WISTIA_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s"'<>]*wistia\.(?:com|net)/(?:medias|embed)/[^\s"'<>]+"#)
        .expect("wistia url pattern compiles")
});

static FILE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)https?://[^\s"'<>]+\.(?:mp4|webm|ogg|mov|m4v)(?:\?[^\s"'<>]*)?"#)
        .expect("file url pattern compiles")
});

static SHORTCODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[video[^\]]*?\bsrc\s*=\s*["']?([^"'\s\]]+)"#)
        .expect("shortcode pattern compiles")
});

/// A candidate video reference found in lesson body content.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedVideo {
    pub url: String,
    /// Which matcher fired. Advisory; never overrides classification.
    pub hint: Provider,
}

/// Scan lesson body markup for the first recognizable video reference.
pub fn extract_video_url(body: &str) -> Option<ExtractedVideo> {
    if body.trim().is_empty() {
        return None;
    }

    let fragment = Html::parse_fragment(body);

    // Stage 1: explicit iframe embed.
    for iframe in fragment.select(&IFRAME_SELECTOR) {
        if let Some(src) = attr_url(iframe.value().attr("src")) {
            debug!("Extracted iframe src from lesson body: {}", src);
            return Some(ExtractedVideo {
                url: src,
                hint: Provider::GenericIframe,
            });
        }
    }

    // Stage 2: video tag, source child first.
    for source in fragment.select(&VIDEO_SOURCE_SELECTOR) {
        if let Some(src) = attr_url(source.value().attr("src")) {
            debug!("Extracted video source from lesson body: {}", src);
            return Some(ExtractedVideo {
                url: src,
                hint: Provider::SelfHosted,
            });
        }
    }
    for video in fragment.select(&VIDEO_SELECTOR) {
        if let Some(src) = attr_url(video.value().attr("src")) {
            debug!("Extracted video src from lesson body: {}", src);
            return Some(ExtractedVideo {
                url: src,
                hint: Provider::SelfHosted,
            });
        }
    }

    // Stages 3-8: bare URL shapes, most specific providers first.
    let url_patterns: &[(&Regex, Provider)] = &[
        (&YOUTUBE_URL_RE, Provider::Youtube),
        (&VIMEO_URL_RE, Provider::Vimeo),
        (&BUNNY_URL_RE, Provider::Bunny),
        (&CLOUDFLARE_URL_RE, Provider::Cloudflare),
        (&WISTIA_URL_RE, Provider::Wistia),
        (&FILE_URL_RE, Provider::SelfHosted),
    ];
    for (pattern, hint) in url_patterns {
        if let Some(found) = pattern.find(body) {
            debug!("Extracted {} URL from lesson body: {}", hint.as_str(), found.as_str());
            return Some(ExtractedVideo {
                url: found.as_str().to_string(),
                hint: *hint,
            });
        }
    }

    // Stage 9: bracketed shortcode token.
    if let Some(caps) = SHORTCODE_RE.captures(body) {
        if let Some(src) = caps.get(1) {
            debug!("Extracted shortcode src from lesson body: {}", src.as_str());
            return Some(ExtractedVideo {
                url: src.as_str().to_string(),
                hint: Provider::SelfHosted,
            });
        }
    }

    None
}

fn attr_url(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
