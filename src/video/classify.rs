/// URL classification and embed construction.
///
/// `classify_url` is a total, deterministic function over an ordered rule
/// table: the first matching rule wins. Named providers are checked before
/// the generic "contains embed/iframe/player" substring test so they are never
/// shadowed, and the file-extension rule runs before the substring test so a
/// self-hosted file like `/embed/clip.mp4` still classifies as self-hosted.
use crate::html::escape_attr;
use crate::video::oembed::EmbedService;
use crate::video::{Provider, VideoReference};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use url::Url;

static YOUTUBE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:https?://)?(?:www\.)?(?:youtube\.com/(?:watch\?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{11})",
    )
    .expect("youtube pattern compiles")
});

static VIMEO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?://)?(?:www\.)?(?:player\.)?vimeo\.com/(?:video/)?(\d+)")
        .expect("vimeo pattern compiles")
});

static WISTIA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"wistia\.(?:com|net)/(?:medias|embed)/(?:iframe/)?([A-Za-z0-9]+)")
        .expect("wistia pattern compiles")
});

static FILE_EXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(mp4|webm|ogg|mov|m4v)$").expect("file pattern compiles"));

type RuleFn = fn(&str) -> Option<VideoReference>;

/// Ordered classification table; first match wins.
const RULES: &[(&str, RuleFn)] = &[
    ("youtube", rule_youtube),
    ("vimeo", rule_vimeo),
    ("wistia", rule_wistia),
    ("bunny", rule_bunny),
    ("cloudflare", rule_cloudflare),
    ("self-hosted", rule_self_hosted),
    ("generic-iframe", rule_generic_iframe),
];

/// Classify a raw video URL into a provider tag and embed fragment.
///
/// Never fails: unrecognized URLs fall through to the host's oEmbed service,
/// and if that also yields nothing the result is `Provider::Unknown` with an
/// empty fragment.
pub fn classify_url(url: &str, embeds: &dyn EmbedService) -> VideoReference {
    let url = url.trim();

    for (name, rule) in RULES {
        if let Some(reference) = rule(url) {
            debug!("Classified video URL as {}: {}", name, url);
            return reference;
        }
    }

    if let Some(fragment) = embeds.embed_for(url).filter(|f| !f.trim().is_empty()) {
        debug!("Resolved video URL via oEmbed fallback: {}", url);
        return VideoReference {
            source_url: url.to_string(),
            provider: Provider::Oembed,
            provider_video_id: None,
            thumbnail_url: None,
            embed_fragment: fragment,
        };
    }

    debug!("No classification for video URL: {}", url);
    VideoReference {
        source_url: url.to_string(),
        provider: Provider::Unknown,
        provider_video_id: None,
        thumbnail_url: None,
        embed_fragment: String::new(),
    }
}

fn rule_youtube(url: &str) -> Option<VideoReference> {
    let id = YOUTUBE_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())?;

    Some(VideoReference {
        source_url: url.to_string(),
        provider: Provider::Youtube,
        embed_fragment: iframe_fragment(&format!("https://www.youtube.com/embed/{}", id)),
        thumbnail_url: Some(format!("https://img.youtube.com/vi/{}/hqdefault.jpg", id)),
        provider_video_id: Some(id),
    })
}

fn rule_vimeo(url: &str) -> Option<VideoReference> {
    let id = VIMEO_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())?;

    Some(VideoReference {
        source_url: url.to_string(),
        provider: Provider::Vimeo,
        embed_fragment: iframe_fragment(&format!("https://player.vimeo.com/video/{}", id)),
        thumbnail_url: None,
        provider_video_id: Some(id),
    })
}

fn rule_wistia(url: &str) -> Option<VideoReference> {
    let id = WISTIA_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())?;

    Some(VideoReference {
        source_url: url.to_string(),
        provider: Provider::Wistia,
        embed_fragment: iframe_fragment(&format!("https://fast.wistia.net/embed/iframe/{}", id)),
        thumbnail_url: None,
        provider_video_id: Some(id),
    })
}

fn rule_bunny(url: &str) -> Option<VideoReference> {
    let (host, path) = parse_host(url)?;
    if !(host.ends_with("b-cdn.net") || host.ends_with("mediadelivery.net")) {
        return None;
    }

    // Interactive player endpoints get an iframe; direct CDN files a video tag.
    let is_player = host.starts_with("iframe.") || path.starts_with("/embed/") || path.starts_with("/play/");
    let embed_fragment = if is_player {
        iframe_fragment(url)
    } else {
        video_fragment(url, guess_mime(&path))
    };

    Some(VideoReference {
        source_url: url.to_string(),
        provider: Provider::Bunny,
        provider_video_id: None,
        thumbnail_url: None,
        embed_fragment,
    })
}

fn rule_cloudflare(url: &str) -> Option<VideoReference> {
    let (host, _) = parse_host(url)?;
    if !(host.ends_with("cloudflarestream.com") || host.ends_with("videodelivery.net")) {
        return None;
    }

    Some(VideoReference {
        source_url: url.to_string(),
        provider: Provider::Cloudflare,
        provider_video_id: None,
        thumbnail_url: None,
        embed_fragment: iframe_fragment(url),
    })
}

fn rule_self_hosted(url: &str) -> Option<VideoReference> {
    // Query strings are allowed after the extension.
    let path = parse_host(url)
        .map(|(_, path)| path)
        .unwrap_or_else(|| url.split('?').next().unwrap_or(url).to_string());

    if !FILE_EXT_RE.is_match(&path) {
        return None;
    }

    Some(VideoReference {
        source_url: url.to_string(),
        provider: Provider::SelfHosted,
        provider_video_id: None,
        thumbnail_url: None,
        embed_fragment: video_fragment(url, guess_mime(&path)),
    })
}

fn rule_generic_iframe(url: &str) -> Option<VideoReference> {
    let lowered = url.to_lowercase();
    if !(lowered.contains("iframe") || lowered.contains("embed") || lowered.contains("player")) {
        return None;
    }

    Some(VideoReference {
        source_url: url.to_string(),
        provider: Provider::GenericIframe,
        provider_video_id: None,
        thumbnail_url: None,
        embed_fragment: iframe_fragment(url),
    })
}

/// Lowercased host and path of a URL, tolerating a missing scheme.
fn parse_host(url: &str) -> Option<(String, String)> {
    let parsed = Url::parse(url)
        .or_else(|_| Url::parse(&format!("https://{}", url)))
        .ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    Some((host, parsed.path().to_string()))
}

fn guess_mime(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "webm" => "video/webm",
        "ogg" => "video/ogg",
        "mov" => "video/quicktime",
        "m4v" => "video/x-m4v",
        _ => "video/mp4",
    }
}

fn iframe_fragment(src: &str) -> String {
    format!(
        r#"<iframe src="{}" frameborder="0" allow="autoplay; fullscreen; picture-in-picture" allowfullscreen loading="lazy"></iframe>"#,
        escape_attr(src)
    )
}

fn video_fragment(src: &str, mime: &str) -> String {
    format!(
        r#"<video controls preload="metadata"><source src="{}" type="{}"></video>"#,
        escape_attr(src),
        mime
    )
}
