/// Generic URL-to-embed resolution, the last rule in the classification table.
///
/// Modeled as a collaborator trait so hosts can plug in their own resolution
/// service; the bundled client speaks the oEmbed JSON convention against a
/// small registry of well-known endpoints.
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Best-effort URL-to-embed collaborator. May return a fragment or nothing;
/// it must never fail louder than `None`.
pub trait EmbedService {
    fn embed_for(&self, url: &str) -> Option<String>;
}

/// Embed service for hosts without the capability; always resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEmbedService;

impl EmbedService for NullEmbedService {
    fn embed_for(&self, _url: &str) -> Option<String> {
        None
    }
}

/// Host-name suffix to oEmbed endpoint registry.
const OEMBED_ENDPOINTS: &[(&str, &str)] = &[
    ("youtube.com", "https://www.youtube.com/oembed"),
    ("youtu.be", "https://www.youtube.com/oembed"),
    ("vimeo.com", "https://vimeo.com/api/oembed.json"),
    ("dailymotion.com", "https://www.dailymotion.com/services/oembed"),
    ("soundcloud.com", "https://soundcloud.com/oembed"),
];

static DEFAULT_CLIENT: Lazy<reqwest::blocking::Client> = Lazy::new(build_client);

fn build_client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent("sample-lesson-viewer/0.1")
        .build()
        .unwrap_or_else(|_| reqwest::blocking::Client::new())
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    html: Option<String>,
}

/// oEmbed client over HTTP.
#[derive(Debug, Clone)]
pub struct OEmbedClient {
    client: reqwest::blocking::Client,
}

impl OEmbedClient {
    pub fn new() -> Self {
        Self {
            client: DEFAULT_CLIENT.clone(),
        }
    }

    pub fn with_timeout(timeout_seconds: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent("sample-lesson-viewer/0.1")
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self { client }
    }

    fn endpoint_for(url: &str) -> Option<&'static str> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?.to_ascii_lowercase();
        OEMBED_ENDPOINTS
            .iter()
            .find(|(suffix, _)| host == *suffix || host.ends_with(&format!(".{}", suffix)))
            .map(|(_, endpoint)| *endpoint)
    }
}

impl Default for OEmbedClient {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbedService for OEmbedClient {
    fn embed_for(&self, url: &str) -> Option<String> {
        let endpoint = Self::endpoint_for(url)?;
        let request_url = format!(
            "{}?url={}&format=json",
            endpoint,
            urlencoding::encode(url)
        );
        debug!("Requesting oEmbed data: {}", request_url);

        let response = match self.client.get(&request_url).send() {
            Ok(response) => response,
            Err(e) => {
                warn!("oEmbed request failed for {}: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("oEmbed endpoint returned {} for {}", response.status(), url);
            return None;
        }

        match response.json::<OEmbedResponse>() {
            Ok(body) => body.html.map(|h| h.trim().to_string()).filter(|h| !h.is_empty()),
            Err(e) => {
                warn!("Failed to parse oEmbed response for {}: {}", url, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_registry_lookup() {
        assert_eq!(
            OEmbedClient::endpoint_for("https://www.youtube.com/watch?v=abc"),
            Some("https://www.youtube.com/oembed")
        );
        assert_eq!(
            OEmbedClient::endpoint_for("https://vimeo.com/123"),
            Some("https://vimeo.com/api/oembed.json")
        );
        assert_eq!(OEmbedClient::endpoint_for("https://example.com/page"), None);
    }

    #[test]
    fn test_endpoint_lookup_rejects_lookalike_hosts() {
        assert_eq!(
            OEmbedClient::endpoint_for("https://notyoutube.com/watch?v=abc"),
            None
        );
    }

    #[test]
    fn test_null_service_resolves_nothing() {
        assert_eq!(NullEmbedService.embed_for("https://vimeo.com/123"), None);
    }
}
