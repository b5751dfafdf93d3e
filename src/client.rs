//! HTTP transport and the top-level API facade.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};

use crate::{
    error::{Error, Result},
    extract,
    model::Snippet,
    proxy::ProxyConfig,
    transcript::TranscriptList,
};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Transport defaults baked into the client, spelled out rather than
/// hidden in the builder call.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Thin wrapper over a configured blocking client. Cheap to clone; every
/// transcript descriptor carries one so it can fetch its own payload.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new(config: &ClientConfig, proxy: Option<&dyn ProxyConfig>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_str(&config.accept)?);
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&config.accept_language)?);
        headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));

        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout)
            .gzip(true);

        if let Some(proxy) = proxy {
            builder = builder.proxy(proxy.proxy()?);
        }

        Ok(Self {
            inner: builder.build()?,
        })
    }

    /// Fetch the watch page for a video. Transport failures and
    /// unavailable-video page markers both surface as
    /// [`Error::VideoUnavailable`].
    pub fn get_page(&self, video_id: &str) -> Result<String> {
        let url = format!("{WATCH_URL}{video_id}");
        tracing::debug!(video_id, "fetching watch page");

        let unavailable = || Error::VideoUnavailable {
            video_id: video_id.to_string(),
        };

        let html = self
            .inner
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|_| unavailable())?;

        if html.contains("This video is unavailable") || html.contains("Video unavailable") {
            return Err(unavailable());
        }

        Ok(html)
    }

    /// Fetch raw bytes for a caption payload URL.
    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url, "fetching caption payload");
        let response = self.inner.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

/// Facade composing page fetch, extraction, catalog resolution, and
/// payload fetch.
#[derive(Debug, Clone)]
pub struct TranscriptApi {
    http: HttpClient,
}

impl TranscriptApi {
    /// Client with default transport configuration and no proxy.
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default(), None)
    }

    pub fn with_config(config: &ClientConfig, proxy: Option<&dyn ProxyConfig>) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config, proxy)?,
        })
    }

    /// List all caption tracks for a video.
    ///
    /// An available video with zero tracks is
    /// [`Error::NoTranscriptFound`]; a page that cannot be fetched or that
    /// reports the video gone is [`Error::VideoUnavailable`].
    pub fn list(&self, video_id: &str) -> Result<TranscriptList> {
        let html = self.http.get_page(video_id)?;
        let transcripts = extract::extract(video_id, &html, &self.http);

        if transcripts.is_empty() {
            return Err(Error::NoTranscriptFound {
                video_id: video_id.to_string(),
            });
        }

        tracing::debug!(video_id, tracks = transcripts.len(), "caption tracks discovered");
        Ok(TranscriptList::new(video_id, transcripts))
    }

    /// Resolve the language cascade and immediately fetch the winning
    /// track. Caption URLs are signed and short-lived, so resolution and
    /// retrieval stay one tight sequence.
    pub fn fetch(
        &self,
        video_id: &str,
        language_codes: &[&str],
        prefer_manual: bool,
    ) -> Result<Vec<Snippet>> {
        let list = self.list(video_id)?;
        let transcript = list.find_transcript(language_codes, prefer_manual)?;
        Ok(transcript.fetch()?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_documents_transport_defaults() {
        let cfg = ClientConfig::default();
        assert!(cfg.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(cfg.accept_language, "en-US,en;q=0.9");
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[test]
    fn builds_client_from_defaults() {
        assert!(HttpClient::new(&ClientConfig::default(), None).is_ok());
        assert!(TranscriptApi::new().is_ok());
    }
}
