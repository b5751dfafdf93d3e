//! Transcript descriptors and the per-video catalog.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::{
    client::HttpClient,
    error::{Error, Result},
    model::Snippet,
    timedtext,
};

/// One available caption track for a video.
///
/// A track is identified within its catalog by `(language_code,
/// is_generated)`; a video can carry both a manual and an auto-generated
/// track under the same language code. The first successful fetch is kept
/// for the descriptor's lifetime, since caption URLs are signed and expire
/// within seconds of issuance.
#[derive(Debug, Clone)]
pub struct Transcript {
    http: HttpClient,
    video_id: String,
    url: String,
    language_code: String,
    language_name: String,
    is_generated: bool,
    is_translatable: bool,
    translation_languages: Option<HashMap<String, String>>,
    cached: OnceLock<Vec<Snippet>>,
}

impl Transcript {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        http: HttpClient,
        video_id: impl Into<String>,
        url: impl Into<String>,
        language_code: impl Into<String>,
        language_name: impl Into<String>,
        is_generated: bool,
        is_translatable: bool,
        translation_languages: Option<HashMap<String, String>>,
    ) -> Self {
        Self {
            http,
            video_id: video_id.into(),
            url: url.into(),
            language_code: language_code.into(),
            language_name: language_name.into(),
            is_generated,
            is_translatable,
            translation_languages,
            cached: OnceLock::new(),
        }
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn language_name(&self) -> &str {
        &self.language_name
    }

    pub fn is_generated(&self) -> bool {
        self.is_generated
    }

    pub fn is_translatable(&self) -> bool {
        self.is_translatable
    }

    pub fn translation_languages(&self) -> Option<&HashMap<String, String>> {
        self.translation_languages.as_ref()
    }

    /// Fetch and parse the timedtext payload behind this track.
    ///
    /// The result of the first successful call is cached; later calls return
    /// the same snippets without touching the network. A malformed payload
    /// degrades to an empty (cached) snippet list rather than an error.
    pub fn fetch(&self) -> Result<&[Snippet]> {
        if let Some(snippets) = self.cached.get() {
            return Ok(snippets);
        }

        let raw = self.http.get_bytes(&self.url)?;
        let snippets = timedtext::parse(&raw);
        tracing::debug!(
            video_id = self.video_id.as_str(),
            language = self.language_code.as_str(),
            snippets = snippets.len(),
            "caption payload parsed"
        );

        Ok(self.cached.get_or_init(|| snippets))
    }

    /// Derive a machine-translated variant of this track.
    ///
    /// The new descriptor fetches through a `tlang`-augmented URL, is always
    /// marked generated, and cannot itself be translated further. The
    /// original descriptor is left untouched.
    pub fn translate(&self, language_code: &str) -> Transcript {
        let language_name = self
            .translation_languages
            .as_ref()
            .and_then(|m| m.get(language_code).cloned())
            .unwrap_or_else(|| language_code.to_string());

        Transcript {
            http: self.http.clone(),
            video_id: self.video_id.clone(),
            url: format!("{}&tlang={}", self.url, language_code),
            language_code: language_code.to_string(),
            language_name,
            is_generated: true,
            is_translatable: false,
            translation_languages: None,
            cached: OnceLock::new(),
        }
    }
}

/// All caption tracks discovered for one video, in discovery order.
#[derive(Debug, Clone)]
pub struct TranscriptList {
    video_id: String,
    transcripts: Vec<Transcript>,
}

impl TranscriptList {
    pub fn new(video_id: impl Into<String>, transcripts: Vec<Transcript>) -> Self {
        Self {
            video_id: video_id.into(),
            transcripts,
        }
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn all(&self) -> &[Transcript] {
        &self.transcripts
    }

    pub fn manual(&self) -> impl Iterator<Item = &Transcript> {
        self.transcripts.iter().filter(|t| !t.is_generated())
    }

    pub fn generated(&self) -> impl Iterator<Item = &Transcript> {
        self.transcripts.iter().filter(|t| t.is_generated())
    }

    /// Resolve the language cascade: for each requested code in caller
    /// order, scan candidates in discovery order and return the first match.
    ///
    /// With `prefer_manual`, manual tracks get a dedicated first pass. The
    /// second pass always scans the full set, manual tracks included; that
    /// revisit is part of the documented precedence and must stay.
    pub fn find_transcript(
        &self,
        language_codes: &[&str],
        prefer_manual: bool,
    ) -> Result<&Transcript> {
        if prefer_manual {
            for code in language_codes {
                for transcript in self.manual() {
                    if matches_language(transcript.language_code(), code) {
                        return Ok(transcript);
                    }
                }
            }
        }

        for code in language_codes {
            for transcript in &self.transcripts {
                if matches_language(transcript.language_code(), code) {
                    return Ok(transcript);
                }
            }
        }

        Err(self.not_found(language_codes))
    }

    /// Like [`find_transcript`](Self::find_transcript), but only manual
    /// tracks are considered.
    pub fn find_manually_created_transcript(
        &self,
        language_codes: &[&str],
    ) -> Result<&Transcript> {
        self.find_in_pool(language_codes, |t| !t.is_generated())
    }

    /// Like [`find_transcript`](Self::find_transcript), but only
    /// auto-generated tracks are considered.
    pub fn find_generated_transcript(&self, language_codes: &[&str]) -> Result<&Transcript> {
        self.find_in_pool(language_codes, |t| t.is_generated())
    }

    fn find_in_pool<F>(&self, language_codes: &[&str], in_pool: F) -> Result<&Transcript>
    where
        F: Fn(&Transcript) -> bool,
    {
        for code in language_codes {
            for transcript in self.transcripts.iter().filter(|t| in_pool(t)) {
                if matches_language(transcript.language_code(), code) {
                    return Ok(transcript);
                }
            }
        }

        Err(self.not_found(language_codes))
    }

    fn not_found(&self, language_codes: &[&str]) -> Error {
        Error::TranscriptNotFound {
            video_id: self.video_id.clone(),
            requested_languages: language_codes.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Case-insensitive language match with base-language fallback: `en-US`
/// matches a request for `en` and vice versa.
fn matches_language(available: &str, requested: &str) -> bool {
    let available = available.to_lowercase();
    let requested = requested.to_lowercase();

    available == requested || base_language(&available) == base_language(&requested)
}

fn base_language(code: &str) -> &str {
    code.split('-').next().unwrap_or(code)
}
