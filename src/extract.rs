//! Extraction of caption-track metadata from a watch page.
//!
//! The page embeds a `ytInitialPlayerResponse = {...};` assignment whose
//! JSON object carries the caption-track list. Everything here is a pure
//! transform over the page string; any shape problem degrades to an empty
//! track list and the caller decides whether that is an error.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::{client::HttpClient, transcript::Transcript};

/// `kind` value YouTube stamps on machine-generated tracks. Opaque
/// sentinel; only equality matters.
const GENERATED_KIND: &str = "asr";

static PLAYER_RESPONSE_RE: OnceLock<Regex> = OnceLock::new();

fn player_response_re() -> &'static Regex {
    PLAYER_RESPONSE_RE.get_or_init(|| {
        Regex::new(r"(?s)ytInitialPlayerResponse\s*=\s*(\{.+?\});").expect("valid literal regex")
    })
}

// The player response is a huge object; these mirror just the path
// captions.playerCaptionsTracklistRenderer, every field optional so a
// partial blob deserializes instead of failing.

#[derive(Debug, Deserialize)]
struct PlayerResponse {
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
    #[serde(default)]
    translation_languages: Vec<TranslationLanguage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    language_code: Option<String>,
    base_url: Option<String>,
    name: Option<Label>,
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationLanguage {
    language_code: Option<String>,
    language_name: Option<Label>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Label {
    simple_text: Option<String>,
}

/// Parse the caption tracks embedded in `html`. Returns an empty vec when
/// the page carries no recognizable player response or no caption list.
pub fn extract(video_id: &str, html: &str, http: &HttpClient) -> Vec<Transcript> {
    let Some(captures) = player_response_re().captures(html) else {
        tracing::debug!(video_id, "no player response assignment found in page");
        return Vec::new();
    };

    let response: PlayerResponse = match serde_json::from_str(&captures[1]) {
        Ok(r) => r,
        Err(err) => {
            tracing::debug!(video_id, %err, "player response JSON did not parse");
            return Vec::new();
        }
    };

    let Some(renderer) = response
        .captions
        .and_then(|c| c.player_captions_tracklist_renderer)
    else {
        return Vec::new();
    };

    let translation_map: HashMap<String, String> = renderer
        .translation_languages
        .into_iter()
        .filter_map(|lang| {
            let code = lang.language_code.filter(|c| !c.is_empty())?;
            let name = lang
                .language_name
                .and_then(|n| n.simple_text)
                .unwrap_or_else(|| code.clone());
            Some((code, name))
        })
        .collect();

    renderer
        .caption_tracks
        .into_iter()
        .filter_map(|track| {
            let language_code = track.language_code.filter(|c| !c.is_empty())?;
            let url = track.base_url.filter(|u| !u.is_empty())?;

            let language_name = track
                .name
                .and_then(|n| n.simple_text)
                .unwrap_or_else(|| language_code.clone());
            let is_generated = track.kind.as_deref() == Some(GENERATED_KIND);
            let is_translatable = !translation_map.is_empty();

            Some(Transcript::new(
                http.clone(),
                video_id,
                url,
                language_code,
                language_name,
                is_generated,
                is_translatable,
                is_translatable.then(|| translation_map.clone()),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;

    fn http() -> HttpClient {
        HttpClient::new(&ClientConfig::default(), None).unwrap()
    }

    fn page_with(player_response: &str) -> String {
        format!(
            "<html><script>var ytInitialPlayerResponse = {player_response};</script></html>"
        )
    }

    const TWO_TRACKS: &str = r#"{
        "captions": {
            "playerCaptionsTracklistRenderer": {
                "captionTracks": [
                    {"baseUrl": "http://example.com/en", "name": {"simpleText": "English"}, "languageCode": "en"},
                    {"baseUrl": "http://example.com/de", "name": {"simpleText": "German"}, "languageCode": "de", "kind": "asr"}
                ],
                "translationLanguages": [
                    {"languageCode": "fr", "languageName": {"simpleText": "French"}}
                ]
            }
        }
    }"#;

    #[test]
    fn extracts_tracks_and_flags() {
        let tracks = extract("vid", &page_with(TWO_TRACKS), &http());
        assert_eq!(tracks.len(), 2);

        assert_eq!(tracks[0].language_code(), "en");
        assert_eq!(tracks[0].language_name(), "English");
        assert!(!tracks[0].is_generated());
        assert!(tracks[0].is_translatable());
        assert_eq!(
            tracks[0].translation_languages().unwrap().get("fr").unwrap(),
            "French"
        );

        assert_eq!(tracks[1].language_code(), "de");
        assert!(tracks[1].is_generated());
    }

    #[test]
    fn all_tracks_share_the_video_id() {
        let tracks = extract("vid", &page_with(TWO_TRACKS), &http());
        assert!(tracks.iter().all(|t| t.video_id() == "vid"));
    }

    #[test]
    fn unknown_kind_is_not_generated() {
        let body = r#"{"captions": {"playerCaptionsTracklistRenderer": {"captionTracks": [
            {"baseUrl": "http://example.com/en", "languageCode": "en", "kind": "forced"}
        ]}}}"#;
        let tracks = extract("vid", &page_with(body), &http());
        assert!(!tracks[0].is_generated());
    }

    #[test]
    fn drops_tracks_missing_code_or_url() {
        let body = r#"{"captions": {"playerCaptionsTracklistRenderer": {"captionTracks": [
            {"baseUrl": "http://example.com/en"},
            {"languageCode": "de"},
            {"baseUrl": "", "languageCode": "fr"},
            {"baseUrl": "http://example.com/it", "languageCode": "it"}
        ]}}}"#;

        let tracks = extract("vid", &page_with(body), &http());
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].language_code(), "it");
    }

    #[test]
    fn name_falls_back_to_language_code() {
        let body = r#"{"captions": {"playerCaptionsTracklistRenderer": {"captionTracks": [
            {"baseUrl": "http://example.com/en", "languageCode": "en"}
        ]}}}"#;
        let tracks = extract("vid", &page_with(body), &http());
        assert_eq!(tracks[0].language_name(), "en");
    }

    #[test]
    fn no_translation_languages_means_not_translatable() {
        let body = r#"{"captions": {"playerCaptionsTracklistRenderer": {"captionTracks": [
            {"baseUrl": "http://example.com/en", "languageCode": "en"}
        ], "translationLanguages": []}}}"#;
        let tracks = extract("vid", &page_with(body), &http());
        assert!(!tracks[0].is_translatable());
        assert!(tracks[0].translation_languages().is_none());
    }

    #[test]
    fn missing_pattern_yields_empty() {
        assert!(extract("vid", "<html>nothing here</html>", &http()).is_empty());
    }

    #[test]
    fn invalid_json_yields_empty() {
        let html = "<script>ytInitialPlayerResponse = {not json};</script>";
        assert!(extract("vid", html, &http()).is_empty());
    }

    #[test]
    fn missing_caption_list_yields_empty() {
        assert!(extract("vid", &page_with(r#"{"videoDetails": {}}"#), &http()).is_empty());
    }
}
