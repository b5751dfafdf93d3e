use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by transcript resolution.
///
/// Malformed timedtext payloads are deliberately absent here: the parser
/// absorbs them and degrades to an empty snippet sequence, so callers see
/// "zero snippets" rather than a failure.
#[derive(Debug, Error)]
pub enum Error {
    /// The watch page could not be fetched, or it reports the video as gone.
    #[error("video '{video_id}' is unavailable or does not exist")]
    VideoUnavailable { video_id: String },

    /// The video exists but exposes no caption tracks at all.
    #[error("no transcripts available for video '{video_id}'")]
    NoTranscriptFound { video_id: String },

    /// Tracks exist, but none matched the requested language cascade.
    #[error("no transcript found for video '{video_id}' in languages: {}", .requested_languages.join(", "))]
    TranscriptNotFound {
        video_id: String,
        requested_languages: Vec<String>,
    },

    /// Transport failure on a caption payload fetch.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid header value in client config: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("failed serializing snippets as JSON: {0}")]
    Json(#[from] serde_json::Error),
}
