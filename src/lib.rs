//! Fetch YouTube caption tracks and render them as SRT, WebVTT, JSON, or
//! plain text.
//!
//! ```no_run
//! use yt_transcripts::{formats, TranscriptApi};
//!
//! # fn main() -> yt_transcripts::Result<()> {
//! let api = TranscriptApi::new()?;
//! let snippets = api.fetch("dQw4w9WgXcQ", &["en"], true)?;
//! println!("{}", formats::srt::write_srt(&snippets));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod extract;
pub mod formats;
pub mod model;
pub mod proxy;
pub mod timedtext;
pub mod transcript;

pub use client::{ClientConfig, HttpClient, TranscriptApi};
pub use error::{Error, Result};
pub use model::Snippet;
pub use proxy::{GenericProxyConfig, ProxyConfig, WebshareProxyConfig};
pub use transcript::{Transcript, TranscriptList};
