use serde::{Deserialize, Serialize};

/// A single caption fragment: what was said, when, and for how long.
///
/// Snippets are immutable once produced by the timedtext parser. Times are
/// seconds; `end` is derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl Snippet {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}
