use crate::{error::Result, model::Snippet};

/// Serialize snippets as a JSON array of `{text, start, duration}` objects.
///
/// serde_json leaves non-ASCII text and forward slashes unescaped, which is
/// the required wire shape.
pub fn write_json(snippets: &[Snippet], pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(snippets)?
    } else {
        serde_json::to_string(snippets)?
    };
    Ok(out)
}
