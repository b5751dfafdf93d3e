//! Parser for the timedtext XML payload behind a caption track.
//!
//! A well-behaved payload is a flat document of
//! `<text start="S" dur="D">body</text>` elements, but real responses show
//! up with byte-order marks, stray control bytes, unescaped ampersands, and
//! byte sequences that are not valid UTF-8. Parsing therefore runs through
//! an escalating sanitize-and-retry ladder; a payload that survives no rung
//! yields an empty snippet list instead of an error.

use html_escape::decode_html_entities;

use crate::model::Snippet;

type ParseStrategy = fn(&str) -> Option<Vec<Snippet>>;

/// Attempted in order; the first strategy that produces a document wins.
const STRATEGIES: &[ParseStrategy] = &[parse_lenient, parse_scrubbed];

/// Parse a raw timedtext payload into snippets. Never fails.
pub fn parse(raw: &[u8]) -> Vec<Snippet> {
    let text = sanitize_basic(raw);

    for strategy in STRATEGIES {
        if let Some(snippets) = strategy(&text) {
            return snippets;
        }
    }

    tracing::debug!("timedtext payload unparseable after all sanitize passes");
    Vec::new()
}

/// Repair UTF-8, strip a leading byte-order mark, trim.
fn sanitize_basic(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    text.trim().to_string()
}

fn parse_lenient(text: &str) -> Option<Vec<Snippet>> {
    let doc = roxmltree::Document::parse(text).ok()?;
    Some(collect_snippets(&doc))
}

/// Second rung: drop characters XML forbids outright, repair unescaped
/// ampersands, and raise the node limit for oversized documents.
fn parse_scrubbed(text: &str) -> Option<Vec<Snippet>> {
    let scrubbed = escape_stray_ampersands(&strip_illegal_chars(text));

    let mut opts = roxmltree::ParsingOptions::default();
    opts.nodes_limit = u32::MAX;
    let doc = roxmltree::Document::parse_with_options(&scrubbed, opts).ok()?;
    Some(collect_snippets(&doc))
}

fn collect_snippets(doc: &roxmltree::Document) -> Vec<Snippet> {
    doc.descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "text")
        .map(|n| {
            let start = read_seconds(n.attribute("start"));
            let duration = read_seconds(n.attribute("dur"));
            let body: String = n.descendants().filter_map(|c| c.text()).collect();
            Snippet::new(decode_html_entities(&body).into_owned(), start, duration)
        })
        .collect()
}

fn read_seconds(attr: Option<&str>) -> f64 {
    attr.and_then(|v| v.parse().ok()).unwrap_or(0.0)
}

/// Keep tab/LF/CR plus the character ranges XML 1.0 allows.
fn strip_illegal_chars(text: &str) -> String {
    text.chars().filter(|&c| is_legal_xml_char(c)).collect()
}

fn is_legal_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Replace any `&` that does not begin a well-formed entity reference with
/// `&amp;`, leaving named and numeric references alone.
fn escape_stray_ampersands(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match entity_len(tail) {
            Some(len) => {
                out.push_str(&tail[..len]);
                rest = &tail[len..];
            }
            None => {
                out.push_str("&amp;");
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Length of the entity reference at the start of `s` (which begins with
/// `&`), or `None` if what follows is not one.
fn entity_len(s: &str) -> Option<usize> {
    // Entity references are short; don't scan the rest of the document.
    let semi = s
        .char_indices()
        .take(32)
        .find(|&(_, c)| c == ';')
        .map(|(i, _)| i)?;
    let body = &s[1..semi];

    let valid = if let Some(num) = body.strip_prefix('#') {
        if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())
        } else {
            !num.is_empty() && num.chars().all(|c| c.is_ascii_digit())
        }
    } else {
        !body.is_empty() && body.chars().all(|c| c.is_ascii_alphanumeric())
    };

    valid.then_some(semi + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_payload() {
        let raw = br#"<?xml version="1.0" encoding="utf-8"?>
<transcript>
  <text start="0" dur="2.5">Hello world</text>
  <text start="2.5" dur="3">Second line</text>
</transcript>"#;

        let snippets = parse(raw);
        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets[0], Snippet::new("Hello world", 0.0, 2.5));
        assert_eq!(snippets[1], Snippet::new("Second line", 2.5, 3.0));
    }

    #[test]
    fn missing_attributes_default_to_zero() {
        let raw = b"<transcript><text>no times</text></transcript>";
        let snippets = parse(raw);
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].start, 0.0);
        assert_eq!(snippets[0].duration, 0.0);
    }

    #[test]
    fn unparseable_attributes_default_to_zero() {
        let raw = br#"<transcript><text start="abc" dur="">x</text></transcript>"#;
        let snippets = parse(raw);
        assert_eq!(snippets[0].start, 0.0);
        assert_eq!(snippets[0].duration, 0.0);
    }

    #[test]
    fn decodes_html_entities_in_body() {
        let raw = br#"<transcript><text start="1" dur="1">it&amp;#39;s &amp;quot;fine&amp;quot; &amp;nbsp;now</text></transcript>"#;
        let snippets = parse(raw);
        assert_eq!(snippets[0].text, "it's \"fine\" \u{a0}now");
    }

    #[test]
    fn survives_bom_entities_and_control_byte() {
        let mut raw = Vec::new();
        raw.extend_from_slice(b"\xef\xbb\xbf");
        raw.extend_from_slice(
            b"<transcript><text start=\"0.5\" dur=\"1.5\">one \x08 &amp; two</text></transcript>",
        );

        let snippets = parse(&raw);
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].start, 0.5);
        assert_eq!(snippets[0].duration, 1.5);
        assert!(snippets[0].text.contains("&"));
        assert!(!snippets[0].text.contains('\u{8}'));
    }

    #[test]
    fn repairs_unescaped_ampersand() {
        let raw = br#"<transcript><text start="0" dur="1">salt & pepper</text></transcript>"#;
        let snippets = parse(raw);
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].text, "salt & pepper");
    }

    #[test]
    fn garbage_yields_empty_not_error() {
        assert!(parse(b"").is_empty());
        assert!(parse(b"this is not xml at all <<<<").is_empty());
        assert!(parse(&[0xff, 0xfe, 0x00, 0x01]).is_empty());
    }

    #[test]
    fn preserves_document_order() {
        let raw = br#"<transcript>
            <text start="5" dur="1">later</text>
            <text start="1" dur="1">earlier</text>
        </transcript>"#;

        let snippets = parse(raw);
        assert_eq!(snippets[0].text, "later");
        assert_eq!(snippets[1].text, "earlier");
    }

    #[test]
    fn entity_len_accepts_named_and_numeric_forms() {
        assert_eq!(entity_len("&amp; rest"), Some(5));
        assert_eq!(entity_len("&#39;"), Some(5));
        assert_eq!(entity_len("&#x27;"), Some(6));
        assert_eq!(entity_len("& bare"), None);
        assert_eq!(entity_len("&;"), None);
        assert_eq!(entity_len("&"), None);
    }
}
