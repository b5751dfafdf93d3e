use crate::{formats::time::format_srt_timestamp, model::Snippet};

pub fn write_srt(snippets: &[Snippet]) -> String {
    let mut out = String::new();

    for (i, snippet) in snippets.iter().enumerate() {
        out.push_str(&(i + 1).to_string());
        out.push('\n');

        out.push_str(&format!(
            "{} --> {}\n",
            format_srt_timestamp(snippet.start),
            format_srt_timestamp(snippet.end())
        ));

        out.push_str(&snippet.text);
        out.push_str("\n\n");
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_numbered_blocks() {
        let snippets = vec![
            Snippet::new("Hello world", 0.0, 2.5),
            Snippet::new("This is a test", 2.5, 3.0),
        ];

        let expected = "1\n\
                        00:00:00,000 --> 00:00:02,500\n\
                        Hello world\n\
                        \n\
                        2\n\
                        00:00:02,500 --> 00:00:05,500\n\
                        This is a test";
        assert_eq!(write_srt(&snippets), expected);
    }

    #[test]
    fn end_timecode_is_start_plus_duration() {
        let snippets = vec![Snippet::new("x", 3600.0, 61.5)];
        let out = write_srt(&snippets);
        assert!(out.contains("01:00:00,000 --> 01:01:01,500"));
    }

    #[test]
    fn empty_input_renders_empty_string() {
        assert_eq!(write_srt(&[]), "");
    }

    #[test]
    fn rendering_is_deterministic() {
        let snippets = vec![Snippet::new("a", 0.0, 1.0)];
        assert_eq!(write_srt(&snippets), write_srt(&snippets));
    }
}
