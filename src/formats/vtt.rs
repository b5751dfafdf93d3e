use crate::{formats::time::format_vtt_timestamp, model::Snippet};

pub fn write_vtt(snippets: &[Snippet]) -> String {
    let mut out = String::from("WEBVTT\n\n");

    for snippet in snippets {
        out.push_str(&format!(
            "{} --> {}\n",
            format_vtt_timestamp(snippet.start),
            format_vtt_timestamp(snippet.end())
        ));

        out.push_str(&snippet.text);
        out.push_str("\n\n");
    }

    out.trim_end().to_string()
}
