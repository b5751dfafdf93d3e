use crate::model::Snippet;

pub fn write_txt(snippets: &[Snippet], separator: &str) -> String {
    snippets
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}
