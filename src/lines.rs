use std::{fs, path::Path};

/// Reads the file at `path` as lines ending in `\n`, `\r\n` or a lone `\r`.
///
/// A terminator at the very end does not start another line, so `"a\nb\n"`
/// and `"a\nb"` both give two lines, while `"a\nb\n\n"` gives three.
///
/// # Errors
///
/// Returns any errors from reading the file, including content that is not
/// valid UTF-8.
pub fn read_lines(path: impl AsRef<Path>) -> std::io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(split_lines(&text).into_iter().map(String::from).collect())
}

fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let Some(end) = rest.find(&['\r', '\n'][..]) else {
            lines.push(rest);
            break;
        };
        lines.push(&rest[..end]);
        let width = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + width..];
    }
    lines
}
