//! Filename cleanup for generic URL and path segments.

/// Longest filename most filesystems accept, in bytes.
const NAME_MAX: usize = 255;

fn is_unsafe(c: char) -> bool {
    matches!(c, '\0' | '/' | '\\') || c.is_control() || c.is_whitespace()
}

/// Makes a trailing URL or path segment safe to use as a single filename.
///
/// Separators, control characters and whitespace become `_` (runs collapse
/// to one), leading and trailing dots or underscores are dropped, and the
/// result is cut to [`NAME_MAX`] bytes on a char boundary. May return an
/// empty string, which callers treat as "no usable name".
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars().map(|c| if is_unsafe(c) { '_' } else { c }) {
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    let end = trimmed
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= NAME_MAX)
        .last()
        .unwrap_or(0);
    trimmed[..end].to_string()
}
