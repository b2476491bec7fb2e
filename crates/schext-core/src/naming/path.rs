//! Path segment helpers for output naming.

use std::path::{Component, Path, PathBuf};
use url::Url;

/// Extracts the last non-empty path segment of a URL.
///
/// Returns `None` if the path is empty/root or ends in `.`/`..`.
pub fn last_url_segment(url: &Url) -> Option<String> {
    let segment = url.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Last component of a filesystem path, if it is a normal name.
pub fn last_fs_segment(path: &Path) -> Option<String> {
    match path.components().last()? {
        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    }
}

/// Joins `parts` into a relative path, or reports the first part that could
/// escape the output root (empty, `.`, `..`, absolute, or containing a separator
/// when `allow_nested` is false).
pub fn join_relative(parts: &[&str], allow_nested: bool) -> Result<PathBuf, String> {
    let mut out = PathBuf::new();
    for part in parts {
        let pieces: Vec<&str> = if allow_nested {
            part.split('/').collect()
        } else {
            vec![*part]
        };
        for piece in pieces {
            if piece.is_empty() || piece == "." || piece == ".." {
                return Err(format!("unsafe path component {:?}", piece));
            }
            if piece.contains('/') || piece.contains('\\') || piece.contains('\0') {
                return Err(format!("path component {:?} contains a separator", piece));
            }
            out.push(piece);
        }
    }
    if out.as_os_str().is_empty() {
        return Err("empty path".to_string());
    }
    Ok(out)
}
