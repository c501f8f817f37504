use std::path::{Path, PathBuf};

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Strip trailing `/` or `\` from a directory path, keeping bare roots (`/`, `C:\`) intact.
///
/// Both separators are handled on every host because registry and VDF values
/// always carry Windows-style paths.
pub(crate) fn trim_trailing_separator(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    let trimmed = s.trim_end_matches(is_separator);

    if trimmed.is_empty() {
        // all separators: `/`, `\\`
        return PathBuf::from(&s[..1]);
    }
    if trimmed.len() == 2 && trimmed.ends_with(':') && trimmed.len() < s.len() {
        // drive root: `C:\`
        return PathBuf::from(&s[..3]);
    }
    if trimmed.len() == s.len() {
        return path.to_path_buf();
    }
    PathBuf::from(trimmed)
}
