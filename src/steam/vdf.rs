use crate::error::{LocatorError, Result};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Line-oriented field extractor for Steam `libraryfolders.vdf` and `appmanifest_*.acf`.
///
/// Only lines shaped like `"<field>"  "<value>"` are considered; nesting is
/// ignored, which is enough for the flat fields this crate reads (`path`,
/// `installdir`). Values are returned in file order with escapes resolved.
pub fn extract_fields(path: &Path, field: &str) -> Result<Vec<String>> {
    let document = |source| LocatorError::Document {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(document)?;
    let re = field_pattern(field)?;

    let mut out = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(document)?;
        if let Some(v) = match_line(&re, &line) {
            out.push(v);
        }
    }
    Ok(out)
}

/// Same as [`extract_fields`], for a document already held in memory.
pub fn extract_fields_from_str(text: &str, field: &str) -> Result<Vec<String>> {
    let re = field_pattern(field)?;
    Ok(text.lines().filter_map(|l| match_line(&re, l)).collect())
}

fn field_pattern(field: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(
        r#"^\s*"{}"\s+"(.*)""#,
        regex::escape(field)
    ))?)
}

fn match_line(re: &Regex, line: &str) -> Option<String> {
    re.captures(line).map(|c| unescape(&c[1]))
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            // dangling backslash at end of value
            None => out.push('\\'),
        }
    }
    out
}
