//! Comma-spacing formatter for MATLAB sources.
//!
//! One normalization is applied to raw text: every comma is followed by
//! exactly one space. The whitespace run after a comma, line breaks included,
//! collapses to one space. A comma at end of text is left alone; a run that
//! reaches end of text keeps its last character (or its last two when the
//! text ends in `\n`), so the result never ends in a bare `, `.
//!
//! Commas inside string literals and comments are treated like code commas.

use crate::error::{Result, StyleError};
use crate::scanner::collect_files;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

pub struct FormatResult {
    pub file: String,
    pub changed: bool,
    pub wrote: bool,
    pub original: String,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A line whose text differs between original and formatted output.
pub struct LineChange {
    pub line: usize,
    pub old: String,
    pub new: String,
}

fn comma_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s*").expect("valid comma regex"))
}

/// Normalize comma spacing in `text`. Idempotent.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut last = 0;
    for m in comma_run().find_iter(text) {
        let end = if m.end() < text.len() {
            m.end()
        } else {
            // The run touches end of text: back off so at least one
            // character (two before a final `\n`) stays after the space.
            let run = &text[m.start() + 1..m.end()];
            let keep = if text.ends_with('\n') { 2 } else { 1 };
            match run.char_indices().rev().nth(keep - 1) {
                Some((i, _)) => m.start() + 1 + i,
                None => continue,
            }
        };
        out.push_str(&text[last..m.start()]);
        out.push_str(", ");
        last = end;
    }
    out.push_str(&text[last..]);
    out
}

/// Format one file. With `overwrite`, the normalized text is written back
/// with LF line endings; otherwise both texts are returned for diffing.
///
/// CRLF endings are folded to LF on read, so `changed` only reflects commas.
pub fn format_file(path: &Path, overwrite: bool) -> Result<FormatResult> {
    let original = fs::read_to_string(path)
        .map_err(|source| StyleError::FileRead {
            path: path.to_path_buf(),
            source,
        })?
        .replace("\r\n", "\n");
    let formatted = normalize(&original);
    let changed = formatted != original;
    if overwrite {
        fs::write(path, &formatted).map_err(|source| StyleError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(file = %path.display(), changed, "overwrote file");
    }
    Ok(FormatResult {
        file: path.to_string_lossy().to_string(),
        changed,
        wrote: overwrite,
        original,
        formatted,
    })
}

/// Format every `.m` file under `dir`. Unlike the checker, no directories are
/// pruned. Failures are returned per file so one bad file does not stop the
/// walk.
pub fn format_directory(dir: &Path, overwrite: bool) -> Vec<Result<FormatResult>> {
    let files = collect_files(dir, false);
    debug!(dir = %dir.display(), files = files.len(), "formatting directory");
    files.iter().map(|p| format_file(p, overwrite)).collect()
}

/// Pair up lines by index and keep those that differ. Lines past the end of
/// the shorter text are not compared.
pub fn diff_lines(original: &str, formatted: &str) -> Vec<LineChange> {
    original
        .lines()
        .zip(formatted.lines())
        .enumerate()
        .filter(|(_, (old, new))| old != new)
        .map(|(idx, (old, new))| LineChange {
            line: idx + 1,
            old: old.to_string(),
            new: new.to_string(),
        })
        .collect()
}
