//! Fixed style rules applied to every checked file.
//!
//! Rules are independent; a `RuleSet` runs them in registration order and
//! concatenates their diagnostics, so the output for a file is deterministic.

use crate::classify::{code_segment, comment_segment};
use crate::error::StyleError;
use crate::models::Diagnostic;
use std::collections::BTreeSet;

/// Blank-line runs of at least this length are reported.
pub const MAX_BLANK_RUN: usize = 3;

const DEFAULT_FORBIDDEN: &[&str] = &[
    "eval", "evalin", "evalc", "assignin", "exist", "global", "clear", "clc", "keyboard", "input",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Style rules, in registration order.
pub enum Rule {
    BlankLines,
    CodeDoubleQuote,
    CommentAscii,
    NonAscii,
    ForbiddenKeyword,
}

impl Rule {
    pub const ALL: [Rule; 5] = [
        Rule::BlankLines,
        Rule::CodeDoubleQuote,
        Rule::CommentAscii,
        Rule::NonAscii,
        Rule::ForbiddenKeyword,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Rule::BlankLines => "blank-lines",
            Rule::CodeDoubleQuote => "code-double-quote",
            Rule::CommentAscii => "comment-ascii",
            Rule::NonAscii => "non-ascii",
            Rule::ForbiddenKeyword => "forbidden-keyword",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Identifiers that must not appear as bare tokens in code.
pub struct ForbiddenKeywords(BTreeSet<String>);

impl ForbiddenKeywords {
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }
}

impl Default for ForbiddenKeywords {
    fn default() -> Self {
        DEFAULT_FORBIDDEN.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ForbiddenKeywords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ForbiddenKeywords(iter.into_iter().map(Into::into).collect())
    }
}

/// The registered rules plus the configuration they need.
pub struct RuleSet {
    rules: Vec<Rule>,
    keywords: ForbiddenKeywords,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet::new(ForbiddenKeywords::default())
    }
}

impl RuleSet {
    pub fn new(keywords: ForbiddenKeywords) -> Self {
        RuleSet {
            rules: Rule::ALL.to_vec(),
            keywords,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Run every rule over a file's contents.
    ///
    /// When the file could not be read, each rule reports the read error once
    /// instead of inspecting lines.
    pub fn run(&self, source: Result<&str, &StyleError>) -> Vec<Diagnostic> {
        match source {
            Ok(text) => {
                let lines: Vec<&str> = text.lines().collect();
                self.rules
                    .iter()
                    .flat_map(|rule| self.apply(*rule, &lines))
                    .collect()
            }
            Err(e) => self
                .rules
                .iter()
                .map(|rule| Diagnostic::file_level(rule.id(), e.to_string()))
                .collect(),
        }
    }

    fn apply(&self, rule: Rule, lines: &[&str]) -> Vec<Diagnostic> {
        match rule {
            Rule::BlankLines => check_blank_lines(lines),
            Rule::CodeDoubleQuote => check_code_double_quotes(lines),
            Rule::CommentAscii => check_comment_ascii(lines),
            Rule::NonAscii => check_non_ascii(lines),
            Rule::ForbiddenKeyword => check_forbidden_keywords(lines, &self.keywords),
        }
    }
}

/// Report each maximal run of `MAX_BLANK_RUN` or more whitespace-only lines.
pub fn check_blank_lines(lines: &[&str]) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let mut run = 0usize;
    let mut start = 0usize;
    for (idx, line) in lines.iter().enumerate() {
        let n = idx + 1;
        if line.trim().is_empty() {
            if run == 0 {
                start = n;
            }
            run += 1;
        } else {
            if run >= MAX_BLANK_RUN {
                out.push(blank_run(start, n - 1, run));
            }
            run = 0;
        }
    }
    if run >= MAX_BLANK_RUN {
        out.push(blank_run(start, lines.len(), run));
    }
    out
}

fn blank_run(start: usize, end: usize, len: usize) -> Diagnostic {
    Diagnostic::at_lines(
        Rule::BlankLines.id(),
        start,
        end,
        format!("{} consecutive empty lines.", len),
    )
}

/// Flag lines whose code segment contains a double quote.
pub fn check_code_double_quotes(lines: &[&str]) -> Vec<Diagnostic> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| code_segment(line).contains('"'))
        .map(|(idx, line)| {
            Diagnostic::at_line(
                Rule::CodeDoubleQuote.id(),
                idx + 1,
                format!("Double quotes in code detected: {}", line.trim()),
            )
        })
        .collect()
}

/// Flag non-ASCII characters and double quotes inside comments.
pub fn check_comment_ascii(lines: &[&str]) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let Some(comment) = comment_segment(line) else {
            continue;
        };
        let n = idx + 1;
        let chars = non_ascii_chars(comment);
        if !chars.is_empty() {
            out.push(Diagnostic::at_line(
                Rule::CommentAscii.id(),
                n,
                format!("Non-ASCII characters in comment: {}", chars),
            ));
        }
        if comment.contains('"') {
            out.push(Diagnostic::at_line(
                Rule::CommentAscii.id(),
                n,
                format!("Double quotes in comment detected: {}", comment.trim()),
            ));
        }
    }
    out
}

/// Flag non-ASCII characters anywhere on a line.
pub fn check_non_ascii(lines: &[&str]) -> Vec<Diagnostic> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            let chars = non_ascii_chars(line);
            (!chars.is_empty()).then(|| {
                Diagnostic::at_line(
                    Rule::NonAscii.id(),
                    idx + 1,
                    format!("Non-ASCII characters detected: {}", chars),
                )
            })
        })
        .collect()
}

/// Flag whitespace-separated code tokens equal to a forbidden identifier.
///
/// Tokenization is whitespace-only: `exist(x)` is a single token and does not
/// match `exist`.
pub fn check_forbidden_keywords(lines: &[&str], keywords: &ForbiddenKeywords) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        for token in code_segment(line).split_whitespace() {
            if keywords.contains(token) {
                out.push(Diagnostic::at_line(
                    Rule::ForbiddenKeyword.id(),
                    idx + 1,
                    format!("Forbidden keyword '{}' used: {}", token, line.trim()),
                ));
            }
        }
    }
    out
}

fn non_ascii_chars(s: &str) -> String {
    s.chars().filter(|c| !c.is_ascii()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_blank_run_of_three_reported_once() {
        let out = check_blank_lines(&["a", "", "", "", "b"]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].to_string(), "Lines 2-4: 3 consecutive empty lines.");
    }

    #[test]
    fn test_two_blanks_are_fine() {
        assert!(check_blank_lines(&["a", "", "", "b"]).is_empty());
    }

    #[test]
    fn test_blank_run_at_eof_uses_last_line() {
        let out = check_blank_lines(&["a", "  ", "\t", "", ""]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].to_string(), "Lines 2-5: 4 consecutive empty lines.");
    }

    #[test]
    fn test_double_quote_in_code_only() {
        let out = check_code_double_quotes(&["  s = \"abc\";  ", "x = 1; % \"quoted\""]);
        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].to_string(),
            "Line 1: Double quotes in code detected: s = \"abc\";"
        );
    }

    #[test]
    fn test_comment_non_ascii_and_quote_are_separate() {
        let out = check_comment_ascii(&["x = 1; % résumé \"q\""]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].to_string(), "Line 1: Non-ASCII characters in comment: éé");
        assert_eq!(
            out[1].to_string(),
            "Line 1: Double quotes in comment detected: résumé \"q\""
        );
    }

    #[test]
    fn test_non_ascii_anywhere_fires_alongside_comment_rule() {
        let lines = ["s = 'ü'; % ö"];
        let anywhere = check_non_ascii(&lines);
        assert_eq!(anywhere.len(), 1);
        assert_eq!(anywhere[0].to_string(), "Line 1: Non-ASCII characters detected: üö");
        assert_eq!(check_comment_ascii(&lines).len(), 1);
    }

    #[test]
    fn test_forbidden_keyword_exact_token_only() {
        let kw: ForbiddenKeywords = ["exist"].into_iter().collect();
        assert!(check_forbidden_keywords(&["existing = 1"], &kw).is_empty());
        assert!(check_forbidden_keywords(&["exist(x)"], &kw).is_empty());
        let out = check_forbidden_keywords(&["exist ( x )"], &kw);
        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].to_string(),
            "Line 1: Forbidden keyword 'exist' used: exist ( x )"
        );
    }

    #[test]
    fn test_forbidden_keyword_ignored_in_comment_and_literal_boundary() {
        let kw = ForbiddenKeywords::default();
        assert!(check_forbidden_keywords(&["x = 1; % clear all"], &kw).is_empty());
        assert_eq!(check_forbidden_keywords(&["clear all"], &kw).len(), 1);
    }

    #[test]
    fn test_rule_set_order_is_registration_order() {
        let set = RuleSet::default();
        let text = "a\n\n\n\ns = \"é\";\n";
        let ids: Vec<_> = set.run(Ok(text)).iter().map(|d| d.rule).collect();
        assert_eq!(ids, vec!["blank-lines", "code-double-quote", "non-ascii"]);
    }

    #[test]
    fn test_read_error_gives_one_diagnostic_per_rule() {
        let set = RuleSet::default();
        let err = StyleError::FileRead {
            path: PathBuf::from("missing.m"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let out = set.run(Err(&err));
        assert_eq!(out.len(), set.rules().len());
        assert!(out.iter().all(|d| d.span.is_none()));
        assert!(out[0].message.starts_with("Error reading file missing.m"));
    }
}
