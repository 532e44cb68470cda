//! Line classifier: separates the code part of a MATLAB line from its comment.
//!
//! A `%` starts a comment unless it sits inside a `'`-quoted literal. Inside a
//! literal a doubled quote (`''`) is an escaped quote and does not close it.
//!
//! Literal state is tracked within a single line only. A literal left open at
//! end of line is simply returned as collected; continuation across lines is
//! not supported.

/// Character that opens a comment outside literals.
pub const COMMENT: char = '%';
/// Character that delimits string literals.
pub const QUOTE: char = '\'';

/// Return the code segment of `line`: everything before the first comment
/// delimiter that is not inside a literal. Literal contents are kept verbatim.
pub fn code_segment(line: &str) -> &str {
    let mut in_literal = false;
    let mut pending_close = false;
    for (idx, ch) in line.char_indices() {
        if in_literal {
            if !pending_close {
                if ch == QUOTE {
                    pending_close = true;
                }
                continue;
            }
            pending_close = false;
            if ch == QUOTE {
                // `''` inside a literal
                continue;
            }
            in_literal = false;
        }
        if ch == COMMENT {
            return &line[..idx];
        }
        if ch == QUOTE {
            in_literal = true;
        }
    }
    line
}

/// Return the text after the first comment delimiter, if any.
///
/// This is a plain search and does not consult literal state.
pub fn comment_segment(line: &str) -> Option<&str> {
    line.find(COMMENT).map(|idx| &line[idx + COMMENT.len_utf8()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_without_quote_or_comment_is_unchanged() {
        assert_eq!(code_segment("x = y + 1;"), "x = y + 1;");
        assert_eq!(code_segment(""), "");
    }

    #[test]
    fn test_comment_is_stripped() {
        assert_eq!(code_segment("code % comment"), "code ");
        assert_eq!(code_segment("% whole line"), "");
    }

    #[test]
    fn test_percent_inside_literal_does_not_truncate() {
        let line = "x = 'a%b', 'c'";
        assert_eq!(code_segment(line), line);
        assert_eq!(code_segment("x = 'a%b' % note"), "x = 'a%b' ");
    }

    #[test]
    fn test_doubled_quote_stays_in_literal() {
        let line = "s = 'it''s'";
        assert_eq!(code_segment(line), line);
        assert_eq!(code_segment("s = 'it''s%' % c"), "s = 'it''s%' ");
    }

    #[test]
    fn test_closing_quote_followed_by_comment() {
        assert_eq!(code_segment("s = 'a'% c"), "s = 'a'");
    }

    #[test]
    fn test_unterminated_literal_returns_everything() {
        assert_eq!(code_segment("s = 'abc % d"), "s = 'abc % d");
    }

    #[test]
    fn test_multibyte_characters_are_preserved() {
        assert_eq!(code_segment("s = 'héllo' % ü"), "s = 'héllo' ");
    }

    #[test]
    fn test_comment_segment_plain_split() {
        assert_eq!(comment_segment("a = 1; % note"), Some(" note"));
        assert_eq!(comment_segment("x = 'a%b'"), Some("b'"));
        assert_eq!(comment_segment("a = 1;"), None);
    }
}
