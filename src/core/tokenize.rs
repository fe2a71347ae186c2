//! core::tokenize
//!
//! Quote-aware tokenizer for console input lines.
//!
//! # Algorithm
//!
//! The line is first split on whitespace. Fragments are then scanned in
//! order: a fragment starting with `'` or `"` (while no span is open) opens a
//! quoted span and loses its leading quote. The fragment that ends with the
//! same delimiter loses the trailing quote and closes the span; every
//! fragment of the span is rejoined with single spaces into one token.
//! Fragments outside any span pass through unchanged.
//!
//! If a span is never closed, the original fragments are returned untouched
//! and the outcome is flagged so the caller can warn the operator.
//!
//! # Example
//!
//! ```
//! use sbtc::core::tokenize::tokenize;
//!
//! let outcome = tokenize(r#"getrawtransaction "abc def" true"#);
//! assert!(!outcome.is_unterminated());
//! assert_eq!(
//!     outcome.into_tokens(),
//!     vec!["getrawtransaction", "abc def", "true"]
//! );
//! ```

/// Warning text shown when a quoted span is never closed.
pub const UNTERMINATED_QUOTE_WARNING: &str = "Warning: Failed to locate end of quote.";

/// Result of joining quoted spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// All spans were closed; tokens are the joined list.
    Joined(Vec<String>),
    /// A span was opened but never closed; tokens are the original fragments.
    Unterminated(Vec<String>),
}

impl JoinOutcome {
    /// Whether the input contained an unclosed quote.
    pub fn is_unterminated(&self) -> bool {
        matches!(self, JoinOutcome::Unterminated(_))
    }

    /// The tokens to dispatch, regardless of outcome.
    pub fn into_tokens(self) -> Vec<String> {
        match self {
            JoinOutcome::Joined(tokens) | JoinOutcome::Unterminated(tokens) => tokens,
        }
    }

    /// Borrow the tokens.
    pub fn tokens(&self) -> &[String] {
        match self {
            JoinOutcome::Joined(tokens) | JoinOutcome::Unterminated(tokens) => tokens,
        }
    }
}

/// Split a raw line on whitespace and merge quoted spans.
pub fn tokenize(line: &str) -> JoinOutcome {
    let fragments: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    join_quotes(&fragments)
}

/// Merge quoted spans in an already whitespace-split fragment list.
pub fn join_quotes(fragments: &[String]) -> JoinOutcome {
    let mut out = Vec::with_capacity(fragments.len());
    let mut span: Vec<&str> = Vec::new();
    let mut delim: Option<char> = None;

    for fragment in fragments {
        let mut piece = fragment.as_str();

        if delim.is_none() {
            if let Some(quote) = piece.chars().next().filter(|c| *c == '\'' || *c == '"') {
                delim = Some(quote);
                piece = &piece[quote.len_utf8()..];
            }
        }

        match delim {
            Some(quote) if piece.ends_with(quote) => {
                span.push(&piece[..piece.len() - quote.len_utf8()]);
                out.push(span.join(" "));
                span.clear();
                delim = None;
            }
            Some(_) => span.push(piece),
            None => out.push(fragment.clone()),
        }
    }

    if delim.is_some() {
        JoinOutcome::Unterminated(fragments.to_vec())
    } else {
        JoinOutcome::Joined(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &[&str]) -> Vec<String> {
        s.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn plain_tokens_pass_through() {
        let outcome = tokenize("getblockhash 100");
        assert_eq!(outcome, JoinOutcome::Joined(words(&["getblockhash", "100"])));
    }

    #[test]
    fn double_quoted_span_is_joined() {
        let outcome = tokenize(r#"signmessage addr "hello there world""#);
        assert_eq!(
            outcome.into_tokens(),
            words(&["signmessage", "addr", "hello there world"])
        );
    }

    #[test]
    fn single_quoted_span_is_joined() {
        let outcome = tokenize("cmd 'a b' c");
        assert_eq!(outcome.into_tokens(), words(&["cmd", "a b", "c"]));
    }

    #[test]
    fn single_fragment_quote() {
        let outcome = tokenize(r#"cmd "abc""#);
        assert_eq!(outcome.into_tokens(), words(&["cmd", "abc"]));
    }

    #[test]
    fn repeated_whitespace_collapses_inside_span() {
        let outcome = tokenize("cmd \"a    b\"");
        assert_eq!(outcome.into_tokens(), words(&["cmd", "a b"]));
    }

    #[test]
    fn other_delimiter_inside_span_is_kept() {
        let outcome = tokenize(r#"cmd "it's fine""#);
        assert_eq!(outcome.into_tokens(), words(&["cmd", "it's fine"]));
    }

    #[test]
    fn two_spans_in_one_line() {
        let outcome = tokenize(r#"cmd "a b" 'c d'"#);
        assert_eq!(outcome.into_tokens(), words(&["cmd", "a b", "c d"]));
    }

    #[test]
    fn unterminated_returns_original() {
        let outcome = tokenize(r#"cmd "a b c"#);
        assert!(outcome.is_unterminated());
        assert_eq!(outcome.into_tokens(), words(&["cmd", "\"a", "b", "c"]));
    }

    #[test]
    fn mismatched_closing_delimiter_is_unterminated() {
        let outcome = tokenize(r#"cmd "a b'"#);
        assert!(outcome.is_unterminated());
    }

    #[test]
    fn lone_quote_is_unterminated() {
        let outcome = tokenize("cmd \" x");
        assert!(outcome.is_unterminated());
        assert_eq!(outcome.tokens(), words(&["cmd", "\"", "x"]).as_slice());
    }

    #[test]
    fn trailing_quote_outside_span_passes_through() {
        let outcome = tokenize("cmd abc\"");
        assert_eq!(outcome, JoinOutcome::Joined(words(&["cmd", "abc\""])));
    }

    #[test]
    fn empty_line_yields_no_tokens() {
        assert_eq!(tokenize("   "), JoinOutcome::Joined(Vec::new()));
    }
}
