//! editor::complete
//!
//! Command-name completion.
//!
//! Completion only applies while the line is a single command token with
//! the cursor at its end; arguments are never completed. Matching is a
//! case-sensitive prefix test against the registered names.

use super::buffer::LineBuffer;

/// What a tab press should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Not completable, or nothing matches.
    Nothing,
    /// One match: insert `rest` (the untyped remainder plus a space).
    Unique { rest: String },
    /// Several matches, sorted; `extension` is their common prefix beyond what is typed.
    Ambiguous {
        candidates: Vec<String>,
        extension: String,
    },
}

/// Work out the completion for `buffer` against `names`.
///
/// # Example
///
/// ```
/// use sbtc::editor::{complete, Completion, LineBuffer};
///
/// let names = ["getinfo", "getblockcount", "getblockhash"];
/// let mut buf = LineBuffer::new();
/// buf.insert_str("getb");
///
/// assert_eq!(
///     complete(&buf, names.iter().copied()),
///     Completion::Ambiguous {
///         candidates: vec!["getblockcount".into(), "getblockhash".into()],
///         extension: "lock".into(),
///     }
/// );
/// ```
pub fn complete<'a>(buffer: &LineBuffer, names: impl IntoIterator<Item = &'a str>) -> Completion {
    let typed = buffer.as_string();
    if typed.is_empty() || !buffer.at_end() || typed.contains(char::is_whitespace) {
        return Completion::Nothing;
    }

    let mut candidates: Vec<String> = names
        .into_iter()
        .filter(|name| name.starts_with(typed.as_str()))
        .map(String::from)
        .collect();
    candidates.sort();
    candidates.dedup();

    match candidates.len() {
        0 => Completion::Nothing,
        1 => Completion::Unique {
            rest: format!("{} ", &candidates[0][typed.len()..]),
        },
        _ => {
            let common = longest_common_prefix(&candidates);
            let extension = common[typed.len()..].to_string();
            Completion::Ambiguous {
                candidates,
                extension,
            }
        }
    }
}

/// Longest prefix shared by every string in `items`.
pub fn longest_common_prefix<S: AsRef<str>>(items: &[S]) -> String {
    let Some((first, rest)) = items.split_first() else {
        return String::new();
    };

    let mut prefix = first.as_ref();
    for item in rest {
        let item = item.as_ref();
        let shared = prefix
            .char_indices()
            .zip(item.chars())
            .find(|((_, a), b)| a != b)
            .map(|((i, _), _)| i)
            .unwrap_or_else(|| prefix.len().min(item.len()));
        prefix = &prefix[..shared];
    }
    prefix.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 4] = ["getinfo", "getblockcount", "getblockhash", "stop"];

    fn buffer(text: &str) -> LineBuffer {
        let mut buf = LineBuffer::new();
        buf.insert_str(text);
        buf
    }

    #[test]
    fn unique_match_adds_space() {
        assert_eq!(
            complete(&buffer("st"), NAMES),
            Completion::Unique {
                rest: "op ".to_string()
            }
        );
    }

    #[test]
    fn ambiguous_extends_to_common_prefix() {
        match complete(&buffer("getb"), NAMES) {
            Completion::Ambiguous {
                candidates,
                extension,
            } => {
                assert_eq!(candidates, vec!["getblockcount", "getblockhash"]);
                assert_eq!(extension, "lock");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn ambiguous_without_extension() {
        match complete(&buffer("get"), NAMES) {
            Completion::Ambiguous { extension, .. } => assert_eq!(extension, ""),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn no_match() {
        assert_eq!(complete(&buffer("xyz"), NAMES), Completion::Nothing);
    }

    #[test]
    fn case_sensitive() {
        assert_eq!(complete(&buffer("GETB"), NAMES), Completion::Nothing);
    }

    #[test]
    fn arguments_are_not_completed() {
        assert_eq!(complete(&buffer("getblock st"), NAMES), Completion::Nothing);
        assert_eq!(complete(&buffer(" get"), NAMES), Completion::Nothing);
        assert_eq!(complete(&buffer(""), NAMES), Completion::Nothing);
    }

    #[test]
    fn cursor_must_be_at_end() {
        let mut buf = buffer("getb");
        buf.move_left();
        assert_eq!(complete(&buf, NAMES), Completion::Nothing);
    }

    #[test]
    fn common_prefix_stops_where_a_candidate_ends() {
        assert_eq!(longest_common_prefix(&["getblock", "getblockcount"]), "getblock");
        assert_eq!(longest_common_prefix(&["abc", "abd", "a"]), "a");
        assert_eq!(longest_common_prefix::<&str>(&[]), "");
    }
}
