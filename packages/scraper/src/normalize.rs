//! Free-text cleanup for scraped fields.

use std::sync::LazyLock;

use regex::Regex;

/// A parenthesised run, matched non-greedily up to the first `)`.
static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").unwrap_or_else(|_| unreachable!()));

/// Removes every parenthetical annotation such as `(feat. X)` or
/// `(Inst.)` from `text`.
///
/// Nothing else is touched: surrounding whitespace is kept, so
/// `"Artist (feat. X)"` becomes `"Artist "`.
#[must_use]
pub fn normalize(text: &str) -> String {
    PARENTHETICAL.replace_all(text, "").into_owned()
}
