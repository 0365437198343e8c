//! Placeholder token scanning.
//!
//! Locale values embed two token shapes that the consuming template engine
//! substitutes at render time: `$` followed by digits (`$1`) and `#`
//! followed by one or two lowercase letters (`#c`, `#e`, `#ts`, `#lv`).
//! This module only extracts tokens; substitution is explicitly not the
//! string table's job.

use std::collections::BTreeSet;

/// Extract the set of placeholder tokens in a value.
///
/// A `#` token must not be followed by a further alphanumeric character,
/// which keeps HTML color literals such as `#eeeeff` from being read as
/// tokens.
#[must_use]
pub fn placeholder_set(value: &str) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '$' => {
                let mut digits = String::new();
                while let Some(d) = chars.peek().copied() {
                    if d.is_ascii_digit() {
                        digits.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if !digits.is_empty() {
                    tokens.insert(format!("${digits}"));
                }
            }
            '#' => {
                let mut letters = String::new();
                while letters.len() < 2 {
                    match chars.peek().copied() {
                        Some(l) if l.is_ascii_lowercase() => {
                            letters.push(l);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                let at_boundary =
                    !chars.peek().copied().is_some_and(|next| next.is_ascii_alphanumeric());
                if !letters.is_empty() && at_boundary {
                    tokens.insert(format!("#{letters}"));
                }
            }
            _ => {}
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn set(tokens: &[&str]) -> BTreeSet<String> {
        tokens.iter().map(|t| (*t).to_string()).collect()
    }

    #[rstest]
    #[case::plain("Category List", &[])]
    #[case::positional("Really delete user $1?", &["$1"])]
    #[case::multiple_positional("Move $1 into $2", &["$1", "$2"])]
    #[case::count("Imported #c entries", &["#c"])]
    #[case::timestamp("Last run: #ts", &["#ts"])]
    #[case::level("Minimum reminder level #lv", &["#lv"])]
    #[case::mixed("Category $1 is used by #c event(s)", &["$1", "#c"])]
    #[case::end_of_string("Exit status #e", &["#e"])]
    #[case::punctuation_boundary("Remove #c event(s)?", &["#c"])]
    #[case::bare_dollar("Costs $ nothing", &[])]
    #[case::bare_hash("Issue # 5", &[])]
    #[case::color_literal("Use <b>#eeeeff</b> or white", &[])]
    #[case::hex_color_long("background: #ff0000;", &[])]
    #[case::uppercase_not_token("See #TS", &[])]
    #[case::literal_newline_untouched("Save?\\nLost otherwise. #c", &["#c"])]
    fn test_placeholder_set(#[case] value: &str, #[case] expected: &[&str]) {
        assert_eq!(placeholder_set(value), set(expected));
    }

    #[rstest]
    fn test_repeated_token_collapses() {
        let tokens = placeholder_set("$1 and $1 again");
        assert_eq!(tokens, set(&["$1"]));
    }
}
