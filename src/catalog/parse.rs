//! Locale file parsing.
//!
//! A locale file is a single flat JSON object mapping string keys to string
//! values. Parsing yields the value map together with per-key source ranges
//! (for diagnostics) and the earlier occurrences of any duplicated keys.
//! Duplicated keys follow associative-array semantics: the last definition
//! wins in the value map, and every earlier occurrence is recorded so the
//! audit can report it.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use crate::types::TextRange;

/// Errors that may occur while parsing a locale file.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The text is not valid JSON.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The top level is not an object.
    #[error("A locale file must be a single JSON object of string values")]
    NotAnObject,
    /// A value is something other than a string (nested object, array,
    /// number, boolean, or null).
    #[error("Value for key '{key}' is not a string")]
    NonStringValue { key: String },
    /// The JSON grammar could not be loaded into the parser.
    #[error("Failed to set language for parser: {0}")]
    LanguageSetup(#[from] tree_sitter::LanguageError),
    /// tree-sitter gave up on the input.
    #[error("Failed to parse locale file")]
    ParseFailed,
}

/// Result of parsing one locale file.
#[derive(Debug, Clone, Default)]
pub struct ParsedTable {
    /// Key to raw value. Values keep embedded HTML, entities, placeholder
    /// tokens, and literal `\n` sequences exactly as written.
    pub entries: HashMap<String, String>,
    /// Key to source range of the key token.
    pub key_ranges: HashMap<String, TextRange>,
    /// Key to source range of the value token.
    pub value_ranges: HashMap<String, TextRange>,
    /// Earlier occurrences of keys that appear more than once.
    pub duplicate_keys: Vec<(String, TextRange)>,
}

/// Parse the text of one locale file.
///
/// # Errors
/// Returns an error if the text is not valid JSON, is not a flat object, or
/// contains a non-string value.
pub fn parse_locale_text(text: &str) -> Result<ParsedTable, ParseError> {
    let json: Value = serde_json::from_str(text)?;
    let Value::Object(map) = json else {
        return Err(ParseError::NotAnObject);
    };

    let mut entries = HashMap::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::String(s) => {
                entries.insert(key, s);
            }
            _ => return Err(ParseError::NonStringValue { key }),
        }
    }

    let mut parsed = ParsedTable { entries, ..ParsedTable::default() };
    extract_ranges(text, &mut parsed)?;
    Ok(parsed)
}

/// Extract key and value source ranges from the JSON text using tree-sitter.
///
/// Only top-level pairs are visited; nested containers were already rejected
/// by the value check above.
fn extract_ranges(text: &str, parsed: &mut ParsedTable) -> Result<(), ParseError> {
    let mut parser = tree_sitter::Parser::new();
    parser.set_language(&tree_sitter_json::LANGUAGE.into())?;

    let tree = parser.parse(text, None).ok_or(ParseError::ParseFailed)?;
    collect_pairs(tree.root_node(), text.as_bytes(), parsed);
    Ok(())
}

fn collect_pairs(node: tree_sitter::Node<'_>, source: &[u8], parsed: &mut ParsedTable) {
    match node.kind() {
        "document" | "object" => {
            for i in 0..node.child_count() {
                if let Some(child) = node.child(i) {
                    collect_pairs(child, source, parsed);
                }
            }
        }
        "pair" => {
            let Some(key_node) = node.child_by_field_name("key") else {
                return;
            };
            let Some(value_node) = node.child_by_field_name("value") else {
                return;
            };
            let Ok(key_text) = key_node.utf8_text(source) else {
                tracing::warn!("Failed to get key text from node");
                return;
            };
            let key = key_text.trim_matches('"').to_string();

            let key_range = TextRange::from_node(&key_node);
            if let Some(earlier) = parsed.key_ranges.insert(key.clone(), key_range) {
                parsed.duplicate_keys.push((key.clone(), earlier));
            }
            parsed.value_ranges.insert(key, TextRange::from_node(&value_node));
        }
        _ => {}
    }
}
