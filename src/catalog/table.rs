//! Locale table and catalog model.
//!
//! A [`LocaleTable`] is one parsed locale file; a [`Catalog`] holds every
//! loaded table plus the designated reference locale. Both are immutable
//! once loading finishes, so sharing them across request threads needs no
//! synchronization.

use std::collections::{
    BTreeMap,
    HashMap,
};

use crate::catalog::parse::{
    ParseError,
    parse_locale_text,
};
use crate::types::TextRange;

/// One parsed locale file.
#[derive(Debug, Clone)]
pub struct LocaleTable {
    /// Locale identifier derived from the file name (e.g. "czech").
    pub locale: String,

    /// Path the table was loaded from, for diagnostics.
    pub file_path: String,

    /// Flat key to raw-value map.
    pub entries: HashMap<String, String>,

    /// Key to source range of the key token.
    pub key_ranges: HashMap<String, TextRange>,

    /// Key to source range of the value token.
    pub value_ranges: HashMap<String, TextRange>,

    /// Earlier occurrences of keys defined more than once.
    pub duplicate_keys: Vec<(String, TextRange)>,
}

impl LocaleTable {
    /// Parse locale file text into a table.
    ///
    /// # Errors
    /// Returns an error if the text is not a flat JSON object of strings.
    pub fn from_text(
        locale: impl Into<String>,
        file_path: impl Into<String>,
        text: &str,
    ) -> Result<Self, ParseError> {
        let parsed = parse_locale_text(text)?;
        Ok(Self {
            locale: locale.into(),
            file_path: file_path.into(),
            entries: parsed.entries,
            key_ranges: parsed.key_ranges,
            value_ranges: parsed.value_ranges,
            duplicate_keys: parsed.duplicate_keys,
        })
    }

    /// The raw value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the table back to JSON with keys in sorted order.
    ///
    /// Reparsing the output yields a map identical to [`Self::entries`];
    /// values round-trip byte-for-byte, including embedded markup and
    /// literal `\n` sequences.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_canonical_json(&self) -> Result<String, serde_json::Error> {
        let sorted: BTreeMap<&str, &str> =
            self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        serde_json::to_string_pretty(&sorted)
    }
}

/// All loaded locale tables plus the designated reference locale.
#[derive(Debug, Clone)]
pub struct Catalog {
    reference_locale: String,
    tables: HashMap<String, LocaleTable>,
}

impl Catalog {
    /// Create an empty catalog with the given reference locale.
    #[must_use]
    pub fn new(reference_locale: impl Into<String>) -> Self {
        Self { reference_locale: reference_locale.into(), tables: HashMap::new() }
    }

    /// Add a table, replacing any table already registered for its locale.
    pub fn insert(&mut self, table: LocaleTable) {
        self.tables.insert(table.locale.clone(), table);
    }

    /// The table for `locale`, if loaded.
    #[must_use]
    pub fn table(&self, locale: &str) -> Option<&LocaleTable> {
        self.tables.get(locale)
    }

    /// The reference locale's table, if loaded.
    #[must_use]
    pub fn reference_table(&self) -> Option<&LocaleTable> {
        self.tables.get(&self.reference_locale)
    }

    #[must_use]
    pub fn reference_locale(&self) -> &str {
        &self.reference_locale
    }

    /// Loaded locale identifiers in sorted order.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// All loaded tables, in unspecified order.
    pub fn tables(&self) -> impl Iterator<Item = &LocaleTable> {
        self.tables.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    fn table(locale: &str, pairs: &[(&str, &str)]) -> LocaleTable {
        LocaleTable {
            locale: locale.to_string(),
            file_path: format!("ai-{locale}.json"),
            entries: pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect(),
            key_ranges: HashMap::new(),
            value_ranges: HashMap::new(),
            duplicate_keys: Vec::new(),
        }
    }

    #[googletest::test]
    fn test_catalog_lookup() {
        let mut catalog = Catalog::new("english");
        catalog.insert(table("english", &[("cat_list", "Category List")]));
        catalog.insert(table("czech", &[("cat_list", "Seznam kategorií")]));

        expect_that!(catalog.len(), eq(2));
        expect_that!(catalog.locales(), elements_are![eq("czech"), eq("english")]);
        expect_that!(catalog.table("czech").unwrap().get("cat_list"), some(eq("Seznam kategorií")));
        expect_that!(catalog.table("polish"), none());
        expect_that!(
            catalog.reference_table().unwrap().get("cat_list"),
            some(eq("Category List"))
        );
    }

    #[googletest::test]
    fn test_canonical_json_round_trip() {
        let text = r#"{
  "usr_name": "Login name",
  "cat_list": "Category List",
  "edi_confirm_changes": "Save changes?\\nUnsaved values will be lost."
}"#;
        let parsed = LocaleTable::from_text("english", "ai-english.json", text).unwrap();

        let exported = parsed.to_canonical_json().unwrap();
        let reparsed = LocaleTable::from_text("english", "export.json", &exported).unwrap();

        assert_eq!(reparsed.entries, parsed.entries);
        // Sorted output: cat_list before usr_name.
        let cat = exported.find("cat_list").unwrap();
        let usr = exported.find("usr_name").unwrap();
        expect_that!(cat < usr, eq(true));
    }
}
