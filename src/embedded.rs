//! Embedded locale data.
//!
//! The shipped tables under `locales/` compiled into the binary, so the
//! admin application can build its catalog once at startup with no file
//! I/O. To add a language, add the JSON file there and list it here.

use crate::catalog::{
    Catalog,
    LocaleTable,
    ParseError,
};

/// The locale used as reference and fallback.
pub const REFERENCE_LOCALE: &str = "english";

/// (locale, JSON text) pairs for every shipped table.
pub const EMBEDDED_LOCALES: &[(&str, &str)] = &[
    ("english", include_str!("../locales/ai-english.json")),
    ("czech", include_str!("../locales/ai-czech.json")),
    ("deutsch", include_str!("../locales/ai-deutsch.json")),
    ("francais", include_str!("../locales/ai-francais.json")),
    ("greek", include_str!("../locales/ai-greek.json")),
    ("russian", include_str!("../locales/ai-russian.json")),
    ("suomi", include_str!("../locales/ai-suomi.json")),
];

/// Parse the embedded tables into a catalog.
///
/// # Errors
/// Returns an error if an embedded table is malformed, which means the
/// crate itself shipped broken data.
pub fn embedded_catalog() -> Result<Catalog, ParseError> {
    let mut catalog = Catalog::new(REFERENCE_LOCALE);
    for (locale, text) in EMBEDDED_LOCALES {
        let table = LocaleTable::from_text(*locale, format!("locales/ai-{locale}.json"), text)?;
        catalog.insert(table);
    }
    Ok(catalog)
}
