//! Key resolution with reference-locale fallback.

use std::borrow::Cow;

use thiserror::Error;

use crate::catalog::Catalog;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// The requested locale has no table. This points at a deployment or
    /// packaging defect, so callers should treat it as fatal at startup
    /// rather than recover per lookup.
    #[error("Unknown locale '{0}': no such locale table is loaded")]
    UnknownLocale(String),

    /// The catalog was built without its own reference locale.
    #[error("Reference locale '{0}' is not among the loaded locale tables")]
    MissingReference(String),
}

/// Read-only lookup over an immutable catalog.
///
/// Lookup order for `resolve`: the requested locale's table, then the
/// reference locale's table, then a visibly distinct marker. The returned
/// string is the raw templated value; substituting placeholder tokens like
/// `$1` or `#ts` is the consuming template engine's job.
#[derive(Debug, Clone)]
pub struct Resolver {
    catalog: Catalog,
}

impl Resolver {
    /// Wrap a loaded catalog.
    ///
    /// # Errors
    /// Returns an error if the catalog lacks its reference locale, so a
    /// broken deployment fails at startup instead of at first lookup.
    pub fn new(catalog: Catalog) -> Result<Self, ResolverError> {
        if catalog.reference_table().is_none() {
            return Err(ResolverError::MissingReference(catalog.reference_locale().to_string()));
        }
        Ok(Self { catalog })
    }

    /// Resolve `key` in `locale`.
    ///
    /// # Errors
    /// Returns an error only for an unknown locale; a missing key never
    /// fails, it falls back and finally yields `[missing: <key>]`.
    pub fn resolve(&self, locale: &str, key: &str) -> Result<Cow<'_, str>, ResolverError> {
        let table = self
            .catalog
            .table(locale)
            .ok_or_else(|| ResolverError::UnknownLocale(locale.to_string()))?;

        if let Some(value) = table.get(key) {
            return Ok(Cow::Borrowed(value));
        }

        if let Some(value) = self.catalog.reference_table().and_then(|t| t.get(key)) {
            tracing::debug!(locale, key, "Falling back to the reference locale");
            return Ok(Cow::Borrowed(value));
        }

        tracing::warn!(locale, key, "Key not found in any locale table");
        Ok(Cow::Owned(missing_marker(key)))
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

/// The stand-in returned when a key exists nowhere.
///
/// Deliberately distinct from both a translation and the bare key, so a
/// rendered page shows the gap instead of hiding it.
#[must_use]
pub fn missing_marker(key: &str) -> String {
    format!("[missing: {key}]")
}
