//! Locale file discovery and catalog loading.
//!
//! Walks a locale root directory, selects the files matching the configured
//! pattern, and loads them concurrently into a [`Catalog`]. Loading is the
//! only time the tables are touched; afterwards the catalog is immutable
//! and safe to share across request threads.

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;
use thiserror::Error;

use crate::catalog::{
    Catalog,
    LocaleTable,
    ParseError,
};
use crate::config::{
    LocaleFileMatcher,
    MatcherError,
    Settings,
    locale_id_from_path,
};

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error(transparent)]
    Matcher(#[from] MatcherError),

    /// A matched file is not a valid locale table. Treated as a packaging
    /// defect rather than skipped, so a broken deployment fails loudly.
    #[error("Failed to parse locale file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },

    #[error("Locale '{locale}' is defined by both '{first}' and '{second}'")]
    DuplicateLocale { locale: String, first: String, second: String },

    #[error("No locale files matched '{pattern}' under '{root}'")]
    NoLocaleFiles { pattern: String, root: String },
}

/// Discover and load every locale table under `locale_root`.
///
/// Unreadable files are logged and skipped; malformed files abort the load.
///
/// # Errors
/// Returns an error if the configured patterns are invalid, no file
/// matches, a file fails to parse, or two files map to the same locale.
pub async fn load_catalog(locale_root: &Path, settings: &Settings) -> Result<Catalog, DiscoveryError> {
    tracing::debug!(locale_root = %locale_root.display(), "Loading locale tables");

    let matcher = LocaleFileMatcher::new(locale_root.to_path_buf(), settings)?;
    let files = find_locale_files(locale_root, &matcher);

    if files.is_empty() {
        return Err(DiscoveryError::NoLocaleFiles {
            pattern: settings.locale_files.file_pattern.clone(),
            root: locale_root.display().to_string(),
        });
    }

    let futures: Vec<_> = files.iter().map(|file| load_table(file)).collect();
    let results = futures::future::join_all(futures).await;

    let mut catalog = Catalog::new(settings.reference_locale.clone());
    for result in results {
        let Some(table) = result? else {
            continue;
        };
        if let Some(existing) = catalog.table(&table.locale) {
            return Err(DiscoveryError::DuplicateLocale {
                locale: table.locale.clone(),
                first: existing.file_path.clone(),
                second: table.file_path,
            });
        }
        tracing::debug!(locale = %table.locale, keys = table.len(), "Loaded locale table");
        catalog.insert(table);
    }

    Ok(catalog)
}

/// Load a single locale file.
///
/// Returns `Ok(None)` when the file cannot be read or no locale identifier
/// can be derived from its name; both are logged and the rest of the load
/// continues.
async fn load_table(file_path: &PathBuf) -> Result<Option<LocaleTable>, DiscoveryError> {
    let content = match tokio::fs::read_to_string(file_path).await {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed to read locale file {:?}: {}", file_path, e);
            return Ok(None);
        }
    };

    let Some(locale) = locale_id_from_path(file_path) else {
        tracing::warn!("Failed to derive a locale identifier for {:?}", file_path);
        return Ok(None);
    };

    let table =
        LocaleTable::from_text(locale, file_path.display().to_string(), &content).map_err(|e| {
            DiscoveryError::Parse { path: file_path.display().to_string(), source: e }
        })?;

    Ok(Some(table))
}

/// Locale files matching the configured pattern, in sorted order.
fn find_locale_files(locale_root: &Path, matcher: &LocaleFileMatcher) -> Vec<PathBuf> {
    let mut found_files = Vec::new();

    for result in WalkBuilder::new(locale_root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();

        let Ok(relative_path) = path.strip_prefix(locale_root) else {
            continue;
        };
        if !matcher.is_locale_file_relative(relative_path) {
            continue;
        }

        found_files.push(path.to_path_buf());
    }

    // Deterministic load order keeps duplicate-locale errors stable.
    found_files.sort_unstable();
    found_files
}
