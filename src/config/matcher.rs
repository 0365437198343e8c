//! File pattern matcher for locale files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::Settings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid locale file pattern '{pattern}': {source}")]
    InvalidFilePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches locale files against the configured glob patterns.
#[derive(Debug, Clone)]
pub struct LocaleFileMatcher {
    locale_root: PathBuf,
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl LocaleFileMatcher {
    /// Creates a new matcher from settings.
    ///
    /// # Errors
    /// Returns an error if a configured glob pattern is invalid.
    pub fn new(locale_root: PathBuf, settings: &Settings) -> Result<Self, MatcherError> {
        let include_set = Self::build_glob_set(
            std::slice::from_ref(&settings.locale_files.file_pattern),
            |pattern, source| MatcherError::InvalidFilePattern { pattern, source },
        )?;

        let exclude_set =
            Self::build_glob_set(&settings.locale_files.exclude_patterns, |pattern, source| {
                MatcherError::InvalidExcludePattern { pattern, source }
            })?;

        Ok(Self { locale_root, include_set, exclude_set })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn locale_root(&self) -> &Path {
        &self.locale_root
    }

    /// Returns true if the path matches the file pattern but not an exclude
    /// pattern.
    ///
    /// The path must be absolute and under the locale root.
    #[must_use]
    pub fn is_locale_file(&self, absolute_path: &Path) -> bool {
        let Ok(relative_path) = absolute_path.strip_prefix(&self.locale_root) else {
            return false;
        };

        self.is_locale_file_relative(relative_path)
    }

    /// Returns true if the path matches the file pattern but not an exclude
    /// pattern.
    ///
    /// The path must be relative to the locale root.
    #[must_use]
    pub fn is_locale_file_relative(&self, relative_path: &Path) -> bool {
        self.include_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}

/// Locale identifier from a file name, per the `ai-<locale>` convention.
///
/// The identifier is the file stem with the `ai-` prefix stripped; a stem
/// without the prefix is used whole. Identifiers are lowercased so the
/// language selector value matches regardless of file-name casing.
///
/// # Examples
/// - `ai-czech.json` → `czech`
/// - `ai-DEUTSCH.json` → `deutsch`
/// - `suomi.json` → `suomi`
#[must_use]
pub fn locale_id_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy();
    let id = stem.strip_prefix("ai-").unwrap_or(&stem);
    if id.is_empty() {
        return None;
    }
    Some(id.to_ascii_lowercase())
}
