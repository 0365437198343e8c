use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "localeFiles.filePattern")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings for locale discovery and auditing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub locale_files: LocaleFilesConfig,

    /// The locale every other table is compared against, and the fallback
    /// for lookups. Conventionally "english".
    pub reference_locale: String,

    /// Locales whose missing keys fail the check.
    ///
    /// - `None`: all discovered locales are required (default)
    /// - `Some([...])`: only the listed locales are required
    ///
    /// Mutually exclusive with `optional_locales`.
    pub required_locales: Option<Vec<String>>,

    /// Locales whose missing keys are reported as warnings only.
    ///
    /// Mutually exclusive with `required_locales`.
    pub optional_locales: Option<Vec<String>>,

    pub audit: AuditConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleFilesConfig {
    /// Glob the locale files are selected by, relative to the locale root.
    pub file_pattern: String,

    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditConfig {
    /// Report values left byte-identical to the reference locale.
    pub untranslated: bool,

    /// Report keys that are absent from the reference locale.
    pub surplus_keys: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { untranslated: true, surplus_keys: true }
    }
}

impl Default for LocaleFilesConfig {
    fn default() -> Self {
        Self { file_pattern: "ai-*.json".to_string(), exclude_patterns: vec![] }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale_files: LocaleFilesConfig::default(),
            reference_locale: "english".to_string(),
            required_locales: None,
            optional_locales: None,
            audit: AuditConfig::default(),
        }
    }
}

impl Settings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Both required and optional locale lists are set
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.reference_locale.is_empty() {
            errors.push(ValidationError::new(
                "referenceLocale",
                "The reference locale cannot be empty. Example: \"english\"",
            ));
        }

        if self.locale_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "localeFiles.filePattern",
                "The pattern cannot be empty. Example: \"ai-*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.locale_files.file_pattern) {
            errors.push(ValidationError::new(
                "localeFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.locale_files.file_pattern),
            ));
        }

        for (index, pattern) in self.locale_files.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("localeFiles.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.required_locales.is_some() && self.optional_locales.is_some() {
            errors.push(ValidationError::new(
                "requiredLocales/optionalLocales",
                "Cannot specify both 'requiredLocales' and 'optionalLocales'. Please use only one",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Whether missing keys in `locale` fail the check.
    ///
    /// The reference locale is always required. With neither list set,
    /// every locale is required.
    #[must_use]
    pub fn is_required_locale(&self, locale: &str) -> bool {
        if locale == self.reference_locale {
            return true;
        }
        if let Some(required) = &self.required_locales {
            return required.iter().any(|l| l == locale);
        }
        if let Some(optional) = &self.optional_locales {
            return !optional.iter().any(|l| l == locale);
        }
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = Settings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"referenceLocale": "deutsch"}"#;

        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_that!(settings.reference_locale, eq("deutsch"));
        assert_that!(settings.locale_files.file_pattern, eq("ai-*.json"));
        assert_that!(settings.audit.untranslated, eq(true));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_that!(settings.reference_locale, eq("english"));
        assert_that!(settings.locale_files.file_pattern, eq("ai-*.json"));
        assert_that!(settings.locale_files.exclude_patterns, is_empty());
        assert_that!(settings.required_locales, none());
    }

    #[rstest]
    fn validate_invalid_reference_locale_empty() {
        let settings = Settings { reference_locale: String::new(), ..Settings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("referenceLocale")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_file_pattern_empty() {
        let settings = Settings {
            locale_files: LocaleFilesConfig { file_pattern: String::new(), exclude_patterns: vec![] },
            ..Settings::default()
        };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("localeFiles.filePattern")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_file_pattern_invalid_glob() {
        let settings = Settings {
            locale_files: LocaleFilesConfig {
                file_pattern: "ai-{*.json".to_string(),
                exclude_patterns: vec![],
            },
            ..Settings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("localeFiles.filePattern")),
                field!(ValidationError.message, contains_substring("Invalid glob pattern"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_exclude_pattern_invalid_glob() {
        let settings = Settings {
            locale_files: LocaleFilesConfig {
                file_pattern: "ai-*.json".to_string(),
                exclude_patterns: vec!["drafts/**".to_string(), "invalid[pattern".to_string()],
            },
            ..Settings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("localeFiles.excludePatterns[1]")),
                field!(ValidationError.message, contains_substring("Invalid glob pattern")),
                field!(ValidationError.message, contains_substring("invalid[pattern"))
            ]])
        );
    }

    #[rstest]
    fn validate_required_and_optional_are_exclusive() {
        let settings = Settings {
            required_locales: Some(vec!["czech".to_string()]),
            optional_locales: Some(vec!["greek".to_string()]),
            ..Settings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![field!(
                ValidationError.field_path,
                eq("requiredLocales/optionalLocales")
            )])
        );
    }

    #[rstest]
    #[case::default_all_required(None, None, "czech", true)]
    #[case::required_listed(Some(vec!["czech"]), None, "czech", true)]
    #[case::required_not_listed(Some(vec!["czech"]), None, "greek", false)]
    #[case::optional_listed(None, Some(vec!["greek"]), "greek", false)]
    #[case::optional_not_listed(None, Some(vec!["greek"]), "czech", true)]
    fn is_required_locale_cases(
        #[case] required: Option<Vec<&str>>,
        #[case] optional: Option<Vec<&str>>,
        #[case] locale: &str,
        #[case] expected: bool,
    ) {
        let to_owned = |v: Vec<&str>| v.into_iter().map(String::from).collect::<Vec<_>>();
        let settings = Settings {
            required_locales: required.map(to_owned),
            optional_locales: optional.map(to_owned),
            ..Settings::default()
        };

        assert_eq!(settings.is_required_locale(locale), expected);
    }

    #[rstest]
    fn reference_locale_is_always_required() {
        let settings = Settings {
            optional_locales: Some(vec!["english".to_string()]),
            ..Settings::default()
        };

        assert!(settings.is_required_locale("english"));
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = Settings {
            reference_locale: String::new(),
            locale_files: LocaleFilesConfig { file_pattern: String::new(), exclude_patterns: vec![] },
            ..Settings::default()
        };

        let validation_result = settings.validate();
        let errors = validation_result.unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. referenceLocale"));
        assert_that!(error_message, contains_substring("2. localeFiles.filePattern"));
    }
}
