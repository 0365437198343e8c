//! Data-integrity audit over a catalog.
//!
//! The audit compares every loaded table against the reference locale and
//! reports drift as diagnostics: keys that are missing or surplus, keys
//! defined twice within one file, translations that dropped a placeholder
//! token, and values left identical to the reference. Nothing is ever
//! repaired; wording fixes need native-language knowledge the tooling does
//! not have.

use std::collections::BTreeSet;

use crate::catalog::{
    Catalog,
    LocaleTable,
};
use crate::config::Settings;
use crate::placeholder::placeholder_set;
use crate::types::TextRange;

/// How seriously a finding should be taken by the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// What kind of drift a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A required locale has no table at all.
    MissingLocale,
    /// A key from the reference locale is absent.
    MissingKey,
    /// A key does not exist in the reference locale.
    SurplusKey,
    /// A key is defined more than once within one file.
    DuplicateKey,
    /// A translation dropped or invented a placeholder token.
    PlaceholderMismatch,
    /// A value is byte-identical to the reference locale's.
    Untranslated,
}

/// One audit finding.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub locale: String,
    pub key: Option<String>,
    pub file_path: String,
    pub range: Option<TextRange>,
    pub message: String,
}

/// All findings for one catalog.
#[derive(Debug, Clone, Default)]
pub struct AuditReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl AuditReport {
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error).count()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning).count()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }
}

/// Audit every table in the catalog against the reference locale.
#[must_use]
pub fn audit_catalog(catalog: &Catalog, settings: &Settings) -> AuditReport {
    let mut report = AuditReport::default();

    for table in catalog.tables() {
        check_duplicates(table, &mut report);
    }

    let Some(reference) = catalog.reference_table() else {
        report.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            kind: DiagnosticKind::MissingLocale,
            locale: catalog.reference_locale().to_string(),
            key: None,
            file_path: String::new(),
            range: None,
            message: format!(
                "Reference locale '{}' was not loaded",
                catalog.reference_locale()
            ),
        });
        sort_diagnostics(&mut report);
        return report;
    };

    if let Some(required) = &settings.required_locales {
        for locale in required {
            if catalog.table(locale).is_none() {
                report.diagnostics.push(Diagnostic {
                    severity: Severity::Error,
                    kind: DiagnosticKind::MissingLocale,
                    locale: locale.clone(),
                    key: None,
                    file_path: String::new(),
                    range: None,
                    message: format!("Required locale '{locale}' was not loaded"),
                });
            }
        }
    }

    let reference_keys: BTreeSet<&str> = reference.entries.keys().map(String::as_str).collect();

    for locale in catalog.locales() {
        if locale == catalog.reference_locale() {
            continue;
        }
        let Some(table) = catalog.table(locale) else {
            continue;
        };
        check_against_reference(table, reference, &reference_keys, settings, &mut report);
    }

    sort_diagnostics(&mut report);
    report
}

fn check_duplicates(table: &LocaleTable, report: &mut AuditReport) {
    for (key, range) in &table.duplicate_keys {
        report.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            kind: DiagnosticKind::DuplicateKey,
            locale: table.locale.clone(),
            key: Some(key.clone()),
            file_path: table.file_path.clone(),
            range: Some(*range),
            message: format!("Key '{key}' is defined more than once; the last value wins"),
        });
    }
}

fn check_against_reference(
    table: &LocaleTable,
    reference: &LocaleTable,
    reference_keys: &BTreeSet<&str>,
    settings: &Settings,
    report: &mut AuditReport,
) {
    let missing_severity = if settings.is_required_locale(&table.locale) {
        Severity::Error
    } else {
        Severity::Warning
    };

    for key in reference_keys {
        let Some(value) = table.get(key) else {
            report.diagnostics.push(Diagnostic {
                severity: missing_severity,
                kind: DiagnosticKind::MissingKey,
                locale: table.locale.clone(),
                key: Some((*key).to_string()),
                file_path: table.file_path.clone(),
                range: None,
                message: format!("Key '{key}' is missing from locale '{}'", table.locale),
            });
            continue;
        };

        let reference_value = reference.get(key).unwrap_or_default();
        check_placeholders(table, key, value, reference_value, report);

        if settings.audit.untranslated && value == reference_value && !value.is_empty() {
            report.diagnostics.push(Diagnostic {
                severity: Severity::Warning,
                kind: DiagnosticKind::Untranslated,
                locale: table.locale.clone(),
                key: Some((*key).to_string()),
                file_path: table.file_path.clone(),
                range: table.value_ranges.get(*key).copied(),
                message: format!(
                    "Value for '{key}' is identical to '{}' (left untranslated?)",
                    reference.locale
                ),
            });
        }
    }

    if settings.audit.surplus_keys {
        let mut surplus: Vec<&str> = table
            .entries
            .keys()
            .map(String::as_str)
            .filter(|key| !reference_keys.contains(key))
            .collect();
        surplus.sort_unstable();
        for key in surplus {
            report.diagnostics.push(Diagnostic {
                severity: Severity::Warning,
                kind: DiagnosticKind::SurplusKey,
                locale: table.locale.clone(),
                key: Some(key.to_string()),
                file_path: table.file_path.clone(),
                range: table.key_ranges.get(key).copied(),
                message: format!(
                    "Key '{key}' does not exist in reference locale '{}'",
                    reference.locale
                ),
            });
        }
    }
}

fn check_placeholders(
    table: &LocaleTable,
    key: &str,
    value: &str,
    reference_value: &str,
    report: &mut AuditReport,
) {
    let reference_tokens = placeholder_set(reference_value);
    let tokens = placeholder_set(value);

    let dropped: Vec<&str> =
        reference_tokens.difference(&tokens).map(String::as_str).collect();
    if !dropped.is_empty() {
        report.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            kind: DiagnosticKind::PlaceholderMismatch,
            locale: table.locale.clone(),
            key: Some(key.to_string()),
            file_path: table.file_path.clone(),
            range: table.value_ranges.get(key).copied(),
            message: format!(
                "Value for '{key}' dropped placeholder(s) {} present in the reference",
                dropped.join(", ")
            ),
        });
    }

    let invented: Vec<&str> =
        tokens.difference(&reference_tokens).map(String::as_str).collect();
    if !invented.is_empty() {
        report.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            kind: DiagnosticKind::PlaceholderMismatch,
            locale: table.locale.clone(),
            key: Some(key.to_string()),
            file_path: table.file_path.clone(),
            range: table.value_ranges.get(key).copied(),
            message: format!(
                "Value for '{key}' has placeholder(s) {} not present in the reference",
                invented.join(", ")
            ),
        });
    }
}

/// Stable output order: errors first, then by locale and key.
fn sort_diagnostics(report: &mut AuditReport) {
    report.diagnostics.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.locale.cmp(&b.locale))
            .then_with(|| a.key.cmp(&b.key))
    });
}
