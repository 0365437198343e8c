//! Configuration for locale discovery and auditing.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Locale file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use manager::ConfigManager;
pub use matcher::{
    LocaleFileMatcher,
    MatcherError,
    locale_id_from_path,
};
pub use types::{
    AuditConfig,
    ConfigError,
    LocaleFilesConfig,
    Settings,
    ValidationError,
};
