//! Entry point for the locale table command line tooling.

// The CLI is the one place that writes reports to stdout.
#![allow(clippy::print_stdout)]

use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use anyhow::Context;
use clap::{
    Parser,
    Subcommand,
};
use colored::Colorize;
use webcal_admin_i18n::Resolver;
use webcal_admin_i18n::audit::{
    AuditReport,
    Diagnostic,
    Severity,
    audit_catalog,
};
use webcal_admin_i18n::catalog::Catalog;
use webcal_admin_i18n::config::{
    ConfigManager,
    Settings,
};
use webcal_admin_i18n::discovery::load_catalog;

#[derive(Parser)]
#[command(name = "webcal-admin-i18n")]
#[command(version)]
#[command(about = "Locale string table tooling for the WebCal admin interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit the locale tables for data-integrity problems
    Check {
        /// Directory containing the locale files
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Treat warnings as failures
        #[arg(short, long)]
        strict: bool,
    },

    /// Resolve one key through the fallback chain
    Resolve {
        /// Directory containing the locale files
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Locale to resolve in
        #[arg(value_name = "LOCALE")]
        locale: String,

        /// Key to look up
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// List discovered locales and their key counts
    List {
        /// Directory containing the locale files
        #[arg(value_name = "ROOT")]
        root: PathBuf,
    },

    /// Write one table back out as canonical JSON (sorted keys)
    Export {
        /// Directory containing the locale files
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Locale to export
        #[arg(value_name = "LOCALE")]
        locale: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { root, strict } => check(&root, strict).await,
        Commands::Resolve { root, locale, key } => resolve(&root, &locale, &key).await,
        Commands::List { root } => list(&root).await,
        Commands::Export { root, locale, output } => {
            export(&root, &locale, output.as_deref()).await
        }
    }
}

/// Load settings from the root (`.webcal-i18n.json` if present), then the
/// catalog. Configuration problems are fatal here, before any lookup runs.
async fn load(root: &Path) -> anyhow::Result<(Settings, Catalog)> {
    let mut config_manager = ConfigManager::new();
    config_manager
        .load_settings(Some(root.to_path_buf()))
        .context("Failed to load configuration")?;
    let settings = config_manager.get_settings().clone();

    let catalog =
        load_catalog(root, &settings).await.context("Failed to load locale tables")?;

    Ok((settings, catalog))
}

async fn check(root: &Path, strict: bool) -> anyhow::Result<ExitCode> {
    let (settings, catalog) = load(root).await?;
    let report = audit_catalog(&catalog, &settings);

    for diagnostic in &report.diagnostics {
        println!("{}", render_diagnostic(diagnostic));
    }
    println!("{}", render_summary(&report, catalog.len()));

    let failed = report.has_errors() || (strict && report.warning_count() > 0);
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

async fn resolve(root: &Path, locale: &str, key: &str) -> anyhow::Result<ExitCode> {
    let (_, catalog) = load(root).await?;
    let resolver = Resolver::new(catalog)?;

    let value = resolver.resolve(locale, key)?;
    println!("{value}");

    Ok(ExitCode::SUCCESS)
}

async fn list(root: &Path) -> anyhow::Result<ExitCode> {
    let (_, catalog) = load(root).await?;

    for locale in catalog.locales() {
        let Some(table) = catalog.table(locale) else {
            continue;
        };
        let marker =
            if locale == catalog.reference_locale() { " (reference)" } else { "" };
        println!("{locale}{marker}: {} keys, {}", table.len(), table.file_path);
    }

    Ok(ExitCode::SUCCESS)
}

async fn export(root: &Path, locale: &str, output: Option<&Path>) -> anyhow::Result<ExitCode> {
    let (_, catalog) = load(root).await?;

    let table = catalog
        .table(locale)
        .with_context(|| format!("Unknown locale '{locale}'"))?;
    let json = table.to_canonical_json().context("Failed to serialize locale table")?;

    match output {
        Some(path) => tokio::fs::write(path, json.as_bytes())
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(ExitCode::SUCCESS)
}

fn render_diagnostic(diagnostic: &Diagnostic) -> String {
    let severity = match diagnostic.severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow().bold(),
    };

    let location = match (&diagnostic.file_path, diagnostic.range) {
        (path, Some(range)) if !path.is_empty() => format!("{path}:{}: ", range.start),
        (path, None) if !path.is_empty() => format!("{path}: "),
        _ => String::new(),
    };

    format!("{location}{severity}: {}", diagnostic.message)
}

fn render_summary(report: &AuditReport, locale_count: usize) -> String {
    let verdict = if report.has_errors() {
        "check failed".red().bold().to_string()
    } else {
        "check passed".green().bold().to_string()
    };
    format!(
        "{verdict}: {} locales, {} error(s), {} warning(s)",
        locale_count,
        report.error_count(),
        report.warning_count()
    )
}
