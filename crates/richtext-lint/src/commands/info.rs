//! Info command implementation

use clap::Args;
use owo_colors::OwoColorize;
use richtext_lint_core::analysis::HintThresholds;
use richtext_lint_core::config::{Config, ConfigSources};
use richtext_lint_core::links::DEFAULT_URL_TEXT_PATTERN;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

/// Effective settings after defaults are applied.
#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    site_domain: Option<String>,
    url_text_pattern: String,
    title_locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    entities: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
    long_sentence_chars: usize,
    long_paragraph_chars: usize,
    heading_min_words: usize,
    words_per_heading: usize,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        let defaults = HintThresholds::default();
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            site_domain: config.site_domain.clone(),
            url_text_pattern: config
                .url_text_pattern
                .clone()
                .unwrap_or_else(|| DEFAULT_URL_TEXT_PATTERN.to_string()),
            title_locale: config.title_locale().to_string(),
            entities: config.entities.as_ref().map(|p| p.to_string()),
            max_input_bytes: config.input_limit(),
            long_sentence_chars: config
                .long_sentence_chars
                .unwrap_or(defaults.long_sentence_chars),
            long_paragraph_chars: config
                .long_paragraph_chars
                .unwrap_or(defaults.long_paragraph_chars),
            heading_min_words: config
                .heading_min_words
                .unwrap_or(defaults.heading_min_words),
            words_per_heading: config
                .words_per_heading
                .unwrap_or(defaults.words_per_heading),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information and the effective configuration.
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{} {}", info.package.name.bold(), info.package.version.green());
    if !info.package.description.is_empty() {
        println!("{}", info.package.description);
    }
    if !info.package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), info.package.license);
    }
    if !info.package.repository.is_empty() {
        println!("{}: {}", "Repository".dimmed(), info.package.repository.cyan());
    }

    let cfg = &info.config;
    println!();
    println!("{}", "Configuration".bold().underline());
    match cfg.config_file {
        Some(ref path) => println!("{}: {}", "Config file".dimmed(), path.cyan()),
        None => println!("{}: {}", "Config file".dimmed(), "none loaded".yellow()),
    }
    println!("{}: {}", "Log level".dimmed(), cfg.log_level);
    if let Some(ref dir) = cfg.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }

    println!();
    println!("{}", "Checks".bold().underline());
    print_opt("Site domain", cfg.site_domain.as_ref());
    println!("{}: {}", "URL text pattern".dimmed(), cfg.url_text_pattern);
    println!("{}: {}", "Title locale".dimmed(), cfg.title_locale);
    print_opt("Entity fixture", cfg.entities.as_ref());
    print_opt("Input limit (bytes)", cfg.max_input_bytes.as_ref());
    println!(
        "{}: {} / {} chars",
        "Long sentence / paragraph".dimmed(),
        cfg.long_sentence_chars,
        cfg.long_paragraph_chars
    );
    println!(
        "{}: one per {} words above {}",
        "Headings".dimmed(),
        cfg.words_per_heading,
        cfg.heading_min_words
    );

    Ok(())
}

/// Print an optional value or "(not set)".
fn print_opt<T: std::fmt::Display>(label: &str, value: Option<&T>) {
    match value {
        Some(v) => println!("{}: {}", label.dimmed(), v),
        None => println!("{}: {}", label.dimmed(), "(not set)".dimmed()),
    }
}
