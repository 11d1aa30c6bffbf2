//! Check command: analyze one rich-text document.

use std::sync::Arc;

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use richtext_lint_core::analysis::{AnalysisSettings, DocumentReport, Hint, analyze_document};
use richtext_lint_core::config::Config;
use richtext_lint_core::document::Node;
use richtext_lint_core::lookup::StaticLookup;
use richtext_lint_core::reconcile::LinkReconciler;

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Rich-text document (JSON) to check.
    pub file: Utf8PathBuf,

    /// Entity fixture used to check entry and asset publication.
    #[arg(long, value_name = "FILE")]
    pub entities: Option<Utf8PathBuf>,

    /// Origin of the published site; links into it should be entry links.
    #[arg(long, value_name = "URL")]
    pub site_domain: Option<String>,

    /// Regex matching link text that is a bare URL.
    #[arg(long, value_name = "REGEX")]
    pub url_pattern: Option<String>,

    /// Exit with an error when any warning remains.
    #[arg(long)]
    pub deny_warnings: bool,
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    file: &'a str,
    #[serde(flatten)]
    report: &'a DocumentReport,
    /// Entry and asset links left unchecked for lack of an entity fixture.
    unchecked_links: usize,
}

/// Check a document file.
#[instrument(name = "cmd_check", skip_all, fields(file = %args.file))]
pub fn cmd_check(
    args: CheckArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, entities = ?args.entities, "executing check command");

    let content = super::read_input_file(&args.file, max_input)?;
    let document =
        Node::from_json(&content).with_context(|| format!("failed to parse {}", args.file))?;

    let mut effective = config.clone();
    if args.site_domain.is_some() {
        effective.site_domain = args.site_domain;
    }
    if args.url_pattern.is_some() {
        effective.url_text_pattern = args.url_pattern;
    }
    let settings = AnalysisSettings::from_config(&effective)?;

    let mut report = analyze_document(&document, &settings);
    let entities = args.entities.as_deref().or(effective.entities.as_deref());
    let unchecked_links = reconcile_links(&mut report, entities, effective.title_locale())?;

    if global_json {
        let output = CheckOutput {
            file: args.file.as_str(),
            report: &report,
            unchecked_links,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report(&args.file, &report, unchecked_links);
    }

    if args.deny_warnings && report.has_warnings() {
        let count =
            report.wrong_headings.len() + report.line_breaks.len() + report.link_warnings.len();
        bail!("{}: {count} warning(s) found", args.file);
    }

    Ok(())
}

/// Replace the raw link warnings with what an author should see.
///
/// Without a fixture, entry and asset checks cannot run and are dropped;
/// the return value counts them.
fn reconcile_links(
    report: &mut DocumentReport,
    entities: Option<&Utf8Path>,
    locale: &str,
) -> anyhow::Result<usize> {
    let Some(path) = entities else {
        let before = report.link_warnings.len();
        report.link_warnings.retain(|w| !w.reason.is_pending());
        let unchecked = before - report.link_warnings.len();
        if unchecked > 0 {
            debug!(unchecked, "no entity fixture, skipping publication checks");
        }
        return Ok(unchecked);
    };

    let lookup = StaticLookup::load(path)?;
    let reconciler = LinkReconciler::new(Arc::new(lookup), locale);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create async runtime for link checks")?;
    report.link_warnings = runtime.block_on(reconciler.resolve(&report.link_warnings));
    Ok(0)
}

fn print_report(file: &Utf8Path, report: &DocumentReport, unchecked_links: usize) {
    println!("{}", file.bold());
    println!(
        "  {} {} words, {} headings",
        "Text:".cyan(),
        report.word_count,
        report.heading_count,
    );

    if !report.wrong_headings.is_empty() {
        println!("\n  {}", "Headings out of order:".yellow());
        for heading in &report.wrong_headings {
            println!("    \"{heading}\"");
        }
    }

    if !report.line_breaks.is_empty() {
        println!("\n  {}", "Line breaks (use a new paragraph):".yellow());
        for brk in &report.line_breaks {
            println!("    …{}{}{}…", brk.before, "⏎".red(), brk.after);
        }
    }

    if !report.link_warnings.is_empty() {
        println!("\n  {}", "Links:".yellow());
        for warning in &report.link_warnings {
            println!(
                "    [{}] {} {}",
                warning.reason.as_str().dimmed(),
                warning.text,
                warning.reason.advice(),
            );
            if !warning.uri.is_empty() && !warning.reason.is_pending() {
                println!("      {}", warning.uri.dimmed());
            }
        }
    }
    if unchecked_links > 0 {
        println!(
            "\n  {} {unchecked_links} entry/asset link(s) not checked (no entity fixture)",
            "Note:".dimmed(),
        );
    }

    if !report.hints.is_empty() {
        println!("\n  {}", "Readability:".cyan());
        for hint in &report.hints {
            match hint {
                Hint::LongSentence { chars, excerpt } => {
                    println!("    Longest sentence has {chars} characters: \"{excerpt}…\"");
                }
                Hint::LongParagraph { chars } => {
                    println!("    Longest paragraph has {chars} characters");
                }
                Hint::FewHeadings { words, headings } => {
                    println!("    {words} words under {headings} heading(s); add subheadings");
                }
            }
        }
    }

    if !report.has_warnings() {
        println!("\n  {}", "No warnings".green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use richtext_lint_core::links::{LinkReason, LinkWarning};
    use tempfile::TempDir;

    fn report_with(warnings: Vec<LinkWarning>) -> DocumentReport {
        let mut report = analyze_document(&Node::document(Vec::new()), &AnalysisSettings::default());
        report.link_warnings = warnings;
        report
    }

    #[test]
    fn without_fixture_pending_links_are_counted_and_dropped() {
        let mut report = report_with(vec![
            LinkWarning::new(LinkReason::CheckEntry, "Event", "e1"),
            LinkWarning::new(LinkReason::UrlText, "https://x.org", "https://x.org"),
        ]);
        let unchecked = reconcile_links(&mut report, None, "de-DE").unwrap();
        assert_eq!(unchecked, 1);
        assert_eq!(report.link_warnings.len(), 1);
        assert_eq!(report.link_warnings[0].reason, LinkReason::UrlText);
    }

    #[test]
    fn fixture_resolves_entry_links() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("entities.json")).unwrap();
        std::fs::write(
            &path,
            r#"{"entries": {
                "e1": {"sys": {"publishedCounter": 0}, "fields": {"title": {"de-DE": "Sommerfest"}}},
                "e2": {"sys": {"publishedCounter": 1}}
            }}"#,
        )
        .unwrap();

        let mut report = report_with(vec![
            LinkWarning::new(LinkReason::CheckEntry, "Fest", "e1"),
            LinkWarning::new(LinkReason::CheckEntry, "Live", "e2"),
            LinkWarning::new(LinkReason::CheckAsset, "Asset a9", "a9"),
        ]);
        let unchecked = reconcile_links(&mut report, Some(&path), "de-DE").unwrap();

        assert_eq!(unchecked, 0);
        assert_eq!(
            report.link_warnings,
            vec![
                LinkWarning::new(LinkReason::UnpublishedEntry, "Entry: Sommerfest", "e1"),
                LinkWarning::new(LinkReason::UnpublishedAsset, "Asset: Asset a9", "a9"),
            ]
        );
    }

    #[test]
    fn missing_fixture_is_an_error() {
        let mut report = report_with(Vec::new());
        let result = reconcile_links(
            &mut report,
            Some(Utf8Path::new("/nonexistent/entities.json")),
            "de-DE",
        );
        assert!(result.is_err());
    }
}
