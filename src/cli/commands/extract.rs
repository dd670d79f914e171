use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::super::args::ExtractArgs;
use super::super::exit_status::ExitStatus;
use super::super::report;
use crate::config::load_config;
use crate::core::file_scanner::scan_files;
use crate::core::parser::ParseOptions;
use crate::error::ExtractError;
use crate::extractor::GettextExtractor;

/// Output value selecting stdout instead of a file.
const STDOUT: &str = "-";

/// Scan the source root, extract every configured message and write the catalog.
pub fn extract(args: ExtractArgs) -> Result<ExitStatus> {
    let source_root = args.source_root.unwrap_or_else(|| PathBuf::from("."));
    if !source_root.is_dir() {
        anyhow::bail!("Source root is not a directory: {}", source_root.display());
    }

    let config = load_config(&source_root)?.config;
    let extractors = config.build_extractors()?;
    if extractors.js.is_empty() && extractors.html.is_empty() {
        return Err(ExtractError::MissingExtractors.into());
    }

    let scan = scan_files(
        &source_root,
        &config.includes,
        &config.ignores,
        config.ignore_test_files,
    );
    report::print_skipped_warning_to(scan.skipped_count, &mut io::stderr().lock());

    let options = ParseOptions::default()
        .with_line_number_start(args.line_number_start.unwrap_or(config.line_number_start))
        .with_reference_base(&source_root);
    let policy = args.plural_conflicts.unwrap_or(config.plural_conflicts);
    let mut extractor = GettextExtractor::with_plural_conflicts(policy);
    let (sources, templates) = scan.into_sources_and_templates();

    if !extractors.js.is_empty() {
        extractor
            .create_js_parser(extractors.js)
            .parse_files(&sources, &options)?;
    } else if !sources.is_empty() {
        tracing::debug!(files = sources.len(), "no program source extractors, skipping sources");
    }

    if !extractors.html.is_empty() {
        extractor
            .create_html_parser(extractors.html)
            .parse_files(&templates, &options)?;
    } else if !templates.is_empty() {
        tracing::debug!(files = templates.len(), "no HTML extractors, skipping templates");
    }

    let output = args.output.unwrap_or(config.output);
    if output == STDOUT {
        let catalog = extractor.pot_string(&config.headers)?;
        io::stdout()
            .lock()
            .write_all(catalog.as_bytes())
            .context("Failed to write catalog to stdout")?;
        report::print_summary_to(
            extractor.stats(),
            None,
            args.verbose,
            &mut io::stderr().lock(),
        );
    } else {
        let path = source_root.join(&output);
        extractor.save_pot_file(&path, &config.headers)?;
        report::print_summary_to(
            extractor.stats(),
            Some(path.as_path()),
            args.verbose,
            &mut io::stdout().lock(),
        );
    }

    Ok(ExitStatus::Success)
}
