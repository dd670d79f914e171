//! Extraction summary output.
//!
//! Kept out of the library so `potgen` stays usable without any terminal output.

use std::io::Write;
use std::path::Path;

use colored::Colorize;

use crate::core::catalog::ExtractorStats;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

const LABEL_WIDTH: usize = 20;

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// One-line result followed by the statistics table.
pub fn print_summary_to<W: Write>(
    stats: &ExtractorStats,
    destination: Option<&Path>,
    verbose: bool,
    writer: &mut W,
) {
    let headline = format!(
        "Extracted {} from {}",
        plural(stats.number_of_messages, "message"),
        plural(stats.number_of_parsed_files, "file")
    );
    let headline = match destination {
        Some(path) => format!("{headline} into {}", path.display()),
        None => headline,
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), headline.green());

    if !verbose {
        return;
    }

    let rows = [
        ("messages", stats.number_of_messages),
        ("plural messages", stats.number_of_plural_messages),
        ("message usages", stats.number_of_message_usages),
        ("contexts", stats.number_of_contexts),
        ("parsed files", stats.number_of_parsed_files),
        ("files with messages", stats.number_of_parsed_files_with_messages),
    ];
    for (label, value) in rows {
        let label = format!("{label:<LABEL_WIDTH$}");
        let _ = writeln!(writer, "  {} {}", label.dimmed(), value.to_string().bold());
    }
}

pub fn print_skipped_warning_to<W: Write>(count: usize, writer: &mut W) {
    if count > 0 {
        let _ = writeln!(
            writer,
            "{} {} could not be accessed and were skipped",
            "warning:".bold().yellow(),
            plural(count, "path")
        );
    }
}

pub fn print_failure_to<W: Write>(error: &anyhow::Error, writer: &mut W) {
    let _ = writeln!(writer, "{} {:#}", FAILURE_MARK.red(), error);
}
