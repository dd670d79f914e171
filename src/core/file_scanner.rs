//! Source file discovery for the CLI: include directories, ignore patterns and
//! test-file filtering over a walked source tree.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

/// Extensions handed to the JS/TS parser.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx", "ts", "mts", "cts", "tsx"];

/// Extensions handed to the HTML template parser.
pub const TEMPLATE_EXTENSIONS: &[&str] = &["html", "htm"];

/// Patterns without `*` or `?` are literal paths, so `app/[locale]` needs no escaping.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Sorted and deduplicated.
    pub files: BTreeSet<PathBuf>,
    pub skipped_count: usize,
}

impl ScanResult {
    /// Program sources and templates, each sorted.
    pub fn into_sources_and_templates(self) -> (Vec<PathBuf>, Vec<PathBuf>) {
        self.files
            .into_iter()
            .partition(|path| !has_extension(path, TEMPLATE_EXTENSIONS))
    }
}

pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignore_patterns: &[String],
    ignore_test_files: bool,
) -> ScanResult {
    let mut result = ScanResult::default();

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => tracing::warn!(pattern = %p, error = %e, "invalid ignore pattern"),
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    if ignore_test_files {
        glob_patterns.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
    }

    for dir in include_dirs(base_dir, includes) {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    result.skipped_count += 1;
                    tracing::warn!(error = %e, "cannot access path");
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            let path_str = path.to_string_lossy();
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if entry.file_type().is_file() && is_source_file(path) {
                result.files.insert(path.to_path_buf());
            }
        }
    }

    tracing::debug!(
        files = result.files.len(),
        skipped = result.skipped_count,
        "scanned source tree"
    );
    result
}

fn include_dirs(base_dir: &Path, includes: &[String]) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut paths = Vec::new();
    for inc in includes {
        if is_glob_pattern(inc) {
            let full_pattern = base_dir.join(inc);
            match glob(&full_pattern.to_string_lossy()) {
                Ok(entries) => paths.extend(entries.flatten().filter(|entry| entry.is_dir())),
                Err(e) => tracing::warn!(pattern = %inc, error = %e, "invalid include pattern"),
            }
        } else {
            let path = base_dir.join(inc);
            if path.exists() {
                paths.push(path);
            } else {
                tracing::warn!(path = %path.display(), "include path does not exist");
            }
        }
    }
    paths
}

fn is_source_file(path: &Path) -> bool {
    has_extension(path, SOURCE_EXTENSIONS) || has_extension(path, TEMPLATE_EXTENSIONS)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}
