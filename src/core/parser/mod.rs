//! Extraction driver: parse files, run every extractor over them, and record the
//! reported messages in the catalog.
//!
//! Files are parsed and inspected in parallel. The resulting per-file message batches
//! are recorded afterwards by the single catalog owner, one file at a time in path
//! order, so the catalog is never mutated concurrently and output does not depend on
//! thread scheduling.
//!
//! - `js`: JavaScript / TypeScript / JSX / TSX sources
//! - `html`: HTML templates, including embedded `<script>` code

mod html;
mod js;

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::core::catalog::Message;
use crate::error::{ExtractError, Result};
use crate::extractor::GettextExtractor;

pub use html::HtmlParser;
pub(crate) use js::extract_source;
pub use js::JsParser;

/// File name used for `parse_string` when none is given.
pub const DEFAULT_STRING_FILE_NAME: &str = "gettext-extractor-string-literal";

type TransformSource = dyn Fn(&str) -> String + Send + Sync;

/// Per-call parsing options.
pub struct ParseOptions {
    /// Line number reported for the first line of a file.
    pub line_number_start: usize,
    /// Rewrites the source before it is parsed (e.g. to strip a template wrapper).
    pub transform_source: Option<Box<TransformSource>>,
    /// References are written relative to this directory when set.
    pub reference_base: Option<PathBuf>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            line_number_start: 1,
            transform_source: None,
            reference_base: None,
        }
    }
}

impl ParseOptions {
    pub fn with_line_number_start(mut self, line_number_start: usize) -> Self {
        self.line_number_start = line_number_start;
        self
    }

    pub fn with_transform_source(
        mut self,
        transform: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.transform_source = Some(Box::new(transform));
        self
    }

    pub fn with_reference_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.reference_base = Some(base.into());
        self
    }

    fn reference_name(&self, path: &Path) -> String {
        let relative = self
            .reference_base
            .as_deref()
            .and_then(|base| path.strip_prefix(base).ok())
            .unwrap_or(path);
        relative.to_string_lossy().replace('\\', "/")
    }

    fn transform(&self, code: String) -> String {
        match &self.transform_source {
            Some(transform) => transform(&code),
            None => code,
        }
    }

    /// Reference line for 1-based `line` of the parsed source.
    fn reference_line(&self, line: usize) -> usize {
        line - 1 + self.line_number_start
    }
}

/// Messages found in one file, with reference line numbers already adjusted.
pub(crate) struct FileMessages {
    pub file_name: String,
    pub messages: Vec<(Message, usize)>,
}

fn ensure_extractors<T>(extractors: &[T]) -> Result<()> {
    if extractors.is_empty() {
        return Err(ExtractError::MissingExtractors);
    }
    Ok(())
}

fn glob_paths(pattern: &str) -> Result<Vec<PathBuf>> {
    Ok(glob::glob(pattern)
        .map_err(|e| ExtractError::GlobPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect())
}

/// Read and inspect `paths` in parallel, then record them in sorted path order.
///
/// Files before the first failing one are recorded; the failure is returned.
fn parse_and_record<F>(
    extractor: &mut GettextExtractor,
    paths: &[PathBuf],
    options: &ParseOptions,
    extract: F,
) -> Result<()>
where
    F: Fn(String, &str) -> Result<FileMessages> + Sync,
{
    let mut paths = paths.to_vec();
    paths.sort();
    paths.dedup();

    let results: Vec<Result<FileMessages>> = paths
        .par_iter()
        .map(|path| {
            let code = fs::read_to_string(path).map_err(|e| ExtractError::io(path, e))?;
            extract(code, &options.reference_name(path))
        })
        .collect();

    for result in results {
        extractor.record_file(result?)?;
    }
    Ok(())
}
