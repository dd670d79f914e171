//! Driver for JavaScript, TypeScript, JSX and TSX sources.

use std::path::{Path, PathBuf};

use swc_common::BytePos;
use swc_ecma_ast::{CallExpr, JSXElement};
use swc_ecma_visit::{Visit, VisitWith};

use super::{
    DEFAULT_STRING_FILE_NAME, FileMessages, ParseOptions, ensure_extractors, glob_paths,
    parse_and_record,
};
use crate::core::catalog::Message;
use crate::core::extract::{Extract, Extractor};
use crate::core::parsers::{ParsedSource, parse_source};
use crate::error::{ExtractError, Result};
use crate::extractor::GettextExtractor;

/// Parser for JavaScript, TypeScript, JSX and TSX sources feeding a [`GettextExtractor`].
pub struct JsParser<'e> {
    extractor: &'e mut GettextExtractor,
    extractors: Vec<Extractor>,
}

impl<'e> JsParser<'e> {
    pub fn new(extractor: &'e mut GettextExtractor, extractors: Vec<Extractor>) -> Self {
        Self {
            extractor,
            extractors,
        }
    }

    pub fn add_extractor(&mut self, extractor: impl Into<Extractor>) -> &mut Self {
        self.extractors.push(extractor.into());
        self
    }

    pub fn extractors(&self) -> &[Extractor] {
        &self.extractors
    }

    /// Parse source held in memory, referenced as `file_name`.
    pub fn parse_string(
        &mut self,
        source: &str,
        file_name: Option<&str>,
        options: &ParseOptions,
    ) -> Result<&mut Self> {
        ensure_extractors(&self.extractors)?;
        let file_name = file_name.unwrap_or(DEFAULT_STRING_FILE_NAME);
        let found = extract_source(&self.extractors, source.to_string(), file_name, options)?;
        self.extractor.record_file(found)?;
        Ok(self)
    }

    pub fn parse_file(
        &mut self,
        path: impl AsRef<Path>,
        options: &ParseOptions,
    ) -> Result<&mut Self> {
        self.parse_files(&[path.as_ref().to_path_buf()], options)
    }

    /// Parse every file matching a glob pattern.
    pub fn parse_files_glob(
        &mut self,
        pattern: &str,
        options: &ParseOptions,
    ) -> Result<&mut Self> {
        let paths = glob_paths(pattern)?;
        self.parse_files(&paths, options)
    }

    /// Parse files in parallel and record them in sorted path order.
    ///
    /// Files before the first failing one are recorded; the failure is returned.
    pub fn parse_files(
        &mut self,
        paths: &[PathBuf],
        options: &ParseOptions,
    ) -> Result<&mut Self> {
        ensure_extractors(&self.extractors)?;
        let extractors = &self.extractors;
        parse_and_record(self.extractor, paths, options, |code, file_name| {
            extract_source(extractors, code, file_name, options)
        })?;
        Ok(self)
    }
}

pub(crate) fn extract_source(
    extractors: &[Extractor],
    code: String,
    file_name: &str,
    options: &ParseOptions,
) -> Result<FileMessages> {
    let parsed = parse_source(options.transform(code), file_name)?;

    let mut visitor = ExtractVisitor {
        extractors,
        source: &parsed,
        found: Vec::new(),
        error: None,
    };
    parsed.module.visit_with(&mut visitor);
    if let Some(error) = visitor.error {
        return Err(error);
    }

    let messages = visitor
        .found
        .into_iter()
        .map(|(message, pos)| (message, options.reference_line(parsed.line_of(pos))))
        .collect::<Vec<_>>();

    tracing::debug!(file = file_name, messages = messages.len(), "parsed file");
    Ok(FileMessages {
        file_name: file_name.to_string(),
        messages,
    })
}

/// Offers every call expression and JSX element to every extractor, in source order.
struct ExtractVisitor<'a> {
    extractors: &'a [Extractor],
    source: &'a ParsedSource,
    found: Vec<(Message, BytePos)>,
    /// First extractor error; later nodes are skipped once set.
    error: Option<ExtractError>,
}

impl ExtractVisitor<'_> {
    fn run(
        &mut self,
        inspect: impl Fn(&Extractor, &ParsedSource, &mut dyn FnMut(Message, BytePos)) -> Result<()>,
    ) {
        if self.error.is_some() {
            return;
        }
        let found = &mut self.found;
        for extractor in self.extractors {
            let mut add_message = |message: Message, pos: BytePos| found.push((message, pos));
            if let Err(error) = inspect(extractor, self.source, &mut add_message) {
                self.error = Some(error);
                return;
            }
        }
    }
}

impl Visit for ExtractVisitor<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        self.run(|extractor, source, add_message| {
            extractor.extract_call(node, source, add_message)
        });
        node.visit_children_with(self);
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        self.run(|extractor, source, add_message| {
            extractor.extract_element(node, source, add_message)
        });
        node.visit_children_with(self);
    }
}
