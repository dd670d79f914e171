//! Driver for HTML templates.

use std::path::{Path, PathBuf};

use super::{
    DEFAULT_STRING_FILE_NAME, FileMessages, ParseOptions, ensure_extractors, glob_paths,
    parse_and_record,
};
use crate::core::catalog::Message;
use crate::core::extract::{HtmlExtract, HtmlExtractor};
use crate::core::parsers::parse_html;
use crate::error::Result;
use crate::extractor::GettextExtractor;

/// Parser for HTML templates feeding a [`GettextExtractor`].
pub struct HtmlParser<'e> {
    extractor: &'e mut GettextExtractor,
    extractors: Vec<HtmlExtractor>,
}

impl<'e> HtmlParser<'e> {
    pub fn new(extractor: &'e mut GettextExtractor, extractors: Vec<HtmlExtractor>) -> Self {
        Self {
            extractor,
            extractors,
        }
    }

    pub fn add_extractor(&mut self, extractor: impl Into<HtmlExtractor>) -> &mut Self {
        self.extractors.push(extractor.into());
        self
    }

    pub fn extractors(&self) -> &[HtmlExtractor] {
        &self.extractors
    }

    pub fn parse_string(
        &mut self,
        source: &str,
        file_name: Option<&str>,
        options: &ParseOptions,
    ) -> Result<&mut Self> {
        ensure_extractors(&self.extractors)?;
        let file_name = file_name.unwrap_or(DEFAULT_STRING_FILE_NAME);
        let found = extract_html(&self.extractors, source.to_string(), file_name, options)?;
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

    pub fn parse_files_glob(
        &mut self,
        pattern: &str,
        options: &ParseOptions,
    ) -> Result<&mut Self> {
        let paths = glob_paths(pattern)?;
        self.parse_files(&paths, options)
    }

    /// Same ordering and failure rules as [`super::JsParser::parse_files`].
    pub fn parse_files(
        &mut self,
        paths: &[PathBuf],
        options: &ParseOptions,
    ) -> Result<&mut Self> {
        ensure_extractors(&self.extractors)?;
        let extractors = &self.extractors;
        parse_and_record(self.extractor, paths, options, |code, file_name| {
            extract_html(extractors, code, file_name, options)
        })?;
        Ok(self)
    }
}

/// Offer every element, in document order, to every extractor.
fn extract_html(
    extractors: &[HtmlExtractor],
    code: String,
    file_name: &str,
    options: &ParseOptions,
) -> Result<FileMessages> {
    let document = parse_html(&options.transform(code));

    let mut found = Vec::new();
    for element in document.elements() {
        for extractor in extractors {
            let mut add_message = |message: Message, line: usize| found.push((message, line));
            extractor.extract_html_element(element, file_name, &mut add_message)?;
        }
    }

    let messages = found
        .into_iter()
        .map(|(message, line)| (message, options.reference_line(line)))
        .collect::<Vec<_>>();

    tracing::debug!(file = file_name, messages = messages.len(), "parsed template");
    Ok(FileMessages {
        file_name: file_name.to_string(),
        messages,
    })
}
