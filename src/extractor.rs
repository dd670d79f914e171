//! The extractor facade: owns the catalog and its statistics, hands out parsers,
//! and serializes the result.

use std::fs;
use std::path::Path;

use crate::core::catalog::{
    Catalog, ExtractorStats, Message, MessageReference, PluralConflictPolicy,
};
use crate::core::extract::{Extractor, HtmlExtractor};
use crate::core::parser::{FileMessages, HtmlParser, JsParser};
use crate::core::pot::{Headers, write_pot};
use crate::error::{ExtractError, Result};

#[derive(Debug, Default)]
pub struct GettextExtractor {
    catalog: Catalog,
    stats: ExtractorStats,
}

impl GettextExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plural_conflicts(policy: PluralConflictPolicy) -> Self {
        Self {
            catalog: Catalog::new().with_plural_conflicts(policy),
            stats: ExtractorStats::default(),
        }
    }

    /// A parser recording into this extractor. Extractors may also be added later
    /// with [`JsParser::add_extractor`]; parsing without any fails.
    pub fn create_js_parser(&mut self, extractors: Vec<Extractor>) -> JsParser<'_> {
        JsParser::new(self, extractors)
    }

    /// A template parser recording into this extractor.
    pub fn create_html_parser(&mut self, extractors: Vec<HtmlExtractor>) -> HtmlParser<'_> {
        HtmlParser::new(self, extractors)
    }

    /// Record one message occurrence directly, bypassing the parsers.
    pub fn add_message(
        &mut self,
        message: Message,
        reference: Option<&MessageReference>,
    ) -> Result<()> {
        self.catalog.add_message(message, reference, &mut self.stats)
    }

    /// Record everything found in one file and count the file.
    ///
    /// The batch is checked first, so a refused occurrence leaves neither the
    /// catalog nor the statistics touched by this file.
    pub(crate) fn record_file(&mut self, found: FileMessages) -> Result<()> {
        let occurrences: Vec<(Message, MessageReference)> = found
            .messages
            .into_iter()
            .map(|(message, line)| {
                let reference = MessageReference::new(found.file_name.as_str(), line);
                (message, reference)
            })
            .collect();
        self.catalog.check_batch(
            occurrences
                .iter()
                .map(|(message, reference)| (message, Some(reference))),
        )?;

        let has_messages = !occurrences.is_empty();
        for (message, reference) in occurrences {
            self.catalog
                .add_message(message, Some(&reference), &mut self.stats)?;
        }

        self.stats.number_of_parsed_files += 1;
        if has_messages {
            self.stats.number_of_parsed_files_with_messages += 1;
        }
        Ok(())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// All messages in catalog order.
    pub fn messages(&self) -> Vec<Message> {
        self.catalog.snapshot()
    }

    pub fn stats(&self) -> &ExtractorStats {
        &self.stats
    }

    pub fn pot_string(&self, headers: &Headers) -> Result<String> {
        Ok(write_pot(self.catalog.messages(), headers)?)
    }

    pub fn save_pot_file(&self, path: impl AsRef<Path>, headers: &Headers) -> Result<()> {
        let path = path.as_ref();
        let content = self.pot_string(headers)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ExtractError::io(parent, e))?;
        }
        fs::write(path, content).map_err(|e| ExtractError::io(path, e))?;
        tracing::debug!(path = %path.display(), messages = self.catalog.len(), "wrote catalog");
        Ok(())
    }
}
