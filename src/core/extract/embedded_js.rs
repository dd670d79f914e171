//! Program source embedded in template elements: `<script>_('Foo')</script>`.
//!
//! The element's text is handed to the program-source extractors as if it were a
//! file of its own, starting at the line the element's content starts on.

use crate::core::catalog::Message;
use crate::core::extract::element::ElementSelector;
use crate::core::extract::{Extractor, HtmlExtract};
use crate::core::parser::{ParseOptions, extract_source};
use crate::core::parsers::HtmlElement;
use crate::core::validate::{self, ValidationResult};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct EmbeddedJsExtractor {
    selector: ElementSelector,
    extractors: Vec<Extractor>,
}

impl EmbeddedJsExtractor {
    pub fn new(selector: &str, extractors: Vec<Extractor>) -> ValidationResult<Self> {
        let selector: ElementSelector = selector.parse()?;
        validate::non_empty_list("extractors", &extractors)?;
        Ok(Self {
            selector,
            extractors,
        })
    }
}

impl HtmlExtract for EmbeddedJsExtractor {
    fn extract_html_element(
        &self,
        element: &HtmlElement,
        file_name: &str,
        add_message: &mut dyn FnMut(Message, usize),
    ) -> Result<()> {
        if !self.selector.matches(element) {
            return Ok(());
        }
        let code = element.text();
        if code.trim().is_empty() {
            return Ok(());
        }

        let options = ParseOptions::default().with_line_number_start(element.line);
        let found = extract_source(&self.extractors, code, file_name, &options)?;
        for (message, line) in found.messages {
            add_message(message, line);
        }
        Ok(())
    }
}
