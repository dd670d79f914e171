/// Running counters for an extraction run.
///
/// Owned by the [`GettextExtractor`](crate::extractor::GettextExtractor) and handed to the
/// catalog and the parser by mutable borrow while they record messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractorStats {
    /// Distinct `(text, context)` messages.
    pub number_of_messages: usize,
    /// Distinct messages carrying a plural form.
    pub number_of_plural_messages: usize,
    /// Every recorded occurrence, merged or new.
    pub number_of_message_usages: usize,
    /// Distinct non-empty contexts.
    pub number_of_contexts: usize,
    pub number_of_parsed_files: usize,
    pub number_of_parsed_files_with_messages: usize,
}
