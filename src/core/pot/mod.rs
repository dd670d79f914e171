//! POT catalog text format.
//!
//! - `writer`: catalog snapshot → POT text
//! - `reader`: POT text → headers and messages
//! - `headers`: ordered header mapping with defaults
//! - `escape`: quoted-string escaping and folding

pub mod escape;
pub mod headers;
pub mod reader;
pub mod writer;

pub use headers::Headers;
pub use reader::{PotFile, read_pot};
pub use writer::write_pot;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::core::catalog::{Catalog, ExtractorStats, Message, MessageReference};

    fn catalog_from(candidates: Vec<(Message, Option<MessageReference>)>) -> Catalog {
        let mut catalog = Catalog::new();
        let mut stats = ExtractorStats::default();
        for (message, reference) in candidates {
            catalog
                .add_message(message, reference.as_ref(), &mut stats)
                .unwrap();
        }
        catalog
    }

    #[test]
    fn test_read_back_written_catalog() {
        let catalog = catalog_from(vec![
            (
                Message::new("Hello\n\"world\"").with_comment("Greeting"),
                Some(MessageReference::new("src/a b.ts", 4)),
            ),
            (
                Message::new("One file").with_plural("{{n}} files"),
                Some(MessageReference::new("src/list.ts", 10)),
            ),
            (Message::new("Open").with_context("menu"), None),
        ]);
        let headers = Headers::new().with("Language", "de");

        let written = write_pot(catalog.messages(), &headers).unwrap();
        let parsed = read_pot(&written).unwrap();

        assert_eq!(parsed.messages, catalog.snapshot());
        assert_eq!(parsed.headers, headers.merged_over_defaults());
    }

    #[test]
    fn test_header_values_keep_their_spacing() {
        let headers = Headers::new()
            .with("X-Indented", "  two leading spaces")
            .with("X-Trailing", "value  ");

        let written = write_pot(Vec::<&Message>::new(), &headers).unwrap();
        let parsed = read_pot(&written).unwrap();

        assert_eq!(parsed.headers.get("X-Indented"), Some("  two leading spaces"));
        assert_eq!(parsed.headers.get("X-Trailing"), Some("value  "));
    }

    fn message_strategy() -> impl Strategy<Value = (Message, Option<MessageReference>)> {
        (
            "[a-zA-Z0-9 \"\\\\\t\n.:{}]{0,40}",
            proptest::option::of("[a-z ]{1,12}"),
            proptest::option::of("[a-zA-Z0-9 \"\n]{1,12}"),
            proptest::collection::vec("[a-zA-Z0-9 \"\\\\\n]{0,20}", 0..3),
            proptest::option::of(("[a-z]{1,6}( [a-z]{1,3})?\\.ts", 1usize..500)),
        )
            .prop_map(|(text, plural, context, comments, location)| {
                let mut message = Message::new(text);
                message.text_plural = plural;
                message.context = context;
                message.comments = comments;
                let reference = location.map(|(file, line)| MessageReference::new(file, line));
                (message, reference)
            })
    }

    proptest! {
        #[test]
        fn written_catalog_reads_back_identically(
            candidates in proptest::collection::vec(message_strategy(), 0..12)
        ) {
            let catalog = catalog_from(candidates);
            let written = write_pot(catalog.messages(), &Headers::new()).unwrap();
            let parsed = read_pot(&written).unwrap();

            prop_assert_eq!(parsed.messages, catalog.snapshot());
            prop_assert_eq!(parsed.headers, Headers::new().merged_over_defaults());
        }
    }
}
