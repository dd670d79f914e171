use pretty_assertions::assert_eq;

use crate::core::catalog::*;
use crate::error::ExtractError;

fn add(catalog: &mut Catalog, stats: &mut ExtractorStats, message: Message, file: &str, line: usize) {
    catalog
        .add_message(message, Some(&MessageReference::new(file, line)), stats)
        .unwrap();
}

// ============================================================
// Merge rules
// ============================================================

#[test]
fn test_same_occurrence_twice_is_idempotent() {
    let mut catalog = Catalog::new();
    let mut stats = ExtractorStats::default();
    let message = Message::new("Foo").with_plural("Foos").with_comment("Note");

    add(&mut catalog, &mut stats, message.clone(), "file.ts", 1);
    add(&mut catalog, &mut stats, message, "file.ts", 1);

    assert_eq!(catalog.len(), 1);
    let entry = catalog.get("Foo", None).unwrap();
    assert_eq!(entry.references, vec!["file.ts:1"]);
    assert_eq!(entry.comments, vec!["Note"]);
    assert_eq!(entry.text_plural.as_deref(), Some("Foos"));
    assert_eq!(stats.number_of_messages, 1);
    assert_eq!(stats.number_of_message_usages, 2);
}

#[test]
fn test_first_plural_wins() {
    let mut catalog = Catalog::new();
    let mut stats = ExtractorStats::default();

    add(&mut catalog, &mut stats, Message::new("A").with_plural("As"), "a.ts", 1);
    add(&mut catalog, &mut stats, Message::new("A").with_plural("Bs"), "a.ts", 2);

    let entry = catalog.get("A", None).unwrap();
    assert_eq!(entry.text_plural.as_deref(), Some("As"));
    assert_eq!(entry.references, vec!["a.ts:1", "a.ts:2"]);
    assert_eq!(stats.number_of_plural_messages, 1);
}

#[test]
fn test_plural_adopted_when_missing() {
    let mut catalog = Catalog::new();
    let mut stats = ExtractorStats::default();

    add(&mut catalog, &mut stats, Message::new("A"), "a.ts", 1);
    assert_eq!(stats.number_of_plural_messages, 0);

    add(&mut catalog, &mut stats, Message::new("A").with_plural("As"), "a.ts", 2);
    add(&mut catalog, &mut stats, Message::new("A"), "a.ts", 3);

    let entry = catalog.get("A", None).unwrap();
    assert_eq!(entry.text_plural.as_deref(), Some("As"));
    assert_eq!(stats.number_of_plural_messages, 1);
    assert_eq!(stats.number_of_messages, 1);
}

#[test]
fn test_context_partitions_messages() {
    let mut catalog = Catalog::new();
    let mut stats = ExtractorStats::default();

    add(&mut catalog, &mut stats, Message::new("A").with_context("X"), "a.ts", 1);
    add(&mut catalog, &mut stats, Message::new("A"), "a.ts", 2);

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get("A", Some("X")).unwrap().references, vec!["a.ts:1"]);
    assert_eq!(catalog.get("A", None).unwrap().references, vec!["a.ts:2"]);
    assert_eq!(stats.number_of_contexts, 1);
}

#[test]
fn test_empty_context_is_no_context() {
    let mut catalog = Catalog::new();
    let mut stats = ExtractorStats::default();

    add(&mut catalog, &mut stats, Message::new("A").with_context(""), "a.ts", 1);
    add(&mut catalog, &mut stats, Message::new("A"), "a.ts", 2);

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("A", Some("")).unwrap().context, None);
    assert_eq!(stats.number_of_contexts, 0);
}

#[test]
fn test_references_deduplicated_in_order() {
    let mut catalog = Catalog::new();
    let mut stats = ExtractorStats::default();

    for line in [1, 2, 1] {
        add(&mut catalog, &mut stats, Message::new("A"), "file.ts", line);
    }

    assert_eq!(
        catalog.get("A", None).unwrap().references,
        vec!["file.ts:1", "file.ts:2"]
    );
    assert_eq!(stats.number_of_message_usages, 3);
}

#[test]
fn test_comments_deduplicated_in_order() {
    let mut catalog = Catalog::new();
    let mut stats = ExtractorStats::default();

    add(
        &mut catalog,
        &mut stats,
        Message::new("A").with_comment("first").with_comment("second"),
        "a.ts",
        1,
    );
    add(
        &mut catalog,
        &mut stats,
        Message::new("A").with_comment("second").with_comment("third"),
        "a.ts",
        2,
    );

    assert_eq!(
        catalog.get("A", None).unwrap().comments,
        vec!["first", "second", "third"]
    );
}

#[test]
fn test_candidate_references_come_before_location() {
    let mut catalog = Catalog::new();
    let mut stats = ExtractorStats::default();

    catalog
        .add_message(
            Message::new("A").with_reference("other.ts:9"),
            Some(&MessageReference::new("a.ts", 1)),
            &mut stats,
        )
        .unwrap();
    catalog
        .add_message(Message::new("A"), None, &mut stats)
        .unwrap();

    assert_eq!(
        catalog.get("A", None).unwrap().references,
        vec!["other.ts:9", "a.ts:1"]
    );
}

// ============================================================
// Ordering
// ============================================================

#[test]
fn test_snapshot_order() {
    let mut catalog = Catalog::new();
    let mut stats = ExtractorStats::default();

    add(&mut catalog, &mut stats, Message::new("B").with_context("menu"), "a.ts", 1);
    add(&mut catalog, &mut stats, Message::new("Z"), "a.ts", 2);
    add(&mut catalog, &mut stats, Message::new("A").with_context("button"), "a.ts", 3);
    add(&mut catalog, &mut stats, Message::new("A").with_context("menu"), "a.ts", 4);
    add(&mut catalog, &mut stats, Message::new("Y"), "a.ts", 5);

    let order: Vec<(Option<&str>, &str)> = catalog
        .messages()
        .map(|m| (m.context.as_deref(), m.text.as_str()))
        .collect();

    assert_eq!(
        order,
        vec![
            (None, "Z"),
            (None, "Y"),
            (Some("menu"), "B"),
            (Some("menu"), "A"),
            (Some("button"), "A"),
        ]
    );
    assert_eq!(catalog.contexts().collect::<Vec<_>>(), vec!["menu", "button"]);
    assert_eq!(stats.number_of_contexts, 2);
}

#[test]
fn test_messages_by_context_skips_empty_groups() {
    let mut catalog = Catalog::new();
    let mut stats = ExtractorStats::default();

    add(&mut catalog, &mut stats, Message::new("A").with_context("X"), "a.ts", 1);

    let groups = catalog.messages_by_context();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].0, Some("X"));
    assert_eq!(groups[0].1.len(), 1);
}

#[test]
fn test_empty_text_is_a_message() {
    let mut catalog = Catalog::new();
    let mut stats = ExtractorStats::default();

    add(&mut catalog, &mut stats, Message::new("").with_context("ctx"), "a.ts", 1);

    assert_eq!(catalog.len(), 1);
    assert!(catalog.get("", Some("ctx")).is_some());
}

// ============================================================
// Validation and plural policy
// ============================================================

#[test]
fn test_invalid_reference_leaves_catalog_untouched() {
    let mut catalog = Catalog::new();
    let mut stats = ExtractorStats::default();

    let result = catalog.add_message(
        Message::new("A").with_context("X").with_reference(""),
        None,
        &mut stats,
    );

    assert!(matches!(result, Err(ExtractError::Validation(_))));
    assert!(catalog.is_empty());
    assert_eq!(stats, ExtractorStats::default());
}

#[test]
fn test_empty_reference_file_is_rejected() {
    let mut catalog = Catalog::new();
    let mut stats = ExtractorStats::default();

    let result =
        catalog.add_message(Message::new("A"), Some(&MessageReference::new("", 3)), &mut stats);

    assert_eq!(
        result.unwrap_err().to_string(),
        "Property 'reference.file' must be a non-empty string"
    );
}

#[test]
fn test_reject_policy_refuses_conflicting_plural() {
    let mut catalog = Catalog::new().with_plural_conflicts(PluralConflictPolicy::Reject);
    let mut stats = ExtractorStats::default();

    add(&mut catalog, &mut stats, Message::new("A").with_plural("As"), "a.ts", 1);
    let result = catalog.add_message(
        Message::new("A").with_plural("Bs"),
        Some(&MessageReference::new("a.ts", 2)),
        &mut stats,
    );

    match result {
        Err(ExtractError::PluralConflict {
            existing, rejected, ..
        }) => {
            assert_eq!(existing, "As");
            assert_eq!(rejected, "Bs");
        }
        other => panic!("expected plural conflict, got {other:?}"),
    }
    assert_eq!(catalog.get("A", None).unwrap().references, vec!["a.ts:1"]);
    assert_eq!(stats.number_of_message_usages, 1);
}

#[test]
fn test_reject_policy_accepts_identical_plural() {
    let mut catalog = Catalog::new().with_plural_conflicts(PluralConflictPolicy::Reject);
    let mut stats = ExtractorStats::default();

    add(&mut catalog, &mut stats, Message::new("A").with_plural("As"), "a.ts", 1);
    add(&mut catalog, &mut stats, Message::new("A").with_plural("As"), "a.ts", 2);
    add(&mut catalog, &mut stats, Message::new("A"), "a.ts", 3);

    assert_eq!(catalog.get("A", None).unwrap().references.len(), 3);
}

#[test]
fn test_warn_policy_keeps_first_plural() {
    let mut catalog = Catalog::new().with_plural_conflicts(PluralConflictPolicy::Warn);
    let mut stats = ExtractorStats::default();

    add(&mut catalog, &mut stats, Message::new("A").with_plural("As"), "a.ts", 1);
    add(&mut catalog, &mut stats, Message::new("A").with_plural("Bs"), "a.ts", 2);

    assert_eq!(
        catalog.get("A", None).unwrap().text_plural.as_deref(),
        Some("As")
    );
}

#[test]
fn test_check_batch_catches_conflicts_within_the_batch() {
    let catalog = Catalog::new().with_plural_conflicts(PluralConflictPolicy::Reject);
    let first = Message::new("A").with_plural("As");
    let second = Message::new("A").with_plural("Bs");
    let reference = MessageReference::new("a.ts", 1);

    let err = catalog
        .check_batch([(&first, Some(&reference)), (&second, Some(&reference))])
        .unwrap_err();
    assert!(matches!(err, ExtractError::PluralConflict { .. }));
    assert!(catalog.is_empty());

    let keep = Catalog::new();
    assert!(
        keep.check_batch([(&first, Some(&reference)), (&second, Some(&reference))])
            .is_ok()
    );
}

#[test]
fn test_check_batch_against_recorded_plural() {
    let mut catalog = Catalog::new().with_plural_conflicts(PluralConflictPolicy::Reject);
    let mut stats = ExtractorStats::default();
    let first = Message::new("A").with_plural("As").with_context("menu");
    add(&mut catalog, &mut stats, first, "a.ts", 1);

    let same_context = Message::new("A").with_plural("Bs").with_context("menu");
    let other_context = Message::new("A").with_plural("Bs");
    assert!(catalog.check_batch([(&same_context, None)]).is_err());
    assert!(catalog.check_batch([(&other_context, None)]).is_ok());

    let bad_reference = MessageReference::new("", 1);
    assert!(matches!(
        catalog.check_batch([(&other_context, Some(&bad_reference))]),
        Err(ExtractError::Validation(_))
    ));
}
