//! Message catalog.
//!
//! - `message`: candidate messages and source references
//! - `stats`: the extraction statistics accumulator
//! - `builder`: the catalog itself (merge rules and ordering)

pub mod builder;
pub mod message;
pub mod stats;

pub use builder::{Catalog, PluralConflictPolicy};
pub use message::{Message, MessageReference};
pub use stats::ExtractorStats;

#[cfg(test)]
mod tests;
