//! Extraction engine.
//!
//! - `content`: whitespace normalization of extracted text
//! - `validate`: argument and property checks shared by every layer
//! - `catalog`: deduplicated messages and statistics
//! - `pot`: catalog serialization and reading
//! - `parsers`: swc source parsing and html5ever template tokenizing
//! - `extract`: extraction adapters
//! - `parser`: the per-file extraction driver
//! - `file_scanner`: source tree walking for the CLI

pub mod catalog;
pub mod content;
pub mod extract;
pub mod file_scanner;
pub mod parser;
pub mod parsers;
pub mod pot;
pub mod validate;
