//! potgen - gettext catalog extraction for JavaScript, TypeScript and HTML
//!
//! potgen scans JS/TS/JSX/TSX sources and HTML templates for translatable strings
//! (translation function calls, marked JSX or HTML elements, and calls inside
//! `<script>` blocks), merges them into a deduplicated catalog and writes it as a
//! gettext POT template.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (catalog, serializer, parsers, adapters, driver)
//! - `error`: Library error type
//! - `extractor`: The [`GettextExtractor`] facade
//!
//! ## Example
//!
//! ```no_run
//! use potgen::core::extract::{ArgumentMapping, CallExpressionExtractor, CallExpressionOptions};
//! use potgen::core::parser::ParseOptions;
//! use potgen::core::pot::Headers;
//! use potgen::GettextExtractor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let gettext = CallExpressionExtractor::new(
//!     ["gettext"],
//!     CallExpressionOptions::new(ArgumentMapping::text(0)),
//! )?;
//!
//! let mut extractor = GettextExtractor::new();
//! extractor
//!     .create_js_parser(vec![gettext.into()])
//!     .parse_files_glob("src/**/*.js", &ParseOptions::default())?;
//! extractor.save_pot_file("messages.pot", &Headers::new())?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod extractor;

pub use error::{ExtractError, Result};
pub use extractor::GettextExtractor;
