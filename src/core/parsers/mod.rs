//! Source parsing.
//!
//! - `jsx`: JavaScript / TypeScript / JSX / TSX parsing via swc
//! - `html`: HTML template tokenizing via html5ever

pub mod html;
pub mod jsx;

pub use html::{HtmlDocument, HtmlElement, HtmlNode, parse_html};
pub use jsx::{ExtractedComments, ParsedSource, parse_source};
