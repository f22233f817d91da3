//! A small Markdown parser and formatter with first-class TeX math spans.
//!
//! mathdown parses a Markdown subset (paragraphs, ATX headings, thematic
//! breaks, emphasis, code spans, backslash escapes and line breaks) plus
//! inline `$...$` and display `$$...$$` math, and formats the resulting
//! document tree either as HTML or back to Markdown.
//!
//! ```
//! use mathdown::{markdown_to_html, Options};
//!
//! let mut options = Options::default();
//! options.extension.math_dollars = true;
//! assert_eq!(
//!     markdown_to_html("Euler: $e^{i\\pi}+1=0$.", &options),
//!     "<p>Euler: <span class=\"math inline\">e^{i\\pi}+1=0</span>.</p>\n"
//! );
//! ```
//!
//! Math content is carried through the tree verbatim; the HTML formatter
//! hands it to a client-side typesetter untouched, while the Markdown
//! formatter re-escapes it against the characters Markdown itself would
//! reinterpret:
//!
//! ```
//! use mathdown::{markdown_to_commonmark, Options};
//!
//! let mut options = Options::default();
//! options.extension.math_dollars = true;
//! assert_eq!(markdown_to_commonmark("$$a_b$$\n", &options), "$$a\\_b$$\n");
//! ```

#![deny(missing_docs)]

mod arena_tree;
pub mod cm;
mod ctype;
pub mod html;
pub mod nodes;
mod parser;
mod scanners;
mod strings;
#[cfg(test)]
mod tests;

pub use crate::arena_tree::Node;
pub use crate::parser::options::{Extension, Options, Render};
pub use crate::parser::parse_document;
pub use typed_arena::Arena;

use std::io::BufWriter;

/// Render Markdown to HTML.
pub fn markdown_to_html(md: &str, options: &Options) -> String {
    let arena = Arena::new();
    let root = parse_document(&arena, md, options);
    let mut bw = BufWriter::new(Vec::new());
    html::format_document(root, options, &mut bw).unwrap();
    String::from_utf8(bw.into_inner().unwrap()).unwrap()
}

/// Render Markdown back to normalized Markdown.
pub fn markdown_to_commonmark(md: &str, options: &Options) -> String {
    let arena = Arena::new();
    let root = parse_document(&arena, md, options);
    let mut bw = BufWriter::new(Vec::new());
    cm::format_document(root, options, &mut bw).unwrap();
    String::from_utf8(bw.into_inner().unwrap()).unwrap()
}
