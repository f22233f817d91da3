//! Recognition of dollar-delimited math spans.

use std::ops::Range;

use jetscii::ByteSubstring;

/// An inline math span, `$x$`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeMath {
    /// The literal contents of the span.  As the contents are not
    /// interpreted as Markdown at all, they are contained within this
    /// structure, rather than inserted into a child inline of any kind.
    pub literal: String,
}

/// A display math span, `$$x$$`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeBlockMath {
    /// The literal contents of the span, excluding the delimiters.
    pub literal: String,

    /// Raw lines attached to the span after parsing, e.g. by a host
    /// postprocessor that accumulates continuation content.  The HTML
    /// formatter emits each one verbatim after `literal`, preceded by a
    /// newline; the Markdown formatter escapes them exactly as it escapes
    /// `literal`.  The parser never fills this in itself: a `$$` pair only
    /// ever matches within a single line.
    pub trailing_lines: Vec<String>,
}

/// A span successfully scanned at a `$` trigger, described relative to the
/// trigger position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MathSpan {
    /// Display (`$$`) rather than inline (`$`) math.
    pub display: bool,

    /// The content strictly between the delimiters.
    pub content: Range<usize>,

    /// Total length of the span, delimiters included.
    pub len: usize,
}

/// Scans for a math span at the start of `line`.  `line` must begin with the
/// `$` that triggered the scan, and must extend no further than the end of
/// the physical line it sits on: neither span form crosses a line boundary.
///
/// A `$` followed by a space, or by nothing at all, is ordinary prose.  A
/// second `$` opens display math and is checked first, so `$$x$$` is never
/// read as an empty inline span with stray text behind it.  A span whose
/// closer is missing from the line is not math either; the caller falls
/// back to treating the trigger as text.
pub(crate) fn scan_math_span(line: &[u8]) -> Option<MathSpan> {
    debug_assert!(line.first() == Some(&b'$'));

    match line.get(1) {
        None | Some(&b' ') => None,
        Some(&b'$') => {
            let stop = ByteSubstring::new(b"$$").find(&line[2..])?;
            Some(MathSpan {
                display: true,
                content: 2..2 + stop,
                len: stop + 4,
            })
        }
        Some(_) => {
            let stop = line[1..].iter().position(|&c| c == b'$')?;
            Some(MathSpan {
                display: false,
                content: 1..1 + stop,
                len: stop + 2,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{scan_math_span, MathSpan};

    fn scan(line: &str) -> Option<MathSpan> {
        scan_math_span(line.as_bytes())
    }

    #[test]
    fn inline_spans() {
        assert_eq!(
            scan("$x+1$ end."),
            Some(MathSpan {
                display: false,
                content: 1..4,
                len: 5,
            })
        );
        assert_eq!(
            scan("$a$$b$"),
            Some(MathSpan {
                display: false,
                content: 1..2,
                len: 3,
            })
        );
    }

    #[test]
    fn display_spans() {
        assert_eq!(
            scan("$$a_b$$"),
            Some(MathSpan {
                display: true,
                content: 2..5,
                len: 7,
            })
        );
        // `$$` wins over an empty inline span
        assert_eq!(
            scan("$$$x$$"),
            Some(MathSpan {
                display: true,
                content: 2..4,
                len: 6,
            })
        );
        assert_eq!(
            scan("$$$$"),
            Some(MathSpan {
                display: true,
                content: 2..2,
                len: 4,
            })
        );
    }

    #[test]
    fn declined() {
        assert_eq!(scan("$ not math"), None);
        assert_eq!(scan("$"), None);
        assert_eq!(scan("$unclosed"), None);
        assert_eq!(scan("$$unclosed"), None);
        assert_eq!(scan("$$almost$"), None);
    }

    #[test]
    fn consumed_length_matches_content() {
        let m = scan("$x+1$ and more").unwrap();
        assert_eq!(m.len, (m.content.end - m.content.start) + 2);
        let m = scan("$$x+1$$ and more").unwrap();
        assert_eq!(m.len, (m.content.end - m.content.start) + 4);
    }
}
