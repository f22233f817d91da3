//! The HTML renderer for the document AST.
//!
//! Math spans are emitted raw inside their container elements, on the
//! assumption that a client-side typesetter consumes them verbatim.

use std::io::{self, Write};

use crate::nodes::{AstNode, NodeValue};
use crate::parser::options::Options;

/// Formats an AST as HTML, modified by the given options.
pub fn format_document<'a>(
    root: &'a AstNode<'a>,
    options: &Options,
    output: &mut dyn Write,
) -> io::Result<()> {
    let mut f = HtmlFormatter::new(options);
    f.format(root)?;
    output.write_all(&f.v)?;
    Ok(())
}

struct HtmlFormatter<'o> {
    v: Vec<u8>,
    options: &'o Options,
}

/// Writes `buffer` to `output`, escaping the characters HTML assigns
/// meaning to.
fn escape(output: &mut Vec<u8>, buffer: &[u8]) {
    let mut offset = 0;
    for (i, &byte) in buffer.iter().enumerate() {
        let esc: &[u8] = match byte {
            b'"' => b"&quot;",
            b'&' => b"&amp;",
            b'<' => b"&lt;",
            b'>' => b"&gt;",
            _ => continue,
        };
        output.extend_from_slice(&buffer[offset..i]);
        output.extend_from_slice(esc);
        offset = i + 1;
    }
    output.extend_from_slice(&buffer[offset..]);
}

impl<'o> HtmlFormatter<'o> {
    fn new(options: &'o Options) -> Self {
        HtmlFormatter {
            v: vec![],
            options,
        }
    }

    fn cr(&mut self) {
        if !self.v.is_empty() && self.v[self.v.len() - 1] != b'\n' {
            self.v.push(b'\n');
        }
    }

    fn format<'a>(&mut self, node: &'a AstNode<'a>) -> io::Result<()> {
        enum Phase {
            Pre,
            Post,
        }
        let mut stack = vec![(node, Phase::Pre)];

        while let Some((node, phase)) = stack.pop() {
            match phase {
                Phase::Pre => {
                    if self.format_node(node, true)? {
                        stack.push((node, Phase::Post));
                        for ch in node.reverse_children() {
                            stack.push((ch, Phase::Pre));
                        }
                    }
                }
                Phase::Post => {
                    self.format_node(node, false)?;
                }
            }
        }

        Ok(())
    }

    fn format_node<'a>(&mut self, node: &'a AstNode<'a>, entering: bool) -> io::Result<bool> {
        match node.data.borrow().value {
            NodeValue::Document => (),
            NodeValue::Paragraph => {
                if entering {
                    self.cr();
                    self.v.extend_from_slice(b"<p>");
                } else {
                    self.v.extend_from_slice(b"</p>\n");
                }
            }
            NodeValue::Heading(ref nh) => {
                if entering {
                    self.cr();
                    write!(self.v, "<h{}>", nh.level)?;
                } else {
                    writeln!(self.v, "</h{}>", nh.level)?;
                }
            }
            NodeValue::ThematicBreak => {
                if entering {
                    self.cr();
                    self.v.extend_from_slice(b"<hr />\n");
                }
            }
            NodeValue::Text(ref literal) => {
                if entering {
                    escape(&mut self.v, literal.as_bytes());
                }
            }
            NodeValue::SoftBreak => {
                if entering {
                    if self.options.render.hardbreaks {
                        self.v.extend_from_slice(b"<br />\n");
                    } else {
                        self.v.push(b'\n');
                    }
                }
            }
            NodeValue::LineBreak => {
                if entering {
                    self.v.extend_from_slice(b"<br />\n");
                }
            }
            NodeValue::Code(ref code) => {
                if entering {
                    self.v.extend_from_slice(b"<code>");
                    escape(&mut self.v, code.literal.as_bytes());
                    self.v.extend_from_slice(b"</code>");
                }
            }
            NodeValue::Emph => {
                if entering {
                    self.v.extend_from_slice(b"<em>");
                } else {
                    self.v.extend_from_slice(b"</em>");
                }
            }
            NodeValue::Strong => {
                if entering {
                    self.v.extend_from_slice(b"<strong>");
                } else {
                    self.v.extend_from_slice(b"</strong>");
                }
            }
            NodeValue::InlineMath(ref math) => {
                if entering {
                    self.v.extend_from_slice(b"<span class=\"math inline\">");
                    self.v.extend_from_slice(math.literal.as_bytes());
                } else {
                    self.v.extend_from_slice(b"</span>");
                }
            }
            NodeValue::BlockMath(ref math) => {
                if entering {
                    self.v.extend_from_slice(b"<div class=\"math block\">");
                    self.v.extend_from_slice(math.literal.as_bytes());
                    for line in &math.trailing_lines {
                        self.v.push(b'\n');
                        self.v.extend_from_slice(line.as_bytes());
                    }
                } else {
                    self.v.extend_from_slice(b"</div>");
                }
            }
        }
        Ok(true)
    }
}
