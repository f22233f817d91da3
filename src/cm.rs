//! The Markdown renderer for the document AST: re-emits a document in
//! normalized source form.
//!
//! Math spans are re-wrapped in the delimiters they were parsed from, with
//! their contents escaped against reinterpretation; the policy lives in
//! `strings::escape_math`.

use std::cmp::max;
use std::io::{self, Write};

use crate::ctype::{isalpha, isdigit, ispunct, isspace};
use crate::nodes::{AstNode, NodeValue};
use crate::parser::options::Options;
use crate::strings::escape_math;

/// Formats an AST as Markdown, modified by the given options.
pub fn format_document<'a>(
    root: &'a AstNode<'a>,
    options: &Options,
    output: &mut dyn Write,
) -> io::Result<()> {
    let mut f = CommonMarkFormatter::new(options);
    f.format(root);
    if !f.v.is_empty() && f.v[f.v.len() - 1] != b'\n' {
        f.v.push(b'\n');
    }
    output.write_all(&f.v)?;
    Ok(())
}

struct CommonMarkFormatter<'o> {
    options: &'o Options,
    v: Vec<u8>,
    column: usize,
    need_cr: u8,
    last_breakable: usize,
    begin_line: bool,
    begin_content: bool,
    no_linebreaks: bool,
}

#[derive(PartialEq, Clone, Copy)]
enum Escaping {
    Literal,
    Normal,
}

impl<'o> Write for CommonMarkFormatter<'o> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output(buf, false, Escaping::Literal);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'o> CommonMarkFormatter<'o> {
    fn new(options: &'o Options) -> Self {
        CommonMarkFormatter {
            options,
            v: vec![],
            column: 0,
            need_cr: 0,
            last_breakable: 0,
            begin_line: true,
            begin_content: true,
            no_linebreaks: false,
        }
    }

    fn output(&mut self, buf: &[u8], wrap: bool, escaping: Escaping) {
        let wrap = wrap && !self.no_linebreaks;

        let mut k = self.v.len() as i32 - 1;
        while self.need_cr > 0 {
            if k < 0 || self.v[k as usize] == b'\n' {
                k -= 1;
            } else {
                self.v.push(b'\n');
            }
            self.column = 0;
            self.last_breakable = 0;
            self.begin_line = true;
            self.begin_content = true;
            self.need_cr -= 1;
        }

        let mut i = 0;
        while i < buf.len() {
            if self.begin_line {
                self.column = 0;
            }

            let nextc = buf.get(i + 1);
            if buf[i] == b' ' && wrap {
                if !self.begin_line {
                    let last_nonspace = self.v.len();
                    self.v.push(b' ');
                    self.column += 1;
                    self.begin_line = false;
                    self.begin_content = false;
                    while buf.get(i + 1) == Some(&b' ') {
                        i += 1;
                    }
                    if !buf.get(i + 1).map_or(false, |&c| isdigit(c)) {
                        self.last_breakable = last_nonspace;
                    }
                }
            } else if escaping == Escaping::Literal {
                if buf[i] == b'\n' {
                    self.v.push(b'\n');
                    self.column = 0;
                    self.begin_line = true;
                    self.begin_content = true;
                    self.last_breakable = 0;
                } else {
                    self.v.push(buf[i]);
                    self.column += 1;
                    self.begin_line = false;
                    self.begin_content = self.begin_content && isdigit(buf[i]);
                }
            } else {
                self.outc(buf[i], nextc);
                self.begin_line = false;
                self.begin_content = self.begin_content && isdigit(buf[i]);
            }

            if self.options.render.width > 0
                && self.column > self.options.render.width
                && !self.begin_line
                && self.last_breakable > 0
            {
                let remainder = self.v[self.last_breakable + 1..].to_vec();
                self.v.truncate(self.last_breakable);
                self.v.push(b'\n');
                self.v.extend(&remainder);
                self.column = remainder.len();
                self.last_breakable = 0;
                self.begin_line = false;
                self.begin_content = false;
            }

            i += 1;
        }
    }

    fn outc(&mut self, c: u8, nextc: Option<&u8>) {
        let follows_digit = !self.v.is_empty() && isdigit(self.v[self.v.len() - 1]);

        let nextc = nextc.map_or(0, |&c| c);

        let needs_escaping = c < 0x80
            && (c < 0x20
                || c == b'*'
                || c == b'_'
                || c == b'['
                || c == b']'
                || c == b'#'
                || c == b'<'
                || c == b'>'
                || c == b'\\'
                || c == b'`'
                || c == b'$'
                || (c == b'&' && isalpha(nextc))
                || (c == b'!' && nextc == 0x5b)
                || (self.begin_content && (c == b'-' || c == b'+' || c == b'=') && !follows_digit)
                || (self.begin_content
                    && (c == b'.' || c == b')')
                    && follows_digit
                    && (nextc == 0 || isspace(nextc))));

        if needs_escaping {
            if ispunct(c) {
                write!(self.v, "\\{}", c as char).unwrap();
                self.column += 2;
            } else {
                let s = format!("&#{};", c);
                self.v.extend_from_slice(s.as_bytes());
                self.column += s.len();
            }
        } else {
            self.v.push(c);
            self.column += 1;
        }
    }

    fn cr(&mut self) {
        self.need_cr = max(self.need_cr, 1);
    }

    fn blankline(&mut self) {
        self.need_cr = max(self.need_cr, 2);
    }

    fn format<'a>(&mut self, node: &'a AstNode<'a>) {
        enum Phase {
            Pre,
            Post,
        }
        let mut stack = vec![(node, Phase::Pre)];

        while let Some((node, phase)) = stack.pop() {
            match phase {
                Phase::Pre => {
                    if self.format_node(node, true) {
                        stack.push((node, Phase::Post));
                        for ch in node.reverse_children() {
                            stack.push((ch, Phase::Pre));
                        }
                    }
                }
                Phase::Post => {
                    self.format_node(node, false);
                }
            }
        }
    }

    fn format_node<'a>(&mut self, node: &'a AstNode<'a>, entering: bool) -> bool {
        let allow_wrap = self.options.render.width > 0 && !self.options.render.hardbreaks;

        match node.data.borrow().value {
            NodeValue::Document => (),
            NodeValue::Paragraph => self.format_paragraph(entering),
            NodeValue::Heading(ref nh) => self.format_heading(nh.level, entering),
            NodeValue::ThematicBreak => self.format_thematic_break(entering),
            NodeValue::Text(ref literal) => {
                self.format_text(literal.as_bytes(), allow_wrap, entering)
            }
            NodeValue::SoftBreak => self.format_soft_break(allow_wrap, entering),
            NodeValue::LineBreak => self.format_line_break(entering),
            NodeValue::Code(ref code) => {
                self.format_code(code.literal.as_bytes(), allow_wrap, entering)
            }
            NodeValue::Emph => self.format_emph(node),
            NodeValue::Strong => self.format_strong(),
            NodeValue::InlineMath(ref math) => self.format_inline_math(&math.literal, entering),
            NodeValue::BlockMath(ref math) => {
                self.format_block_math(&math.literal, &math.trailing_lines, entering)
            }
        };
        true
    }

    fn format_paragraph(&mut self, entering: bool) {
        if !entering {
            self.blankline();
        }
    }

    fn format_heading(&mut self, level: u8, entering: bool) {
        if entering {
            for _ in 0..level {
                write!(self, "#").unwrap();
            }
            write!(self, " ").unwrap();
            self.begin_content = true;
            self.no_linebreaks = true;
        } else {
            self.no_linebreaks = false;
            self.blankline();
        }
    }

    fn format_thematic_break(&mut self, entering: bool) {
        if entering {
            write!(self, "-----").unwrap();
            self.blankline();
        }
    }

    fn format_text(&mut self, literal: &[u8], allow_wrap: bool, entering: bool) {
        if entering {
            self.output(literal, allow_wrap, Escaping::Normal);
        }
    }

    fn format_soft_break(&mut self, allow_wrap: bool, entering: bool) {
        if entering {
            if !self.no_linebreaks
                && self.options.render.width == 0
                && !self.options.render.hardbreaks
            {
                self.cr();
            } else {
                self.output(b" ", allow_wrap, Escaping::Literal);
            }
        }
    }

    fn format_line_break(&mut self, entering: bool) {
        if entering {
            if !self.options.render.hardbreaks {
                write!(self, "\\").unwrap();
            }
            self.cr();
        }
    }

    fn format_code(&mut self, literal: &[u8], allow_wrap: bool, entering: bool) {
        if entering {
            let numticks = shortest_unused_sequence(literal, b'`');
            for _ in 0..numticks {
                write!(self, "`").unwrap();
            }

            let pad = literal.is_empty()
                || literal[0] == b'`'
                || literal[literal.len() - 1] == b'`';
            if pad {
                write!(self, " ").unwrap();
            }
            self.output(literal, allow_wrap, Escaping::Literal);
            if pad {
                write!(self, " ").unwrap();
            }

            for _ in 0..numticks {
                write!(self, "`").unwrap();
            }
        }
    }

    fn format_emph<'a>(&mut self, node: &'a AstNode<'a>) {
        let emph_delim = if node
            .parent()
            .map_or(false, |n| matches!(n.data.borrow().value, NodeValue::Emph))
            && node.next_sibling().is_none()
            && node.previous_sibling().is_none()
        {
            b'_'
        } else {
            b'*'
        };

        self.write_all(&[emph_delim]).unwrap();
    }

    fn format_strong(&mut self) {
        write!(self, "**").unwrap();
    }

    fn format_inline_math(&mut self, literal: &str, entering: bool) {
        self.output(b"$", false, Escaping::Literal);
        if entering {
            let escaped = escape_math(literal);
            self.output(escaped.as_bytes(), false, Escaping::Literal);
        }
    }

    fn format_block_math(&mut self, literal: &str, trailing_lines: &[String], entering: bool) {
        self.output(b"$$", false, Escaping::Literal);
        if entering {
            let escaped = escape_math(literal);
            self.output(escaped.as_bytes(), false, Escaping::Literal);
            for line in trailing_lines {
                let escaped = escape_math(line);
                self.output(b"\n", false, Escaping::Literal);
                self.output(escaped.as_bytes(), false, Escaping::Literal);
            }
        }
    }
}

// The shortest run of `c` that does not occur in `literal`, so a code span
// can always pick an unambiguous fence.
fn shortest_unused_sequence(literal: &[u8], c: u8) -> usize {
    let mut used = 1u64;
    let mut current = 0;
    for &b in literal {
        if b == c {
            current += 1;
        } else {
            if current > 0 && current < 64 {
                used |= 1 << current;
            }
            current = 0;
        }
    }
    if current > 0 && current < 64 {
        used |= 1 << current;
    }

    let mut n = 1;
    while used & (1 << n) != 0 {
        n += 1;
    }
    n
}
