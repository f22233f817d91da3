use std::cell::RefCell;
use std::str;

use typed_arena::Arena;
use unicode_categories::UnicodeCategories;

use crate::arena_tree::Node;
use crate::ctype::ispunct;
use crate::nodes::{Ast, AstNode, NodeCode, NodeValue};
use crate::parser::math::{self, NodeBlockMath, NodeMath};
use crate::parser::options::Options;
use crate::strings;

const MAXBACKTICKS: usize = 80;

pub struct Subject<'a, 'i, 'o> {
    arena: &'a Arena<AstNode<'a>>,
    options: &'o Options,
    input: &'i [u8],
    pub pos: usize,
    delimiters: Vec<Delimiter<'a>>,
    trailing_spaces: usize,
    backticks: [usize; MAXBACKTICKS + 1],
    scanned_for_backticks: bool,
    special_chars: [bool; 256],
}

// An emphasis delimiter run, remembered until process_emphasis pairs it up.
struct Delimiter<'a> {
    inl: &'a AstNode<'a>,
    length: usize,
    delim_char: u8,
    can_open: bool,
    can_close: bool,
}

// The CommonMark definition of punctuation takes in the symbol categories.
fn is_cmark_punctuation(c: char) -> bool {
    c.is_punctuation() || c.is_symbol()
}

impl<'a, 'i, 'o> Subject<'a, 'i, 'o> {
    pub fn new(arena: &'a Arena<AstNode<'a>>, options: &'o Options, input: &'i [u8]) -> Self {
        let mut s = Subject {
            arena,
            options,
            input,
            pos: 0,
            delimiters: vec![],
            trailing_spaces: 0,
            backticks: [0; MAXBACKTICKS + 1],
            scanned_for_backticks: false,
            special_chars: [false; 256],
        };
        for &c in b"\r\n`\\*_" {
            s.special_chars[c as usize] = true;
        }
        if options.extension.math_dollars {
            s.special_chars[b'$' as usize] = true;
        }
        s
    }

    pub fn parse_inline(&mut self, node: &'a AstNode<'a>) -> bool {
        let c = match self.peek_char() {
            None => return false,
            Some(&c) => c,
        };

        let new_inl = match c {
            b'\r' | b'\n' => Some(self.handle_newline()),
            b'`' => Some(self.handle_backticks()),
            b'\\' => Some(self.handle_backslash()),
            b'*' | b'_' => Some(self.handle_delim(c)),
            b'$' => Some(self.handle_dollars()),
            _ => {
                let endpos = self.find_special_char();
                let mut contents = str::from_utf8(&self.input[self.pos..endpos])
                    .unwrap()
                    .to_string();
                self.pos = endpos;

                // trailing spaces ahead of a line end belong to the break
                if self
                    .peek_char()
                    .map_or(false, |&c| strings::is_line_end_char(c))
                {
                    let trimmed = contents.trim_end_matches(' ').len();
                    self.trailing_spaces = contents.len() - trimmed;
                    contents.truncate(trimmed);
                }

                if contents.is_empty() {
                    None
                } else {
                    Some(self.make_inline(NodeValue::Text(contents)))
                }
            }
        };

        if let Some(inl) = new_inl {
            node.append(inl);
        }

        true
    }

    fn make_inline(&self, value: NodeValue) -> &'a AstNode<'a> {
        self.arena.alloc(Node::new(RefCell::new(Ast::new(value))))
    }

    fn peek_char(&self) -> Option<&u8> {
        self.input.get(self.pos)
    }

    fn find_special_char(&self) -> usize {
        for n in self.pos..self.input.len() {
            if self.special_chars[self.input[n] as usize] {
                return n;
            }
        }
        self.input.len()
    }

    fn find_line_end(&self) -> usize {
        for n in self.pos..self.input.len() {
            if strings::is_line_end_char(self.input[n]) {
                return n;
            }
        }
        self.input.len()
    }

    fn take_while(&mut self, c: u8) -> usize {
        let start_pos = self.pos;
        while self.peek_char() == Some(&c) {
            self.pos += 1;
        }
        self.pos - start_pos
    }

    fn skip_spaces(&mut self) -> bool {
        let mut skipped = false;
        while self
            .peek_char()
            .map_or(false, |&c| c == b' ' || c == b'\t')
        {
            self.pos += 1;
            skipped = true;
        }
        skipped
    }

    fn handle_newline(&mut self) -> &'a AstNode<'a> {
        if self.input[self.pos] == b'\r' {
            self.pos += 1;
        }
        if self.peek_char() == Some(&b'\n') {
            self.pos += 1;
        }
        self.skip_spaces();

        let hardbreak = self.trailing_spaces >= 2;
        self.trailing_spaces = 0;
        self.make_inline(if hardbreak {
            NodeValue::LineBreak
        } else {
            NodeValue::SoftBreak
        })
    }

    fn handle_backslash(&mut self) -> &'a AstNode<'a> {
        self.pos += 1;
        if self.peek_char().map_or(false, |&c| ispunct(c)) {
            self.pos += 1;
            let contents = str::from_utf8(&self.input[self.pos - 1..self.pos])
                .unwrap()
                .to_string();
            self.make_inline(NodeValue::Text(contents))
        } else if self
            .peek_char()
            .map_or(false, |&c| strings::is_line_end_char(c))
        {
            if self.input[self.pos] == b'\r' {
                self.pos += 1;
            }
            if self.peek_char() == Some(&b'\n') {
                self.pos += 1;
            }
            self.skip_spaces();
            self.make_inline(NodeValue::LineBreak)
        } else {
            self.make_inline(NodeValue::Text("\\".to_string()))
        }
    }

    fn scan_to_closing_backtick(&mut self, openticklength: usize) -> Option<usize> {
        if openticklength > MAXBACKTICKS {
            return None;
        }

        if self.scanned_for_backticks && self.backticks[openticklength] <= self.pos {
            return None;
        }

        loop {
            while self.peek_char().map_or(false, |&c| c != b'`') {
                self.pos += 1;
            }
            if self.pos >= self.input.len() {
                self.scanned_for_backticks = true;
                return None;
            }
            let numticks = self.take_while(b'`');
            if numticks <= MAXBACKTICKS {
                self.backticks[numticks] = self.pos - numticks;
            }
            if numticks == openticklength {
                return Some(self.pos);
            }
        }
    }

    fn handle_backticks(&mut self) -> &'a AstNode<'a> {
        let startpos = self.pos;
        let openticks = self.take_while(b'`');
        let endpos = self.scan_to_closing_backtick(openticks);

        match endpos {
            None => {
                self.pos = startpos + openticks;
                self.make_inline(NodeValue::Text("`".repeat(openticks)))
            }
            Some(endpos) => {
                let buf = &self.input[startpos + openticks..endpos - openticks];
                let buf = strings::normalize_code(buf);
                let code = NodeCode {
                    num_backticks: openticks,
                    literal: String::from_utf8(buf).unwrap(),
                };
                self.make_inline(NodeValue::Code(code))
            }
        }
    }

    // Math spans are line-bound: the scanner only ever sees the remainder
    // of the physical line the trigger sits on.  A declined trigger falls
    // back to a one-byte text node, like any other unspecial character.
    fn handle_dollars(&mut self) -> &'a AstNode<'a> {
        let startpos = self.pos;
        if self.options.extension.math_dollars {
            let line_end = self.find_line_end();
            if let Some(span) = math::scan_math_span(&self.input[startpos..line_end]) {
                let literal = str::from_utf8(
                    &self.input[startpos + span.content.start..startpos + span.content.end],
                )
                .unwrap()
                .to_string();
                self.pos = startpos + span.len;
                let value = if span.display {
                    NodeValue::BlockMath(NodeBlockMath {
                        literal,
                        trailing_lines: vec![],
                    })
                } else {
                    NodeValue::InlineMath(NodeMath { literal })
                };
                return self.make_inline(value);
            }
        }
        self.pos += 1;
        self.make_inline(NodeValue::Text("$".to_string()))
    }

    fn char_at(&self, pos: usize) -> char {
        if pos >= self.input.len() {
            return '\n';
        }
        let mut end = pos + 1;
        while end < self.input.len() && self.input[end] & 0xC0 == 0x80 {
            end += 1;
        }
        str::from_utf8(&self.input[pos..end])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or('\u{fffd}')
    }

    fn char_before(&self) -> char {
        if self.pos == 0 {
            return '\n';
        }
        let mut start = self.pos - 1;
        while start > 0 && self.input[start] & 0xC0 == 0x80 {
            start -= 1;
        }
        str::from_utf8(&self.input[start..self.pos])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or('\u{fffd}')
    }

    fn scan_delims(&mut self, c: u8) -> (usize, bool, bool) {
        let before_char = self.char_before();
        let mut numdelims = 0;
        while self.peek_char() == Some(&c) {
            numdelims += 1;
            self.pos += 1;
        }
        let after_char = self.char_at(self.pos);

        let left_flanking = numdelims > 0
            && !after_char.is_whitespace()
            && !(is_cmark_punctuation(after_char)
                && !before_char.is_whitespace()
                && !is_cmark_punctuation(before_char));
        let right_flanking = numdelims > 0
            && !before_char.is_whitespace()
            && !(is_cmark_punctuation(before_char)
                && !after_char.is_whitespace()
                && !is_cmark_punctuation(after_char));

        if c == b'_' {
            (
                numdelims,
                left_flanking && (!right_flanking || is_cmark_punctuation(before_char)),
                right_flanking && (!left_flanking || is_cmark_punctuation(after_char)),
            )
        } else {
            (numdelims, left_flanking, right_flanking)
        }
    }

    fn handle_delim(&mut self, c: u8) -> &'a AstNode<'a> {
        let (numdelims, can_open, can_close) = self.scan_delims(c);

        let contents = str::from_utf8(&self.input[self.pos - numdelims..self.pos])
            .unwrap()
            .to_string();
        let inl = self.make_inline(NodeValue::Text(contents));

        if can_open || can_close {
            self.delimiters.push(Delimiter {
                inl,
                length: numdelims,
                delim_char: c,
                can_open,
                can_close,
            });
        }

        inl
    }

    pub fn process_emphasis(&mut self) {
        let mut closer = 0;
        while closer < self.delimiters.len() {
            if !self.delimiters[closer].can_close {
                closer += 1;
                continue;
            }

            let mut opener = closer;
            let mut found = None;
            while opener > 0 {
                opener -= 1;
                let o = &self.delimiters[opener];
                let c = &self.delimiters[closer];
                if o.delim_char == c.delim_char && o.can_open {
                    // the "multiple of 3" rule forbids some pairings of
                    // runs that can both open and close
                    let odd_match = (c.can_open || o.can_close)
                        && c.length % 3 != 0
                        && (o.length + c.length) % 3 == 0;
                    if !odd_match {
                        found = Some(opener);
                        break;
                    }
                }
            }

            match found {
                Some(opener) => closer = self.insert_emph(opener, closer),
                None => closer += 1,
            }
        }
        self.delimiters.clear();
    }

    // Wraps everything between two matched delimiter runs in an Emph or
    // Strong node, consuming delimiter characters from both runs.  Returns
    // the index to continue processing at.
    fn insert_emph(&mut self, opener: usize, closer: usize) -> usize {
        let use_delims =
            if self.delimiters[opener].length >= 2 && self.delimiters[closer].length >= 2 {
                2
            } else {
                1
            };

        let opener_inl = self.delimiters[opener].inl;
        let closer_inl = self.delimiters[closer].inl;

        self.delimiters[opener].length -= use_delims;
        self.delimiters[closer].length -= use_delims;
        if let NodeValue::Text(ref mut t) = opener_inl.data.borrow_mut().value {
            t.truncate(self.delimiters[opener].length);
        }
        if let NodeValue::Text(ref mut t) = closer_inl.data.borrow_mut().value {
            t.truncate(self.delimiters[closer].length);
        }

        // delimiters between the two runs can never match anything now
        self.delimiters.drain(opener + 1..closer);
        let mut closer = opener + 1;

        let emph = self.make_inline(if use_delims == 1 {
            NodeValue::Emph
        } else {
            NodeValue::Strong
        });

        let mut tmp = opener_inl.next_sibling();
        while let Some(t) = tmp {
            if t.same_node(closer_inl) {
                break;
            }
            tmp = t.next_sibling();
            emph.append(t);
        }
        opener_inl.insert_after(emph);

        if self.delimiters[opener].length == 0 {
            opener_inl.detach();
            self.delimiters.remove(opener);
            closer -= 1;
        }
        if self.delimiters[closer].length == 0 {
            self.delimiters[closer].inl.detach();
            self.delimiters.remove(closer);
        }

        closer
    }
}
