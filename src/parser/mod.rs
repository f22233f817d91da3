mod inlines;
pub mod math;
pub mod options;

use std::cell::RefCell;
use std::mem;

use typed_arena::Arena;

use crate::arena_tree::Node;
use crate::nodes::{Ast, AstNode, NodeHeading, NodeValue};
use crate::parser::inlines::Subject;
use crate::parser::options::Options;
use crate::scanners;
use crate::strings;

/// Parse a Markdown document to an AST.
///
/// See the documentation of the crate root for an example.
pub fn parse_document<'a>(
    arena: &'a Arena<AstNode<'a>>,
    md: &str,
    options: &Options,
) -> &'a AstNode<'a> {
    let root = arena.alloc(Node::new(RefCell::new(Ast::new(NodeValue::Document))));
    let mut parser = Parser::new(arena, root, options);
    parser.parse(md);
    parser.finish()
}

struct Parser<'a, 'o> {
    arena: &'a Arena<AstNode<'a>>,
    options: &'o Options,
    root: &'a AstNode<'a>,
}

impl<'a, 'o> Parser<'a, 'o> {
    fn new(arena: &'a Arena<AstNode<'a>>, root: &'a AstNode<'a>, options: &'o Options) -> Self {
        Parser {
            arena,
            options,
            root,
        }
    }

    fn parse(&mut self, md: &str) {
        for line in md.split_inclusive('\n') {
            self.process_line(line);
        }
    }

    fn process_line(&mut self, line: &str) {
        let line = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(line);

        if strings::is_blank(line.as_bytes()) {
            self.finalize_open_block();
            return;
        }

        // no indented code in the dialect, so leading whitespace is inert
        let line = line.trim_start_matches(|c| c == ' ' || c == '\t');

        if let Some((level, offset)) = scanners::atx_heading_start(line.as_bytes()) {
            self.finalize_open_block();
            let heading = self.make_block(NodeValue::Heading(NodeHeading { level }));
            let mut content = line[offset..]
                .trim_start_matches(|c| c == ' ' || c == '\t')
                .to_string();
            strings::chop_trailing_hashtags(&mut content);
            {
                let mut ast = heading.data.borrow_mut();
                ast.content = content;
                ast.open = false;
            }
            self.root.append(heading);
        } else if scanners::thematic_break(line.as_bytes()) {
            self.finalize_open_block();
            let tbreak = self.make_block(NodeValue::ThematicBreak);
            tbreak.data.borrow_mut().open = false;
            self.root.append(tbreak);
        } else {
            let para = self.open_paragraph();
            let mut ast = para.data.borrow_mut();
            ast.content.push_str(line);
            ast.content.push('\n');
        }
    }

    fn make_block(&self, value: NodeValue) -> &'a AstNode<'a> {
        self.arena.alloc(Node::new(RefCell::new(Ast::new(value))))
    }

    fn open_paragraph(&mut self) -> &'a AstNode<'a> {
        if let Some(last) = self.root.last_child() {
            let ast = last.data.borrow();
            if ast.open && matches!(ast.value, NodeValue::Paragraph) {
                return last;
            }
        }
        let para = self.make_block(NodeValue::Paragraph);
        self.root.append(para);
        para
    }

    fn finalize_open_block(&mut self) {
        if let Some(last) = self.root.last_child() {
            last.data.borrow_mut().open = false;
        }
    }

    fn finish(&mut self) -> &'a AstNode<'a> {
        self.finalize_open_block();
        self.process_inlines();
        self.root
    }

    fn process_inlines(&mut self) {
        for block in self.root.children() {
            if block.data.borrow().value.accepts_lines() {
                self.parse_inlines(block);
            }
        }
    }

    fn parse_inlines(&mut self, node: &'a AstNode<'a>) {
        let content = mem::take(&mut node.data.borrow_mut().content);
        let content = strings::rtrim_slice(content.as_bytes());

        let mut subj = Subject::new(self.arena, self.options, content);
        while subj.parse_inline(node) {}
        subj.process_emphasis();
    }
}
