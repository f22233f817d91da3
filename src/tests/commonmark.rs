use std::cell::RefCell;

use super::*;
use ntest::test_case;
use pretty_assertions::assert_eq;

use crate::nodes::{Ast, NodeBlockMath, NodeValue};
use crate::{cm, html, Arena, Node};

fn commonmark_with_math(input: &str, expected: &str) {
    let mut options = Options::default();
    options.extension.math_dollars = true;

    commonmark(input, expected, Some(&options));
}

#[test]
fn commonmark_basics() {
    commonmark("Hello *world*.\n", "Hello *world*.\n", None);
    commonmark("# Title\n\nBody.\n", "# Title\n\nBody.\n", None);
    commonmark("---\n", "-----\n", None);
    commonmark("a `code` span\n", "a `code` span\n", None);
    commonmark("hard  \nbreak\n", "hard\\\nbreak\n", None);
}

#[test_case("Example: $x+1$ end.", "Example: $x+1$ end.\n")]
#[test_case("$$x^2$$ and $1 + 2$", "$$x^2$$ and $1 + 2$\n")]
#[test_case("$a_b$", "$a\\_b$\n")]
#[test_case("$a\\_b$", "$a\\_b$\n")]
#[test_case("$$a_b$$", "$$a\\_b$$\n")]
#[test_case("$x*y$", "$x\\ast y$\n")]
#[test_case("$\\align*{x}$", "$\\align*{x}$\n")]
#[test_case("$[x]$", "$\\[x]$\n")]
#[test_case("$\\[X]$", "$\\[X]$\n")]
#[test_case("$\\{x\\}$", "$\\{x\\}$\n")]
#[test_case("$a\\,b$", "$a\\,b$\n")]
fn math(markdown: &str, cm: &str) {
    commonmark_with_math(markdown, cm);
}

// Normalized output must parse back to the same normalized output.
#[test_case("$a_b$ and _em_ too")]
#[test_case("$$\\mathcal{M}_{n \\times n}(\\mathbf{F})$$")]
#[test_case("prose with $20 and $x*y$ math")]
#[test_case("# $a_b$ in a heading")]
#[test_case("\\$not math\\$")]
fn math_roundtrip_is_stable(markdown: &str) {
    let mut options = Options::default();
    options.extension.math_dollars = true;

    let once = markdown_to_commonmark(markdown, &options);
    let twice = markdown_to_commonmark(&once, &options);
    assert_eq!(once, twice);
}

#[test]
fn dollars_in_prose_are_escaped() {
    // a `$` followed by a space never opens a span, so these stay prose,
    // armored against reinterpretation on the next parse
    commonmark_with_math("$ 20,000 and $ 30,000\n", "\\$ 20,000 and \\$ 30,000\n");
}

#[test]
fn math_is_never_wrapped() {
    let mut options = Options::default();
    options.extension.math_dollars = true;
    options.render.width = 5;

    let output = markdown_to_commonmark("$a b c d$ tail words\n", &options);
    assert_eq!(output, "$a b c d$\ntail\nwords\n");
}

#[test]
fn block_math_trailing_lines() {
    let arena = Arena::new();
    let ast = |val: NodeValue| arena.alloc(Node::new(RefCell::new(Ast::new(val))));
    let root = ast(NodeValue::Document);

    let p = ast(NodeValue::Paragraph);
    p.append(ast(NodeValue::BlockMath(NodeBlockMath {
        literal: "a_b".to_string(),
        trailing_lines: vec!["c_d".to_string()],
    })));
    root.append(p);

    let mut output = vec![];
    cm::format_document(root, &Options::default(), &mut output).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "$$a\\_b\nc\\_d$$\n");

    let mut output = vec![];
    html::format_document(root, &Options::default(), &mut output).unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "<p><div class=\"math block\">a_b\nc_d</div></p>\n"
    );
}
