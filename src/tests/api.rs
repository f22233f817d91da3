use crate::nodes::NodeValue;
use crate::{parse_document, Arena, Options};

#[cfg(feature = "bon")]
use crate::{Extension, Render};

#[test]
fn parse_document_exposes_the_tree() {
    let arena = Arena::new();
    let mut options = Options::default();
    options.extension.math_dollars = true;

    let root = parse_document(&arena, "Hi $x$\n", &options);
    assert!(matches!(root.data.borrow().value, NodeValue::Document));
    assert!(root.data.borrow().value.block());

    let para = root.first_child().unwrap();
    assert!(matches!(para.data.borrow().value, NodeValue::Paragraph));

    let children: Vec<_> = para.children().collect();
    assert_eq!(children.len(), 2);
    assert!(matches!(
        children[0].data.borrow().value,
        NodeValue::Text(ref t) if t == "Hi "
    ));
    match children[1].data.borrow().value {
        NodeValue::InlineMath(ref math) => assert_eq!(math.literal, "x"),
        ref other => panic!("expected inline math, got {:?}", other),
    };
}

#[test]
fn math_spans_are_flat() {
    let arena = Arena::new();
    let mut options = Options::default();
    options.extension.math_dollars = true;

    let root = parse_document(&arena, "$$a *b* c$$\n", &options);
    let para = root.first_child().unwrap();
    let math = para.first_child().unwrap();
    match math.data.borrow().value {
        NodeValue::BlockMath(ref math) => assert_eq!(math.literal, "a *b* c"),
        ref other => panic!("expected block math, got {:?}", other),
    }
    // the contents stay opaque: no children, no emphasis inside
    assert!(math.first_child().is_none());
}

#[cfg(feature = "bon")]
#[test]
fn options_builders() {
    let options = Options {
        extension: Extension::builder().math_dollars(true).build(),
        render: Render::builder().hardbreaks(true).width(72).build(),
    };

    assert!(options.extension.math_dollars);
    assert!(options.render.hardbreaks);
    assert_eq!(options.render.width, 72);
}
