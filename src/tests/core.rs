use super::*;

#[test]
fn basic() {
    html(
        "My **document**.\n\nIt's mine.\n\n## Hi!\n\nOkay.\n",
        concat!(
            "<p>My <strong>document</strong>.</p>\n",
            "<p>It's mine.</p>\n",
            "<h2>Hi!</h2>\n",
            "<p>Okay.</p>\n",
        ),
    );
}

#[test]
fn paragraphs_join_lines() {
    html("first\nsecond\n", "<p>first\nsecond</p>\n");
}

#[test]
fn headings() {
    html("# One\n", "<h1>One</h1>\n");
    html("###### Six\n", "<h6>Six</h6>\n");
    html("####### Seven\n", "<p>####### Seven</p>\n");
    html("#hashtag\n", "<p>#hashtag</p>\n");
    html("## Closed ##\n", "<h2>Closed</h2>\n");
    html("## Kept #\ntext\n", "<h2>Kept</h2>\n<p>text</p>\n");
}

#[test]
fn thematic_breaks() {
    html("---\n\n- - -\n\n_        _   _\n", "<hr />\n<hr />\n<hr />\n");
    html("--\n", "<p>--</p>\n");
}

#[test]
fn emphasis() {
    html("*hello* _world_\n", "<p><em>hello</em> <em>world</em></p>\n");
    html("**strong**\n", "<p><strong>strong</strong></p>\n");
    html("***both***\n", "<p><em><strong>both</strong></em></p>\n");
    html("*foo*bar*\n", "<p><em>foo</em>bar*</p>\n");
    html("a * b * c\n", "<p>a * b * c</p>\n");
    html("intra_word_underscores\n", "<p>intra_word_underscores</p>\n");
}

#[test]
fn code_spans() {
    html("`code`\n", "<p><code>code</code></p>\n");
    html(
        "``code with ` tick``\n",
        "<p><code>code with ` tick</code></p>\n",
    );
    html("`unclosed\n", "<p>`unclosed</p>\n");
    html("`*not em*`\n", "<p><code>*not em*</code></p>\n");
}

#[test]
fn line_breaks() {
    html("Hello.\nWorld.\n", "<p>Hello.\nWorld.</p>\n");
    html("Hello.  \nWorld.\n", "<p>Hello.<br />\nWorld.</p>\n");
    html("Hello.\\\nWorld.\n", "<p>Hello.<br />\nWorld.</p>\n");
}

#[test]
fn hardbreaks_option() {
    html_opts!(
        [render.hardbreaks],
        "Hello.\nWorld.\n",
        "<p>Hello.<br />\nWorld.</p>\n",
    );
}

#[test]
fn backslash_escapes() {
    html("\\*not em\\*\n", "<p>*not em*</p>\n");
    html("\\\\\n", "<p>\\</p>\n");
    html("\\a\n", "<p>\\a</p>\n");
}

#[test]
fn html_escaping() {
    html("2 < 3 & 4 > 1\n", "<p>2 &lt; 3 &amp; 4 &gt; 1</p>\n");
    html(
        "\"quotes\" in `<code>`\n",
        "<p>&quot;quotes&quot; in <code>&lt;code&gt;</code></p>\n",
    );
}

#[test]
fn empty_document() {
    html("", "");
    html("\n\n\n", "");
}

#[test]
fn leading_whitespace_is_inert() {
    html("   indented\n", "<p>indented</p>\n");
}
