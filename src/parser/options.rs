//! Configuration for the parser and formatters.  Extensions affect both.

#[cfg(feature = "bon")]
use bon::Builder;

/// Umbrella options struct.
#[derive(Default, Debug, Clone)]
pub struct Options {
    /// Enable extensions.
    pub extension: Extension,

    /// Configure render-time options.
    pub render: Render,
}

/// Options to select extensions.
#[derive(Default, Debug, Clone)]
#[cfg_attr(feature = "bon", derive(Builder))]
pub struct Extension {
    /// Enables inline `$...$` and display `$$...$$` math spans.
    ///
    /// A `$` followed by a space, and a span with no closing delimiter on
    /// the same line, stay ordinary text.
    ///
    /// ```rust
    /// # use mathdown::{markdown_to_html, Options};
    /// let mut options = Options::default();
    /// options.extension.math_dollars = true;
    /// assert_eq!(markdown_to_html("$x+1$\n", &options),
    ///            "<p><span class=\"math inline\">x+1</span></p>\n");
    /// assert_eq!(markdown_to_html("$$a_b$$\n", &options),
    ///            "<p><div class=\"math block\">a_b</div></p>\n");
    /// assert_eq!(markdown_to_html("$ not math\n", &options),
    ///            "<p>$ not math</p>\n");
    /// ```
    #[cfg_attr(feature = "bon", builder(default))]
    pub math_dollars: bool,
}

/// Options for formatter behaviour.
#[derive(Default, Debug, Clone)]
#[cfg_attr(feature = "bon", derive(Builder))]
pub struct Render {
    /// Soft line breaks in the input translate into hard line breaks in the
    /// output.
    ///
    /// ```rust
    /// # use mathdown::{markdown_to_html, Options};
    /// let mut options = Options::default();
    /// assert_eq!(markdown_to_html("Hello.\nWorld.\n", &options),
    ///            "<p>Hello.\nWorld.</p>\n");
    ///
    /// options.render.hardbreaks = true;
    /// assert_eq!(markdown_to_html("Hello.\nWorld.\n", &options),
    ///            "<p>Hello.<br />\nWorld.</p>\n");
    /// ```
    #[cfg_attr(feature = "bon", builder(default))]
    pub hardbreaks: bool,

    /// The wrap column when outputting Markdown.  0 disables wrapping.  Math
    /// spans are never wrapped, whatever the width: a span broken across
    /// lines would no longer parse as one.
    ///
    /// ```rust
    /// # use mathdown::{markdown_to_commonmark, Options};
    /// let mut options = Options::default();
    /// options.render.width = 10;
    /// assert_eq!(markdown_to_commonmark("this is a long paragraph\n", &options),
    ///            "this is a\nlong\nparagraph\n");
    /// ```
    #[cfg_attr(feature = "bon", builder(default))]
    pub width: usize,
}
