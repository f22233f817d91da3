use crate::{markdown_to_commonmark, markdown_to_html, Options};
use pretty_assertions::assert_eq;

mod api;
mod commonmark;
mod core;

#[track_caller]
pub fn html(input: &str, expected: &str) {
    html_opts_i(input, expected, |_| ());
}

#[track_caller]
pub fn html_opts_i<F>(input: &str, expected: &str, opts: F)
where
    F: Fn(&mut Options),
{
    let mut options = Options::default();
    opts(&mut options);

    let output = markdown_to_html(input, &options);
    assert_eq!(output, expected);
}

macro_rules! html_opts {
    ([$($optclass:ident.$optname:ident),*], $lhs:expr, $rhs:expr $(,)?) => {
        $crate::tests::html_opts_i($lhs, $rhs, |opts| {
            $(opts.$optclass.$optname = true;)*
        })
    };
}

pub(crate) use html_opts;

#[track_caller]
pub fn commonmark(input: &str, expected: &str, options: Option<&Options>) {
    let defaults = Options::default();
    let options = options.unwrap_or(&defaults);

    let output = markdown_to_commonmark(input, options);
    assert_eq!(output, expected);
}
