//! Odds and ends of string munging shared by the parser and formatters.

use crate::ctype::isspace;

pub fn is_line_end_char(ch: u8) -> bool {
    matches!(ch, b'\n' | b'\r')
}

pub fn is_space_or_tab(ch: u8) -> bool {
    matches!(ch, b' ' | b'\t')
}

/// A line consisting only of spaces and tabs is blank.
pub fn is_blank(s: &[u8]) -> bool {
    for &c in s {
        match c {
            b'\n' | b'\r' => return true,
            b' ' | b'\t' => (),
            _ => return false,
        }
    }
    true
}

pub fn rtrim_slice(mut s: &[u8]) -> &[u8] {
    let mut len = s.len();
    while len > 0 && isspace(s[len - 1]) {
        s = &s[..len - 1];
        len -= 1;
    }
    s
}

/// Removes a closing sequence of `#`s from an ATX heading's content, as well
/// as any whitespace around it.  The sequence only closes the heading if
/// whitespace (or nothing) precedes it.
pub fn chop_trailing_hashtags(line: &mut String) {
    let trimmed = line.trim_end_matches(|c| c == ' ' || c == '\t').len();
    line.truncate(trimmed);

    let bytes = line.as_bytes();
    let mut n = bytes.len();
    while n > 0 && bytes[n - 1] == b'#' {
        n -= 1;
    }
    if n != bytes.len() && (n == 0 || is_space_or_tab(bytes[n - 1])) {
        line.truncate(n);
        let trimmed = line.trim_end_matches(|c| c == ' ' || c == '\t').len();
        line.truncate(trimmed);
    }
}

/// Normalizes the contents of a code span: line endings become spaces, and
/// one space of padding is dropped from both ends if the contents have any
/// non-space in them.
pub fn normalize_code(v: &[u8]) -> Vec<u8> {
    let mut r = Vec::with_capacity(v.len());
    let mut contains_nonspace = false;

    let mut i = 0;
    while i < v.len() {
        match v[i] {
            b'\r' => {
                if i + 1 == v.len() || v[i + 1] != b'\n' {
                    r.push(b' ');
                }
            }
            b'\n' => {
                r.push(b' ');
            }
            c => r.push(c),
        }
        if !is_space_or_tab(v[i]) && !is_line_end_char(v[i]) {
            contains_nonspace = true;
        }
        i += 1;
    }

    if contains_nonspace && r.len() >= 2 && r[0] == b' ' && r[r.len() - 1] == b' ' {
        r.remove(0);
        r.pop();
    }

    r
}

/// The substitution chain applied to math content before it is re-emitted as
/// Markdown.  Each unescape/re-escape pair leaves the affected character with
/// exactly one level of escaping no matter how the input was escaped, so the
/// whole chain is stable under repeated application.  The order of the pairs
/// matters: the `\align*` repair inspects the output of the asterisk rule.
const MATH_ESCAPES: [(&str, &str); 14] = [
    // a bare `_` would be read as an emphasis marker
    ("\\_", "_"),
    ("_", "\\_"),
    // `*` too, and it has no escaped form that survives inside math, so it
    // becomes the equivalent control sequence
    ("*", "\\ast "),
    ("\\align\\ast ", "\\align*"),
    // `[x]` and `[X]` would be rewritten into task-list checkboxes
    ("\\[X]", "[X]"),
    ("[X]", "\\[X]"),
    ("\\[x]", "[x]"),
    ("[x]", "\\[x]"),
    // Markdown's escape pass eats one backslash ahead of these; reduce any
    // doubled form so grouping and spacing commands keep a single level
    ("\\\\{", "\\{"),
    ("\\\\}", "\\}"),
    ("\\\\,", "\\,"),
    ("\\\\:", "\\:"),
    ("\\\\;", "\\;"),
    ("\\\\>", "\\>"),
];

/// Escapes math content against the characters Markdown assigns meaning to.
///
/// The transform is character-safety armor, not a LaTeX rewriter: the span's
/// contents stay opaque, but every character the normalized output format
/// would reinterpret (emphasis markers, checkbox brackets, escapes of
/// grouping and spacing commands) is left carrying exactly one level of
/// protection.
pub fn escape_math(content: &str) -> String {
    let mut s = content.to_string();
    for &(from, to) in MATH_ESCAPES.iter() {
        s = s.replace(from, to);
    }
    s
}
