// Locale-independent ASCII classification, as C's ctype.h would do it.

pub fn isspace(ch: u8) -> bool {
    matches!(ch, 9..=13 | 32)
}

pub fn ispunct(ch: u8) -> bool {
    matches!(ch, 33..=47 | 58..=64 | 91..=96 | 123..=126)
}

pub fn isdigit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

pub fn isalpha(ch: u8) -> bool {
    ch.is_ascii_alphabetic()
}
