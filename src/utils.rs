//! Character classes and small helpers shared by the grammar.

use std::borrow::Cow;

pub mod indicators {
    /// Any 7-bit US-ASCII character, excluding NUL
    ///
    /// `CHAR = %x01-7F`
    pub fn is_char(byte: u8) -> bool {
        matches!(byte, 0x01..=0x7f)
    }

    /// Controls
    ///
    /// `CTL = %x00-1F / %x7F`
    pub fn is_ctl(byte: u8) -> bool {
        matches!(byte, 0x00..=0x1f | 0x7f)
    }

    /// `quoted-specials = DQUOTE / "\"`
    pub fn is_quoted_specials(byte: u8) -> bool {
        byte == b'"' || byte == b'\\'
    }

    pub fn is_any_text_char_except_quoted_specials(byte: u8) -> bool {
        is_text_char(byte) && !is_quoted_specials(byte)
    }

    /// `ASTRING-CHAR = ATOM-CHAR / resp-specials`
    pub fn is_astring_char(i: u8) -> bool {
        is_atom_char(i) || is_resp_specials(i)
    }

    /// `ATOM-CHAR = <any CHAR except atom-specials>`
    pub fn is_atom_char(b: u8) -> bool {
        is_char(b) && !is_atom_specials(b)
    }

    /// `atom-specials = "(" / ")" / "{" / SP / CTL / list-wildcards / quoted-specials / resp-specials`
    pub fn is_atom_specials(i: u8) -> bool {
        match i {
            b'(' | b')' | b'{' | b' ' => true,
            c if is_ctl(c) => true,
            c if is_list_wildcards(c) => true,
            c if is_quoted_specials(c) => true,
            c if is_resp_specials(c) => true,
            _ => false,
        }
    }

    /// `list-wildcards = "%" / "*"`
    pub fn is_list_wildcards(i: u8) -> bool {
        i == b'%' || i == b'*'
    }

    #[inline]
    /// `resp-specials = "]"`
    pub fn is_resp_specials(i: u8) -> bool {
        i == b']'
    }

    #[inline]
    /// `CHAR8 = %x01-ff`
    ///
    /// Any OCTET except NUL, %x00
    pub fn is_char8(i: u8) -> bool {
        i != 0
    }

    /// `TEXT-CHAR = %x01-09 / %x0B-0C / %x0E-7F`
    pub fn is_text_char(c: u8) -> bool {
        matches!(c, 0x01..=0x09 | 0x0b..=0x0c | 0x0e..=0x7f)
    }

    /// `tagged-label-fchar = ALPHA / "-" / "_" / "."`
    pub fn is_tagged_label_fchar(i: u8) -> bool {
        i.is_ascii_alphabetic() || matches!(i, b'-' | b'_' | b'.')
    }

    /// `tagged-label-char = tagged-label-fchar / DIGIT / ":"`
    pub fn is_tagged_label_char(i: u8) -> bool {
        is_tagged_label_fchar(i) || i.is_ascii_digit() || i == b':'
    }

    /// `achar = uchar / "&" / "~"` without the percent-escape form,
    /// i.e. the characters an IMAP URL may carry unescaped.
    ///
    /// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
    /// `sub-delims-sh = "!" / "$" / "'" / "(" / ")" / "*" / "+" / ","`
    pub fn is_url_achar_unencoded(i: u8) -> bool {
        i.is_ascii_alphanumeric()
            || matches!(
                i,
                b'-' | b'.' | b'_' | b'~' | b'!' | b'$' | b'\'' | b'(' | b')' | b'*' | b'+' | b','
                    | b'&' | b'=' // "&" and "=" from achar/bchar
            )
    }

    /// `reg-name` characters of a URL authority (unencoded subset).
    pub fn is_url_reg_name_char(i: u8) -> bool {
        i.is_ascii_alphanumeric()
            || matches!(
                i,
                b'-' | b'.' | b'_' | b'~' | b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*'
                    | b'+' | b',' | b';' | b'='
            )
    }
}

/// Resolves the `\"` and `\\` escapes of a quoted string.
///
/// Only allocates when an escape is actually present.
pub fn unescape_quoted(escaped: &str) -> Cow<str> {
    let mut unescaped = Cow::Borrowed(escaped);

    if unescaped.contains("\\\\") {
        unescaped = Cow::Owned(unescaped.replace("\\\\", "\\"));
    }
    if unescaped.contains("\\\"") {
        unescaped = Cow::Owned(unescaped.replace("\\\"", "\""));
    }

    unescaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_quoted() {
        assert_eq!(unescape_quoted("plain"), "plain");
        assert_eq!(unescape_quoted(r#"say \"hi\""#), r#"say "hi""#);
        assert_eq!(unescape_quoted(r#"back\\slash"#), r#"back\slash"#);
    }

    #[test]
    fn test_indicators() {
        use indicators::*;

        assert!(is_atom_char(b'a'));
        assert!(!is_atom_char(b'('));
        assert!(!is_atom_char(b'*'));
        assert!(!is_atom_char(b']'));
        assert!(is_astring_char(b']'));
        assert!(is_text_char(b' '));
        assert!(!is_text_char(b'\r'));
        assert!(!is_text_char(b'\n'));
        assert!(is_tagged_label_fchar(b'-'));
        assert!(!is_tagged_label_fchar(b'1'));
        assert!(is_tagged_label_char(b'1'));
    }
}
