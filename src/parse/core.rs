//! Lexical productions: numbers, strings, atoms and friends.

use std::{num::NonZeroU32, str::from_utf8};

use abnf_core::{is_alpha, is_digit, streaming::dquote};
use base64::{engine::general_purpose::STANDARD as _base64, Engine};
use nom::{
    branch::alt,
    bytes::streaming::{escaped, tag, tag_no_case, take, take_while, take_while1, take_while_m_n},
    character::streaming::{char, digit1, one_of},
    combinator::{map, map_res, opt, recognize},
    sequence::{delimited, terminated, tuple},
};

use crate::{
    decode::{IMAPErrorKind, IMAPParseError, IMAPResult, ParseOptions},
    types::core::{
        AString, Atom, AtomExt, Charset, IString, Literal, LiteralMode, NString, Quoted,
        QuotedChar, Tag, Text,
    },
    utils::{
        indicators::{
            is_any_text_char_except_quoted_specials, is_astring_char, is_atom_char, is_text_char,
        },
        unescape_quoted,
    },
};

// ----- line terminator -----

/// A line terminator: CRLF, a bare LF, or a single leading space before
/// either. The latter two forms are tolerated because deployed servers
/// emit them.
pub fn newline(input: &[u8]) -> IMAPResult<&[u8], ()> {
    fn bare(input: &[u8]) -> IMAPResult<&[u8], ()> {
        match input.first() {
            None => Err(nom::Err::Incomplete(nom::Needed::new(1))),
            Some(b'\n') => Ok((&input[1..], ())),
            Some(b'\r') => match input.get(1) {
                None => Err(nom::Err::Incomplete(nom::Needed::new(1))),
                Some(b'\n') => Ok((&input[2..], ())),
                Some(_) => Err(nom::Err::Error(IMAPParseError {
                    input,
                    kind: IMAPErrorKind::Nom(nom::error::ErrorKind::CrLf),
                })),
            },
            Some(_) => Err(nom::Err::Error(IMAPParseError {
                input,
                kind: IMAPErrorKind::Nom(nom::error::ErrorKind::CrLf),
            })),
        }
    }

    match input.first() {
        Some(b' ') => {
            let (remaining, ()) = bare(&input[1..])?;
            log::warn!("tolerated a space before the line terminator");
            Ok((remaining, ()))
        }
        _ => bare(input),
    }
}

// ----- number -----

/// `number = 1*DIGIT`
///
/// Unsigned 32-bit integer (0 <= n < 4,294,967,296). Overflow is a
/// recoverable mismatch so an outer alternative may retry.
pub fn number(input: &[u8]) -> IMAPResult<&[u8], u32> {
    map_res(
        // Safety: `1*DIGIT` is ASCII-only.
        map(digit1, |val| from_utf8(val).unwrap()),
        str::parse::<u32>,
    )(input)
}

/// `number64 = 1*DIGIT`
///
/// Unsigned 63-bit integer (RFC 9051).
pub fn number64(input: &[u8]) -> IMAPResult<&[u8], u64> {
    map_res(
        // Safety: `1*DIGIT` is ASCII-only.
        map(digit1, |val| from_utf8(val).unwrap()),
        str::parse::<u64>,
    )(input)
}

/// `nz-number = digit-nz *DIGIT`
///
/// The leading-zero ban falls out of the value check: `number` folds
/// `007` to `7`, so a separate character test is only needed for `0`.
pub fn nz_number(input: &[u8]) -> IMAPResult<&[u8], NonZeroU32> {
    if input.first() == Some(&b'0') {
        return Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::BadNumber,
        }));
    }

    map_res(number, NonZeroU32::try_from)(input)
}

// ----- string -----

/// `string = quoted / literal`
pub fn string<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], IString<'a>> {
    alt((
        map(quoted, IString::Quoted),
        map(|i| literal(i, opts), IString::Literal),
    ))(input)
}

/// `quoted = DQUOTE *QUOTED-CHAR DQUOTE`
///
/// Only allocates when escapes actually need replacing.
pub fn quoted(input: &[u8]) -> IMAPResult<&[u8], Quoted> {
    let mut parser = tuple((
        dquote,
        map(
            opt(escaped(
                take_while1(is_any_text_char_except_quoted_specials),
                '\\',
                one_of("\\\""),
            )),
            // Safety: QUOTED-CHAR is ASCII-only.
            |val: Option<&[u8]>| from_utf8(val.unwrap_or_default()).unwrap(),
        ),
        dquote,
    ));

    let (remaining, (_, quoted, _)) = parser(input)?;

    Ok((remaining, Quoted::unvalidated(unescape_quoted(quoted))))
}

/// `QUOTED-CHAR = <any TEXT-CHAR except quoted-specials> / "\" quoted-specials`
pub fn quoted_char(input: &[u8]) -> IMAPResult<&[u8], QuotedChar> {
    map(
        alt((
            map(
                take_while_m_n(1, 1, is_any_text_char_except_quoted_specials),
                |bytes: &[u8]| bytes[0] as char,
            ),
            map(
                tuple((tag("\\"), one_of("\\\""))),
                |(_, escaped): (_, char)| escaped,
            ),
        )),
        QuotedChar::unvalidated,
    )(input)
}

/// `literal = "{" number ["+"] "}" CRLF *CHAR8`
///
/// The `+` marks a non-synchronising literal (RFC 7888). The announced
/// length is checked against the configured limit before any body bytes
/// are taken; NUL in the body is fatal.
pub fn literal<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Literal<'a>> {
    literal_limited(input, opts.literal_size_limit)
}

pub(crate) fn literal_limited(input: &[u8], limit: u32) -> IMAPResult<&[u8], Literal<'_>> {
    let (remaining, (length, mode)) = terminated(
        delimited(
            tag(b"{"),
            tuple((
                number64,
                map(opt(char('+')), |plus| {
                    plus.map(|_| LiteralMode::NonSync).unwrap_or(LiteralMode::Sync)
                }),
            )),
            tag(b"}"),
        ),
        newline,
    )(input)?;

    if length > u64::from(limit) {
        return Err(nom::Err::Failure(IMAPParseError {
            input,
            kind: IMAPErrorKind::LiteralTooLarge {
                length,
                limit: u64::from(limit),
            },
        }));
    }

    // Safety: bounded by the u32 limit above.
    let length = length as u32;

    // Signal the decode layer that the body is still in flight. This does
    // not trigger when any data follows the literal header.
    if remaining.is_empty() {
        return Err(nom::Err::Failure(IMAPParseError {
            input,
            kind: IMAPErrorKind::Literal { length, mode },
        }));
    }

    let (remaining, data) = take(length)(remaining)?;

    if Literal::verify(data).is_err() {
        return Err(nom::Err::Failure(IMAPParseError {
            input,
            kind: IMAPErrorKind::LiteralContainsNull,
        }));
    }

    Ok((remaining, Literal::unvalidated(data, mode)))
}

// ----- astring ----- atom (roughly) or string

/// `astring = 1*ASTRING-CHAR / string`
pub fn astring<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], AString<'a>> {
    alt((
        map(take_while1(is_astring_char), |bytes: &[u8]| {
            // Safety: `is_astring_char` admits ASCII only.
            AString::Atom(AtomExt::unvalidated(from_utf8(bytes).unwrap()))
        }),
        map(|i| string(i, opts), AString::String),
    ))(input)
}

/// `atom = 1*ATOM-CHAR`
///
/// Runs the configured intern hook, if any, so repeated short atoms
/// (flags, capabilities) share canonical storage.
pub fn atom<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Atom<'a>> {
    let (remaining, parsed) = take_while1(is_atom_char)(input)?;

    // Safety: `is_atom_char` admits ASCII only.
    let parsed = from_utf8(parsed).unwrap();

    let atom = match opts.intern.and_then(|intern| intern(parsed)) {
        Some(canonical) => Atom::unvalidated(canonical),
        None => Atom::unvalidated(parsed),
    };

    Ok((remaining, atom))
}

// ----- nstring ----- nil or string

/// `nstring = string / nil`
pub fn nstring<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], NString<'a>> {
    nstring_limited(input, opts.literal_size_limit)
}

/// `nstring` with an explicit literal cap; used in message-body
/// positions where `body_size_limit` applies.
pub(crate) fn nstring_limited(input: &[u8], limit: u32) -> IMAPResult<&[u8], NString<'_>> {
    alt((
        map(
            alt((
                map(quoted, IString::Quoted),
                map(|i| literal_limited(i, limit), IString::Literal),
            )),
            |item| NString(Some(item)),
        ),
        map(nil, |_| NString(None)),
    ))(input)
}

#[inline]
/// `nil = "NIL"`
pub fn nil(input: &[u8]) -> IMAPResult<&[u8], &[u8]> {
    tag_no_case(b"NIL")(input)
}

// ----- text -----

/// `text = 1*TEXT-CHAR`
pub fn text(input: &[u8]) -> IMAPResult<&[u8], Text> {
    // Safety: TEXT-CHAR is ASCII-only.
    map(take_while1(is_text_char), |bytes| {
        Text::unvalidated(from_utf8(bytes).unwrap())
    })(input)
}

// ----- base64 -----

/// `base64 = *(4base64-char) [base64-terminal]`
pub fn base64(input: &[u8]) -> IMAPResult<&[u8], Vec<u8>> {
    map_res(
        recognize(tuple((
            take_while(is_base64_char),
            opt(alt((tag("=="), tag("=")))),
        ))),
        |bytes| _base64.decode(bytes),
    )(input)
}

/// `base64-char = ALPHA / DIGIT / "+" / "/" ; Case-sensitive`
pub fn is_base64_char(i: u8) -> bool {
    is_alpha(i) || is_digit(i) || i == b'+' || i == b'/'
}

// ----- charset -----

/// `charset = atom / quoted`
///
/// Note: see errata id: 261
pub fn charset<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Charset<'a>> {
    alt((
        map(|i| atom(i, opts), Charset::Atom),
        map(quoted, Charset::Quoted),
    ))(input)
}

// ----- tag -----

/// `tag = 1*<any ASTRING-CHAR except "+">`
pub fn tag_imap(input: &[u8]) -> IMAPResult<&[u8], Tag> {
    map(take_while1(|b| is_astring_char(b) && b != b'+'), |val| {
        // Safety: ASCII-only by the character class.
        Tag::unvalidated(from_utf8(val).unwrap())
    })(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn test_newline() {
        assert_eq!(newline(b"\r\nx").unwrap().0, b"x");
        assert_eq!(newline(b"\nx").unwrap().0, b"x");
        assert_eq!(newline(b" \r\nx").unwrap().0, b"x");
        assert_eq!(newline(b" \nx").unwrap().0, b"x");
        assert!(matches!(newline(b""), Err(nom::Err::Incomplete(_))));
        assert!(matches!(newline(b"\r"), Err(nom::Err::Incomplete(_))));
        assert!(matches!(newline(b" \r"), Err(nom::Err::Incomplete(_))));
        assert!(matches!(newline(b"\rx"), Err(nom::Err::Error(_))));
        assert!(matches!(newline(b"  \r\n"), Err(nom::Err::Error(_))));
        assert!(matches!(newline(b"x"), Err(nom::Err::Error(_))));
    }

    #[test]
    fn test_atom() {
        assert!(atom(b" ", &opts()).is_err());
        assert!(matches!(atom(b"", &opts()), Err(nom::Err::Incomplete(_))));

        let (rem, val) = atom(b"a(", &opts()).unwrap();
        assert_eq!(val, Atom::try_from("a").unwrap());
        assert_eq!(rem, b"(");

        let (rem, val) = atom(b"xxx yyy", &opts()).unwrap();
        assert_eq!(val, Atom::try_from("xxx").unwrap());
        assert_eq!(rem, b" yyy");
    }

    #[test]
    fn test_atom_interning() {
        fn intern(value: &str) -> Option<&'static str> {
            value.eq_ignore_ascii_case("Seen").then_some("Seen")
        }

        let options = ParseOptions {
            intern: Some(intern),
            ..ParseOptions::default()
        };

        let (_, val) = atom(b"Seen ", &options).unwrap();
        assert!(matches!(val.into_inner(), std::borrow::Cow::Borrowed(_)));

        let (_, val) = atom(b"Custom ", &options).unwrap();
        assert_eq!(val.inner(), "Custom");
    }

    #[test]
    fn test_quoted() {
        let (rem, val) = quoted(br#""Hello"???"#).unwrap();
        assert_eq!(rem, b"???");
        assert_eq!(val, Quoted::try_from("Hello").unwrap());

        // The empty quoted string.
        let (rem, val) = quoted(br#"""x"#).unwrap();
        assert_eq!(rem, b"x");
        assert_eq!(val, Quoted::try_from("").unwrap());

        // Allowed escapes...
        assert!(quoted(br#""Hello \" "???"#).is_ok());
        assert!(quoted(br#""Hello \\ "???"#).is_ok());

        // Not allowed escapes...
        assert!(quoted(br#""Hello \a "???"#).is_err());
        assert!(quoted(br#""Hello \z "???"#).is_err());

        let (rem, val) = quoted(br#""Hello \"World\""???"#).unwrap();
        assert_eq!(rem, br#"???"#);
        assert_eq!(val, Quoted::try_from("Hello \"World\"").unwrap());

        // Incomplete
        assert!(matches!(quoted(br#"""#), Err(nom::Err::Incomplete(_))));
        assert!(matches!(quoted(br#""\"#), Err(nom::Err::Incomplete(_))));
        assert!(matches!(
            quoted(br#""Hello "#),
            Err(nom::Err::Incomplete(_))
        ));

        // Error
        assert!(matches!(quoted(br#"\"#), Err(nom::Err::Error(_))));
    }

    #[test]
    fn test_quoted_char() {
        let (rem, val) = quoted_char(b"\\\"xxx").unwrap();
        assert_eq!(rem, b"xxx");
        assert_eq!(val, QuotedChar::try_from('"').unwrap());

        let (rem, val) = quoted_char(b"/xxx").unwrap();
        assert_eq!(rem, b"xxx");
        assert_eq!(val, QuotedChar::try_from('/').unwrap());
    }

    #[test]
    fn test_number() {
        assert!(matches!(number(b""), Err(nom::Err::Incomplete(_))));
        assert!(number(b"?").is_err());

        assert_eq!(number(b"0?").unwrap().1, 0);
        assert_eq!(number(b"55?").unwrap().1, 55);
        assert_eq!(number(b"4294967295?").unwrap().1, u32::MAX);
        // Overflow is recoverable.
        assert!(matches!(
            number(b"4294967296?"),
            Err(nom::Err::Error(IMAPParseError {
                kind: IMAPErrorKind::BadNumber,
                ..
            }))
        ));
    }

    #[test]
    fn test_nz_number() {
        assert!(nz_number(b"0?").is_err());
        assert!(nz_number(b"07?").is_err());
        assert_eq!(nz_number(b"55?").unwrap().1.get(), 55);
        assert_eq!(nz_number(b"999?").unwrap().1.get(), 999);
    }

    #[test]
    fn test_literal() {
        assert!(literal(b"{3}\r\n123", &opts()).is_ok());
        assert!(matches!(
            literal(b"{3}\r\n1\x003", &opts()),
            Err(nom::Err::Failure(IMAPParseError {
                kind: IMAPErrorKind::LiteralContainsNull,
                ..
            }))
        ));

        let (rem, val) = literal(b"{3}\r\n123xxx", &opts()).unwrap();
        assert_eq!(rem, b"xxx");
        assert_eq!(val, Literal::try_from(b"123".as_ref()).unwrap());

        let (_, val) = literal(b"{3+}\r\n123", &opts()).unwrap();
        assert_eq!(val.mode(), LiteralMode::NonSync);

        // Header complete but body in flight.
        assert!(matches!(
            literal(b"{5}\r\n", &opts()),
            Err(nom::Err::Failure(IMAPParseError {
                kind: IMAPErrorKind::Literal { length: 5, .. },
                ..
            }))
        ));
        // Body partially buffered.
        assert!(matches!(
            literal(b"{5+}\r\nhe", &opts()),
            Err(nom::Err::Incomplete(_))
        ));
    }

    #[test]
    fn test_literal_limit() {
        let options = ParseOptions {
            literal_size_limit: 4,
            ..ParseOptions::default()
        };

        assert!(literal(b"{4}\r\nabcd", &options).is_ok());
        assert!(matches!(
            literal(b"{5}\r\nabcde", &options),
            Err(nom::Err::Failure(IMAPParseError {
                kind: IMAPErrorKind::LiteralTooLarge {
                    length: 5,
                    limit: 4
                },
                ..
            }))
        ));
        // Far beyond u32, caught against the limit instead of wrapping.
        assert!(matches!(
            literal(b"{99999999999999999}\r\n", &options),
            Err(nom::Err::Failure(IMAPParseError {
                kind: IMAPErrorKind::LiteralTooLarge { .. },
                ..
            }))
        ));
    }

    #[test]
    fn test_nil() {
        assert!(nil(b"nil ").is_ok());
        assert!(nil(b" nil").is_err());
        assert!(nil(b"null").is_err());

        let (rem, _) = nil(b"nilxxx").unwrap();
        assert_eq!(rem, b"xxx");
    }

    #[test]
    fn test_nstring() {
        let (_, val) = nstring(b"NIL ", &opts()).unwrap();
        assert_eq!(val, NString(None));

        let (_, val) = nstring(b"\"ok\" ", &opts()).unwrap();
        assert_eq!(val.as_bytes(), Some(b"ok".as_ref()));

        let (_, val) = nstring(b"{2}\r\nok ", &opts()).unwrap();
        assert_eq!(val.as_bytes(), Some(b"ok".as_ref()));
    }

    #[test]
    fn test_base64() {
        let (rem, val) = base64(b"VGVzdA==\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(val, b"Test");

        let (rem, val) = base64(b"\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert!(val.is_empty());

        // A non-multiple-of-four run is a recoverable mismatch.
        assert!(matches!(base64(b"abcde\r\n"), Err(nom::Err::Error(_))));
    }

    #[test]
    fn test_astring() {
        assert!(astring(b"ok ", &opts()).is_ok());
        assert!(astring(b"ok] ", &opts()).is_ok());
        assert!(astring(b"\"ok\" ", &opts()).is_ok());
        assert!(astring(b"{2}\r\nok ", &opts()).is_ok());
    }

    #[test]
    fn test_tag_imap() {
        let (rem, val) = tag_imap(b"A42 ").unwrap();
        assert_eq!(val.inner(), "A42");
        assert_eq!(rem, b" ");

        // "+" is excluded from tags.
        let (rem, _) = tag_imap(b"A+ ").unwrap();
        assert_eq!(rem, b"+ ");
    }
}
