//! BINARY productions (RFC 3516 / RFC 4466).

use std::num::NonZeroU32;

use nom::{
    bytes::streaming::{tag, take},
    character::streaming::char,
    combinator::{map, opt},
    multi::separated_list0,
    sequence::{delimited, terminated, tuple},
};

use crate::{
    decode::{IMAPErrorKind, IMAPParseError, IMAPResult, ParseOptions},
    parse::core::{newline, number, number64, nz_number},
    types::core::{Literal, Literal8, LiteralMode},
};

/// ```abnf
/// literal8 = "~{" number ["+"] "}" CRLF *OCTET
/// ```
///
/// A literal permitting arbitrary octets except NUL; the `+` form is
/// non-synchronising. Subject to the same size limit and NUL check as a
/// plain literal.
pub fn literal8<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Literal8<'a>> {
    literal8_limited(input, opts.literal_size_limit)
}

pub(crate) fn literal8_limited(input: &[u8], limit: u32) -> IMAPResult<&[u8], Literal8<'_>> {
    let (remaining, (length, mode)) = terminated(
        delimited(
            tag(b"~{"),
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

    Ok((
        remaining,
        Literal8 {
            data: std::borrow::Cow::Borrowed(data),
            mode,
        },
    ))
}

/// `section-binary = "[" [section-part] "]"`
pub fn section_binary(input: &[u8]) -> IMAPResult<&[u8], Vec<NonZeroU32>> {
    delimited(
        tag(b"["),
        separated_list0(tag(b"."), nz_number),
        tag(b"]"),
    )(input)
}

/// `partial = "<" number "." nz-number ">"`
///
/// The requested octet range. A zero length or a range whose upper
/// bound leaves the 32-bit space is malformed, not a mismatch.
pub fn partial(input: &[u8]) -> IMAPResult<&[u8], (u32, NonZeroU32)> {
    let (remaining, (offset, _, length)) = delimited(
        tag(b"<"),
        tuple((number, tag(b"."), number)),
        tag(b">"),
    )(input)?;

    let Some(length) = NonZeroU32::new(length) else {
        return Err(nom::Err::Failure(IMAPParseError {
            input,
            kind: IMAPErrorKind::BadPartialRange,
        }));
    };

    if offset.checked_add(length.get() - 1).is_none() {
        return Err(nom::Err::Failure(IMAPParseError {
            input,
            kind: IMAPErrorKind::BadPartialRange,
        }));
    }

    Ok((remaining, (offset, length)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn test_parse_literal8() {
        let (rem, got) = literal8(b"~{4}\r\n\xde\xad\xbe\xefx", &opts()).unwrap();
        assert_eq!(rem, b"x");
        assert_eq!(got.data.as_ref(), b"\xde\xad\xbe\xef");

        // NUL stays fatal even in binary literals.
        assert!(matches!(
            literal8(b"~{3}\r\na\x00b", &opts()),
            Err(nom::Err::Failure(IMAPParseError {
                kind: IMAPErrorKind::LiteralContainsNull,
                ..
            }))
        ));

        assert!(matches!(
            literal8(b"~{4+}\r\nab", &opts()),
            Err(nom::Err::Incomplete(_))
        ));
    }

    #[test]
    fn test_parse_section_binary() {
        let (rem, got) = section_binary(b"[] ").unwrap();
        assert_eq!(rem, b" ");
        assert!(got.is_empty());

        let (rem, got) = section_binary(b"[1.2.3] ").unwrap();
        assert_eq!(rem, b" ");
        assert_eq!(got.iter().map(|n| n.get()).collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn test_parse_partial() {
        let (rem, (offset, length)) = partial(b"<0.1024> ").unwrap();
        assert_eq!(rem, b" ");
        assert_eq!(offset, 0);
        assert_eq!(length.get(), 1024);

        // Zero length is malformed, not a mismatch.
        assert!(matches!(
            partial(b"<5.0> "),
            Err(nom::Err::Failure(IMAPParseError {
                kind: IMAPErrorKind::BadPartialRange,
                ..
            }))
        ));

        // Upper bound must stay within 32 bits.
        assert!(matches!(
            partial(b"<4294967295.2> "),
            Err(nom::Err::Failure(IMAPParseError {
                kind: IMAPErrorKind::BadPartialRange,
                ..
            }))
        ));
        assert!(partial(b"<4294967294.2> ").is_ok());
    }
}
