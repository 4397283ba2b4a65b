//! METADATA productions (RFC 5464).

use abnf_core::streaming::sp;
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, value},
    error::ErrorKind,
    multi::separated_list1,
    sequence::{delimited, preceded, separated_pair},
};

use crate::{
    decode::{IMAPErrorKind, IMAPParseError, IMAPResult, ParseOptions},
    parse::{
        core::{astring, nstring, number},
        extensions::binary::literal8,
        mailbox::mailbox,
    },
    types::{
        core::{NString8, Vec1},
        extensions::metadata::{Entry, EntryValue, MetadataCode, MetadataResponse},
        response::Data,
    },
};

/// ```abnf
/// metadata-resp = "METADATA" SP mailbox SP (entry-values / entry-list)
/// ```
///
/// An empty mailbox string means server annotations.
pub fn metadata_resp<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Data<'a>> {
    let mut parser = preceded(
        tag_no_case(b"METADATA "),
        separated_pair(
            |i| mailbox(i, opts),
            sp,
            alt((
                map(|i| entry_values(i, opts), MetadataResponse::WithValues),
                map(|i| entry_list(i, opts), MetadataResponse::WithoutValues),
            )),
        ),
    );

    let (remaining, (mailbox, items)) = parser(input)?;

    Ok((remaining, Data::Metadata { mailbox, items }))
}

/// ```abnf
/// entry-values = "(" entry-value *(SP entry-value) ")"
/// ```
pub fn entry_values<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Vec1<EntryValue<'a>>> {
    map(
        delimited(
            tag(b"("),
            separated_list1(sp, |i| entry_value(i, opts)),
            tag(b")"),
        ),
        Vec1::unvalidated,
    )(input)
}

/// ```abnf
/// entry-value = entry SP value
/// ```
fn entry_value<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], EntryValue<'a>> {
    map(
        separated_pair(|i| entry(i, opts), sp, |i| metadata_value(i, opts)),
        |(entry, value)| EntryValue { entry, value },
    )(input)
}

/// ```abnf
/// entry = astring
/// ```
///
/// A slash-separated path; must not contain `*` or `%`.
pub fn entry<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Entry<'a>> {
    let (remaining, parsed) = astring(input, opts)?;

    match Entry::try_from(parsed) {
        Ok(entry) => Ok((remaining, entry)),
        Err(_) => Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::Nom(ErrorKind::Verify),
        })),
    }
}

/// ```abnf
/// value = nstring / literal8
/// ```
fn metadata_value<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], NString8<'a>> {
    alt((
        map(|i| nstring(i, opts), NString8::NString),
        map(|i| literal8(i, opts), NString8::Literal8),
    ))(input)
}

/// ```abnf
/// entry-list = entry *(SP entry)
/// ```
pub fn entry_list<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Vec1<Entry<'a>>> {
    map(separated_list1(sp, |i| entry(i, opts)), Vec1::unvalidated)(input)
}

/// ```abnf
/// resp-text-code =/ "METADATA" SP ("LONGENTRIES" SP number /
///                   "MAXSIZE" SP number / "TOOMANY" / "NOPRIVATE")
/// ```
pub fn metadata_code(input: &[u8]) -> IMAPResult<&[u8], MetadataCode> {
    alt((
        map(
            preceded(tag_no_case(b"LONGENTRIES "), number),
            MetadataCode::LongEntries,
        ),
        map(
            preceded(tag_no_case(b"MAXSIZE "), number),
            MetadataCode::MaxSize,
        ),
        value(MetadataCode::TooMany, tag_no_case(b"TOOMANY")),
        value(MetadataCode::NoPrivate, tag_no_case(b"NOPRIVATE")),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::mailbox::Mailbox;

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn test_parse_metadata_with_values() {
        let wire = b"METADATA INBOX (/shared/comment \"My comment\")\r";
        let (_, got) = metadata_resp(wire, &opts()).unwrap();
        match got {
            Data::Metadata {
                mailbox,
                items: MetadataResponse::WithValues(values),
            } => {
                assert_eq!(mailbox, Mailbox::Inbox);
                assert_eq!(values.len(), 1);
                assert_eq!(
                    values.as_slice()[0].entry.as_bytes(),
                    b"/shared/comment"
                );
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_parse_metadata_entry_list() {
        let wire = b"METADATA \"\" /shared/comment /private/comment\r";
        let (_, got) = metadata_resp(wire, &opts()).unwrap();
        assert!(matches!(
            got,
            Data::Metadata {
                items: MetadataResponse::WithoutValues(entries),
                ..
            } if entries.len() == 2
        ));
    }

    #[test]
    fn test_parse_metadata_literal8_value() {
        let wire = b"METADATA INBOX (/shared/blob ~{4}\r\n\x01\x02\x03\x04)\r";
        let (_, got) = metadata_resp(wire, &opts()).unwrap();
        match got {
            Data::Metadata {
                items: MetadataResponse::WithValues(values),
                ..
            } => {
                assert!(matches!(
                    values.as_slice()[0].value,
                    NString8::Literal8(_)
                ));
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_entry_rejects_wildcards() {
        assert!(entry(b"/shared/comment ", &opts()).is_ok());
        // A bare atom run stops at the wildcard anyway; the quoted form
        // carries it into the value and must be rejected.
        assert!(entry(b"\"/shared/com*ent\" ", &opts()).is_err());
    }

    #[test]
    fn test_parse_metadata_code() {
        assert_eq!(
            metadata_code(b"LONGENTRIES 2199]").unwrap().1,
            MetadataCode::LongEntries(2199)
        );
        assert_eq!(
            metadata_code(b"MAXSIZE 1024]").unwrap().1,
            MetadataCode::MaxSize(1024)
        );
        assert_eq!(
            metadata_code(b"TOOMANY]").unwrap().1,
            MetadataCode::TooMany
        );
        assert_eq!(
            metadata_code(b"NOPRIVATE]").unwrap().1,
            MetadataCode::NoPrivate
        );
    }
}
