//! FETCH data items and section addressing.

use std::num::NonZeroU32;

use abnf_core::streaming::sp;
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, opt, value},
    multi::{separated_list0, separated_list1},
    sequence::{delimited, preceded, tuple},
};

use crate::{
    decode::{IMAPResult, ParseOptions},
    parse::{
        body::body,
        core::{astring, nstring_limited, number, number64, nz_number},
        datetime::date_time,
        envelope::envelope,
        extensions::{
            binary::{literal8_limited, section_binary},
            condstore_qresync::fetch_mod_resp,
            gmail::gmail_label,
        },
        flag::flag_fetch,
    },
    types::{
        core::{AString, NString8, Vec1},
        fetch::{MessageDataItem, Part, Section},
    },
};

/// ```abnf
/// msg-att = "(" (msg-att-dynamic / msg-att-static)
///           *(SP (msg-att-dynamic / msg-att-static)) ")"
/// ```
pub fn msg_att<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Vec1<MessageDataItem<'a>>> {
    delimited(
        tag(b"("),
        map(
            separated_list1(sp, alt((
                |i| msg_att_dynamic(i, opts),
                |i| msg_att_static(i, opts),
            ))),
            Vec1::unvalidated,
        ),
        tag(b")"),
    )(input)
}

/// `msg-att-dynamic = "FLAGS" SP "(" [flag-fetch *(SP flag-fetch)] ")"`
///
/// Note: MAY change for a message.
fn msg_att_dynamic<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], MessageDataItem<'a>> {
    let mut parser = tuple((
        tag_no_case(b"FLAGS"),
        sp,
        delimited(
            tag(b"("),
            opt(separated_list1(sp, |i| flag_fetch(i, opts))),
            tag(b")"),
        ),
    ));

    let (remaining, (_, _, flags)) = parser(input)?;

    Ok((remaining, MessageDataItem::Flags(flags.unwrap_or_default())))
}

/// ```abnf
/// msg-att-static = "ENVELOPE" SP envelope /
///                  "INTERNALDATE" SP date-time /
///                  "RFC822" [".HEADER" / ".TEXT"] SP nstring /
///                  "RFC822.SIZE" SP number /
///                  "BODY" ["STRUCTURE"] SP body /
///                  "BODY" section ["<" number ">"] SP nstring /
///                  "UID" SP uniqueid /
///                  "MODSEQ" SP "(" permsg-modsequence ")" /        ; RFC 7162
///                  "BINARY" section-binary SP (nstring / literal8) / ; RFC 3516
///                  "BINARY.SIZE" section-binary SP number /          ; RFC 3516
///                  "X-GM-MSGID" SP number64 /                        ; Gmail
///                  "X-GM-THRID" SP number64 /                        ; Gmail
///                  "X-GM-LABELS" SP "(" [label *(SP label)] ")"      ; Gmail
/// ```
///
/// Note: MUST NOT change for a message. Message-body payloads are
/// additionally capped by `body_size_limit`.
fn msg_att_static<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], MessageDataItem<'a>> {
    let body_limit = opts.body_size_limit.min(opts.literal_size_limit);

    alt((
        map(
            tuple((tag_no_case(b"ENVELOPE"), sp, |i| envelope(i, opts))),
            |(_, _, envelope)| MessageDataItem::Envelope(envelope),
        ),
        map(
            tuple((tag_no_case(b"INTERNALDATE"), sp, date_time)),
            |(_, _, date_time)| MessageDataItem::InternalDate(date_time),
        ),
        map(
            tuple((tag_no_case(b"RFC822.HEADER"), sp, move |i| {
                nstring_limited(i, body_limit)
            })),
            |(_, _, nstring)| MessageDataItem::Rfc822Header(nstring),
        ),
        map(
            tuple((tag_no_case(b"RFC822.TEXT"), sp, move |i| {
                nstring_limited(i, body_limit)
            })),
            |(_, _, nstring)| MessageDataItem::Rfc822Text(nstring),
        ),
        map(
            tuple((tag_no_case(b"RFC822.SIZE"), sp, number)),
            |(_, _, size)| MessageDataItem::Rfc822Size(size),
        ),
        map(
            tuple((tag_no_case(b"RFC822"), sp, move |i| {
                nstring_limited(i, body_limit)
            })),
            |(_, _, nstring)| MessageDataItem::Rfc822(nstring),
        ),
        map(
            tuple((tag_no_case(b"BODYSTRUCTURE"), sp, |i| {
                body(i, opts, opts.max_recursion_depth)
            })),
            |(_, _, body)| MessageDataItem::BodyStructure(body),
        ),
        map(
            tuple((tag_no_case(b"BODY"), sp, |i| {
                body(i, opts, opts.max_recursion_depth)
            })),
            |(_, _, body)| MessageDataItem::Body(body),
        ),
        map(
            tuple((
                tag_no_case(b"BODY"),
                |i| section(i, opts),
                opt(delimited(tag(b"<"), number, tag(b">"))),
                sp,
                move |i| nstring_limited(i, body_limit),
            )),
            |(_, section, origin, _, data)| MessageDataItem::BodyExt {
                section,
                origin,
                data,
            },
        ),
        map(
            tuple((tag_no_case(b"UID"), sp, uniqueid)),
            |(_, _, uid)| MessageDataItem::Uid(uid),
        ),
        map(fetch_mod_resp, MessageDataItem::ModSeq),
        map(
            tuple((tag_no_case(b"BINARY.SIZE"), section_binary, sp, number)),
            |(_, section, _, size)| MessageDataItem::BinarySize { section, size },
        ),
        map(
            tuple((
                tag_no_case(b"BINARY"),
                section_binary,
                sp,
                alt((
                    map(move |i| nstring_limited(i, body_limit), NString8::NString),
                    map(move |i| literal8_limited(i, body_limit), NString8::Literal8),
                )),
            )),
            |(_, section, _, value)| MessageDataItem::Binary { section, value },
        ),
        map(
            preceded(tag_no_case(b"X-GM-MSGID "), number64),
            MessageDataItem::GmailMessageId,
        ),
        map(
            preceded(tag_no_case(b"X-GM-THRID "), number64),
            MessageDataItem::GmailThreadId,
        ),
        map(
            preceded(
                tag_no_case(b"X-GM-LABELS "),
                delimited(
                    tag(b"("),
                    separated_list0(sp, |i| gmail_label(i, opts)),
                    tag(b")"),
                ),
            ),
            MessageDataItem::GmailLabels,
        ),
    ))(input)
}

#[inline]
/// `uniqueid = nz-number`
///
/// Note: Strictly ascending.
pub fn uniqueid(input: &[u8]) -> IMAPResult<&[u8], NonZeroU32> {
    nz_number(input)
}

/// `section = "[" [section-spec] "]"`
///
/// The empty bracket pair addresses the complete body.
pub fn section<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Option<Section<'a>>> {
    delimited(tag(b"["), opt(|i| section_spec(i, opts)), tag(b"]"))(input)
}

/// `section-spec = section-msgtext / (section-part ["." section-text])`
fn section_spec<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Section<'a>> {
    alt((
        map(|i| section_msgtext(i, opts), |kind| kind.into_section(None)),
        map(
            tuple((
                section_part,
                opt(preceded(tag(b"."), |i| section_text(i, opts))),
            )),
            |(part, kind)| match kind {
                Some(kind) => kind.into_section(Some(Part(part))),
                None => Section::Part(Part(part)),
            },
        ),
    ))(input)
}

/// The part-relative specifier kinds shared by `section-msgtext` and
/// `section-text`.
#[derive(Clone)]
enum SectionKind<'a> {
    Header,
    HeaderFields(Vec1<AString<'a>>),
    HeaderFieldsNot(Vec1<AString<'a>>),
    Text,
    Mime,
}

impl<'a> SectionKind<'a> {
    fn into_section(self, part: Option<Part>) -> Section<'a> {
        match self {
            Self::Header => Section::Header(part),
            Self::HeaderFields(fields) => Section::HeaderFields(part, fields),
            Self::HeaderFieldsNot(fields) => Section::HeaderFieldsNot(part, fields),
            Self::Text => Section::Text(part),
            // `MIME` is only reachable through `section-text`, which
            // always has a leading part.
            Self::Mime => Section::Mime(part.expect("section-text always carries a part")),
        }
    }
}

/// `section-msgtext = "HEADER" / "HEADER.FIELDS" [".NOT"] SP header-list / "TEXT"`
///
/// The most specific prefix is listed first so `HEADER.FIELDS.NOT`
/// never half-matches `HEADER.FIELDS` or `HEADER`.
fn section_msgtext<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], SectionKind<'a>> {
    alt((
        map(
            tuple((tag_no_case(b"HEADER.FIELDS.NOT"), sp, |i| header_list(i, opts))),
            |(_, _, fields)| SectionKind::HeaderFieldsNot(fields),
        ),
        map(
            tuple((tag_no_case(b"HEADER.FIELDS"), sp, |i| header_list(i, opts))),
            |(_, _, fields)| SectionKind::HeaderFields(fields),
        ),
        value(SectionKind::Header, tag_no_case(b"HEADER")),
        value(SectionKind::Text, tag_no_case(b"TEXT")),
    ))(input)
}

#[inline]
/// `section-part = nz-number *("." nz-number)`
///
/// Body part nesting.
fn section_part(input: &[u8]) -> IMAPResult<&[u8], Vec1<NonZeroU32>> {
    map(separated_list1(tag(b"."), nz_number), Vec1::unvalidated)(input)
}

/// `section-text = section-msgtext / "MIME"`
///
/// Text other than the actual body part (headers, etc.).
fn section_text<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], SectionKind<'a>> {
    alt((
        |i| section_msgtext(i, opts),
        value(SectionKind::Mime, tag_no_case(b"MIME")),
    ))(input)
}

/// `header-list = "(" header-fld-name *(SP header-fld-name) ")"`
fn header_list<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Vec1<AString<'a>>> {
    map(
        delimited(
            tag(b"("),
            separated_list1(sp, |i| astring(i, opts)),
            tag(b")"),
        ),
        Vec1::unvalidated,
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{core::NString, flag::Flag};

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn test_parse_section() {
        let (_, got) = section(b"[] ", &opts()).unwrap();
        assert!(got.is_none());

        let (_, got) = section(b"[HEADER] ", &opts()).unwrap();
        assert_eq!(got, Some(Section::Header(None)));

        let (_, got) = section(b"[1.2.3] ", &opts()).unwrap();
        match got {
            Some(Section::Part(Part(part))) => {
                assert_eq!(part.iter().map(|n| n.get()).collect::<Vec<_>>(), [1, 2, 3]);
            }
            other => panic!("unexpected section: {other:?}"),
        }

        let (_, got) = section(b"[4.2.TEXT] ", &opts()).unwrap();
        assert!(matches!(got, Some(Section::Text(Some(_)))));

        let (_, got) = section(b"[1.MIME] ", &opts()).unwrap();
        assert!(matches!(got, Some(Section::Mime(_))));

        let (_, got) = section(b"[HEADER.FIELDS (Subject Date)] ", &opts()).unwrap();
        match got {
            Some(Section::HeaderFields(None, fields)) => assert_eq!(fields.len(), 2),
            other => panic!("unexpected section: {other:?}"),
        }

        let (_, got) = section(b"[HEADER.FIELDS.NOT (Received)] ", &opts()).unwrap();
        assert!(matches!(got, Some(Section::HeaderFieldsNot(None, _))));
    }

    #[test]
    fn test_parse_msg_att() {
        let wire = b"(UID 42 FLAGS (\\Seen) RFC822.SIZE 1337)x";
        let (rem, got) = msg_att(wire, &opts()).unwrap();
        assert_eq!(rem, b"x");
        assert_eq!(
            got.as_slice(),
            &[
                MessageDataItem::Uid(NonZeroU32::new(42).unwrap()),
                MessageDataItem::Flags(vec![Flag::Seen.into()]),
                MessageDataItem::Rfc822Size(1337),
            ]
        );
    }

    #[test]
    fn test_parse_msg_att_body_data() {
        let wire = b"(BODY[HEADER] {7}\r\nX-Y: Z\n)x";
        let (rem, got) = msg_att(wire, &opts()).unwrap();
        assert_eq!(rem, b"x");
        match &got.as_slice()[0] {
            MessageDataItem::BodyExt {
                section,
                origin,
                data,
            } => {
                assert_eq!(*section, Some(Section::Header(None)));
                assert_eq!(*origin, None);
                assert_eq!(data.as_bytes(), Some(b"X-Y: Z\n".as_ref()));
            }
            other => panic!("unexpected item: {other:?}"),
        }
    }

    #[test]
    fn test_parse_msg_att_origin() {
        let wire = b"(BODY[]<1024> \"x\")y";
        let (_, got) = msg_att(wire, &opts()).unwrap();
        match &got.as_slice()[0] {
            MessageDataItem::BodyExt {
                section: None,
                origin: Some(1024),
                ..
            } => {}
            other => panic!("unexpected item: {other:?}"),
        }
    }

    #[test]
    fn test_parse_msg_att_modseq_and_gmail() {
        let wire = b"(MODSEQ (624140003) X-GM-MSGID 1278455344230334865 X-GM-LABELS (\\Inbox work))x";
        let (_, got) = msg_att(wire, &opts()).unwrap();
        assert!(matches!(
            got.as_slice()[0],
            MessageDataItem::ModSeq(modseq) if modseq.get() == 624140003
        ));
        assert!(matches!(
            got.as_slice()[1],
            MessageDataItem::GmailMessageId(1278455344230334865)
        ));
        assert!(matches!(
            &got.as_slice()[2],
            MessageDataItem::GmailLabels(labels) if labels.len() == 2
        ));
    }

    #[test]
    fn test_parse_msg_att_binary() {
        let wire = b"(BINARY[1.2] ~{4}\r\n\x01\x02\x03\x04 BINARY.SIZE[1] 99)x";
        let (_, got) = msg_att(wire, &opts()).unwrap();
        assert!(matches!(
            &got.as_slice()[0],
            MessageDataItem::Binary { value: NString8::Literal8(_), .. }
        ));
        assert!(matches!(
            &got.as_slice()[1],
            MessageDataItem::BinarySize { size: 99, .. }
        ));
    }

    #[test]
    fn test_parse_msg_att_rfc822_nil() {
        let wire = b"(RFC822 NIL)x";
        let (_, got) = msg_att(wire, &opts()).unwrap();
        assert_eq!(got.as_slice()[0], MessageDataItem::Rfc822(NString(None)));
    }

    #[test]
    fn test_body_size_limit() {
        let tight = ParseOptions {
            body_size_limit: 4,
            ..ParseOptions::default()
        };

        assert!(msg_att(b"(RFC822 {4}\r\nabcd)x", &tight).is_ok());
        assert!(matches!(
            msg_att(b"(RFC822 {5}\r\nabcde)x", &tight),
            Err(nom::Err::Failure(_))
        ));
    }
}
