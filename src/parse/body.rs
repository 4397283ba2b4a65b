//! The recursive body-structure grammar.
//!
//! Every recursive production takes a `remaining_recursions` countdown;
//! reaching zero is fatal, so pathological nesting cannot overflow the
//! stack regardless of remaining input.

use abnf_core::streaming::sp;
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, opt},
    multi::{many0, many1, separated_list0, separated_list1},
    sequence::{delimited, preceded, tuple},
};

use crate::{
    decode::{IMAPErrorKind, IMAPParseError, IMAPResult, ParseOptions},
    parse::{
        core::{nil, nstring, number, string},
        envelope::envelope,
    },
    types::{
        body::{
            BasicFields, Body, BodyExtension, BodyStructure, ContentTransferEncoding, Disposition,
            Language, Location, MultiPartExtensionData, SinglePartExtensionData, SpecificFields,
        },
        core::{IString, Vec1},
    },
};

/// `body = "(" (body-type-1part / body-type-mpart) ")"`
pub fn body<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
    remaining_recursions: usize,
) -> IMAPResult<&'a [u8], BodyStructure<'a>> {
    if remaining_recursions == 0 {
        return Err(nom::Err::Failure(IMAPParseError {
            input,
            kind: IMAPErrorKind::RecursionLimitExceeded,
        }));
    }

    let next = remaining_recursions.saturating_sub(1);

    delimited(
        tag(b"("),
        alt((
            move |i| body_type_1part(i, opts, next),
            move |i| body_type_mpart(i, opts, next),
        )),
        tag(b")"),
    )(input)
}

/// ```abnf
/// body-type-1part = (body-type-msg / body-type-text / body-type-basic)
///                   [SP body-ext-1part]
/// ```
///
/// The alternatives are ordered most-specific first: `body-type-msg`
/// embeds a recursive body, `body-type-text` a line count, and
/// `body-type-basic` is the catch-all.
fn body_type_1part<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
    remaining_recursions: usize,
) -> IMAPResult<&'a [u8], BodyStructure<'a>> {
    if remaining_recursions == 0 {
        return Err(nom::Err::Failure(IMAPParseError {
            input,
            kind: IMAPErrorKind::RecursionLimitExceeded,
        }));
    }

    let mut parser = tuple((
        alt((
            |i| body_type_msg(i, opts, remaining_recursions),
            |i| body_type_text(i, opts),
            |i| body_type_basic(i, opts),
        )),
        opt(preceded(sp, |i| body_ext_1part(i, opts, remaining_recursions))),
    ));

    let (remaining, ((basic, specific), extension_data)) = parser(input)?;

    Ok((
        remaining,
        BodyStructure::Single {
            body: Body { basic, specific },
            extension_data,
        },
    ))
}

/// `body-type-basic = media-basic SP body-fields`
///
/// MESSAGE subtype MUST NOT be "RFC822".
fn body_type_basic<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], (BasicFields<'a>, SpecificFields<'a>)> {
    let mut parser = tuple((
        |i| media_basic(i, opts),
        sp,
        |i| body_fields(i, opts),
    ));

    let (remaining, ((r#type, subtype), _, basic)) = parser(input)?;

    Ok((remaining, (basic, SpecificFields::Basic { r#type, subtype })))
}

/// ```abnf
/// body-type-msg = media-message SP body-fields SP envelope SP body SP
///                 body-fld-lines
/// ```
fn body_type_msg<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
    remaining_recursions: usize,
) -> IMAPResult<&'a [u8], (BasicFields<'a>, SpecificFields<'a>)> {
    if remaining_recursions == 0 {
        return Err(nom::Err::Failure(IMAPParseError {
            input,
            kind: IMAPErrorKind::RecursionLimitExceeded,
        }));
    }

    let next = remaining_recursions.saturating_sub(1);

    let mut parser = tuple((
        media_message,
        sp,
        |i| body_fields(i, opts),
        sp,
        |i| envelope(i, opts),
        sp,
        move |i| body(i, opts, next),
        sp,
        number,
    ));

    let (remaining, (_, _, basic, _, envelope, _, body_structure, _, number_of_lines)) =
        parser(input)?;

    Ok((
        remaining,
        (
            basic,
            SpecificFields::Message {
                envelope: Box::new(envelope),
                body_structure: Box::new(body_structure),
                number_of_lines,
            },
        ),
    ))
}

/// `body-type-text = media-text SP body-fields SP body-fld-lines`
fn body_type_text<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], (BasicFields<'a>, SpecificFields<'a>)> {
    let mut parser = tuple((
        |i| media_text(i, opts),
        sp,
        |i| body_fields(i, opts),
        sp,
        number,
    ));

    let (remaining, (subtype, _, basic, _, number_of_lines)) = parser(input)?;

    Ok((
        remaining,
        (
            basic,
            SpecificFields::Text {
                subtype,
                number_of_lines,
            },
        ),
    ))
}

/// ```abnf
/// body-fields = body-fld-param SP body-fld-id SP body-fld-desc SP
///               body-fld-enc SP body-fld-octets
/// ```
fn body_fields<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], BasicFields<'a>> {
    let mut parser = tuple((
        |i| body_fld_param(i, opts),
        sp,
        |i| nstring(i, opts),
        sp,
        |i| nstring(i, opts),
        sp,
        |i| body_fld_enc(i, opts),
        sp,
        body_fld_octets,
    ));

    let (remaining, (parameter_list, _, id, _, description, _, content_transfer_encoding, _, size)) =
        parser(input)?;

    Ok((
        remaining,
        BasicFields {
            parameter_list,
            id,
            description,
            content_transfer_encoding,
            size,
        },
    ))
}

/// ```abnf
/// body-fld-param = "(" string SP string *(SP string SP string) ")" / nil
/// ```
///
/// An empty parenthesised list is tolerated (seen from go-imap peers);
/// insertion order is preserved.
pub(crate) fn body_fld_param<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Vec<(IString<'a>, IString<'a>)>> {
    alt((
        delimited(
            tag(b"("),
            separated_list0(
                sp,
                map(
                    tuple((|i| string(i, opts), sp, |i| string(i, opts))),
                    |(key, _, value)| (key, value),
                ),
            ),
            tag(b")"),
        ),
        map(nil, |_| vec![]),
    ))(input)
}

/// `body-fld-enc = string`, folded to the closed encoding set.
///
/// The RFC's special-cased quoted forms are a subset of `string`.
fn body_fld_enc<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], ContentTransferEncoding<'a>> {
    map(|i| string(i, opts), ContentTransferEncoding::from_istring)(input)
}

/// `body-fld-octets = number`
///
/// Dovecot has been observed sending `-1`; rectified to 0.
fn body_fld_octets(input: &[u8]) -> IMAPResult<&[u8], u32> {
    alt((
        number,
        map(tuple((tag("-"), number)), |(_, _)| {
            log::warn!("rectified negative body-fld-octets to 0");
            0
        }),
    ))(input)
}

/// ```abnf
/// body-ext-1part = body-fld-md5
///                   [SP body-fld-dsp
///                     [SP body-fld-lang
///                       [SP body-fld-loc *(SP body-extension)]
///                     ]
///                   ]
/// ```
///
/// Accepts any valid prefix; a truncated tail is simply absent.
fn body_ext_1part<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
    remaining_recursions: usize,
) -> IMAPResult<&'a [u8], SinglePartExtensionData<'a>> {
    map(
        tuple((
            |i| nstring(i, opts),
            opt(preceded(sp, |i| body_ext_tail(i, opts, remaining_recursions))),
        )),
        |(md5, tail)| SinglePartExtensionData { md5, tail },
    )(input)
}

/// ```abnf
/// body-ext-mpart = body-fld-param
///                   [SP body-fld-dsp
///                     [SP body-fld-lang
///                       [SP body-fld-loc *(SP body-extension)]
///                     ]
///                   ]
/// ```
fn body_ext_mpart<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
    remaining_recursions: usize,
) -> IMAPResult<&'a [u8], MultiPartExtensionData<'a>> {
    map(
        tuple((
            |i| body_fld_param(i, opts),
            opt(preceded(sp, |i| body_ext_tail(i, opts, remaining_recursions))),
        )),
        |(parameter_list, tail)| MultiPartExtensionData {
            parameter_list,
            tail,
        },
    )(input)
}

/// The shared `dsp → lang → loc → *(body-extension)` suffix of both
/// extension forms.
fn body_ext_tail<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
    remaining_recursions: usize,
) -> IMAPResult<&'a [u8], Disposition<'a>> {
    map(
        tuple((
            |i| body_fld_dsp(i, opts),
            opt(map(
                tuple((
                    preceded(sp, |i| body_fld_lang(i, opts)),
                    opt(map(
                        tuple((
                            preceded(sp, |i| nstring(i, opts)),
                            many0(preceded(sp, |i| {
                                body_extension(i, opts, remaining_recursions)
                            })),
                        )),
                        |(location, extensions)| Location {
                            location,
                            extensions,
                        },
                    )),
                )),
                |(language, tail)| Language { language, tail },
            )),
        )),
        |(disposition, tail)| Disposition { disposition, tail },
    )(input)
}

/// `body-fld-dsp = "(" string SP body-fld-param ")" / nil`
#[allow(clippy::type_complexity)]
fn body_fld_dsp<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Option<(IString<'a>, Vec<(IString<'a>, IString<'a>)>)>> {
    alt((
        delimited(
            tag(b"("),
            map(
                tuple((|i| string(i, opts), sp, |i| body_fld_param(i, opts))),
                |(disposition, _, params)| Some((disposition, params)),
            ),
            tag(b")"),
        ),
        map(nil, |_| None),
    ))(input)
}

/// `body-fld-lang = nstring / "(" string *(SP string) ")"`
fn body_fld_lang<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Vec<IString<'a>>> {
    alt((
        delimited(
            tag(b"("),
            separated_list1(sp, |i| string(i, opts)),
            tag(b")"),
        ),
        map(|i| nstring(i, opts), |nstring| match nstring.0 {
            Some(item) => vec![item],
            None => vec![],
        }),
    ))(input)
}

/// ```abnf
/// body-extension = nstring / number /
///                  "(" body-extension *(SP body-extension) ")"
/// ```
///
/// Future expansion; clients MUST accept these fields.
pub fn body_extension<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
    remaining_recursions: usize,
) -> IMAPResult<&'a [u8], BodyExtension<'a>> {
    if remaining_recursions == 0 {
        return Err(nom::Err::Failure(IMAPParseError {
            input,
            kind: IMAPErrorKind::RecursionLimitExceeded,
        }));
    }

    let next = remaining_recursions.saturating_sub(1);

    alt((
        map(|i| nstring(i, opts), BodyExtension::NString),
        map(number, BodyExtension::Number),
        map(
            delimited(
                tag(b"("),
                separated_list1(sp, move |i| body_extension(i, opts, next)),
                tag(b")"),
            ),
            |extensions| BodyExtension::List(Vec1::unvalidated(extensions)),
        ),
    ))(input)
}

/// `body-type-mpart = 1*body SP media-subtype [SP body-ext-mpart]`
fn body_type_mpart<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
    remaining_recursions: usize,
) -> IMAPResult<&'a [u8], BodyStructure<'a>> {
    if remaining_recursions == 0 {
        return Err(nom::Err::Failure(IMAPParseError {
            input,
            kind: IMAPErrorKind::RecursionLimitExceeded,
        }));
    }

    let mut parser = tuple((
        many1(|i| body(i, opts, remaining_recursions)),
        sp,
        |i| string(i, opts),
        opt(preceded(sp, |i| body_ext_mpart(i, opts, remaining_recursions))),
    ));

    let (remaining, (bodies, _, subtype, extension_data)) = parser(input)?;

    Ok((
        remaining,
        BodyStructure::Multi {
            // Safety: `many1` yields at least one element.
            bodies: Vec1::unvalidated(bodies),
            subtype,
            extension_data,
        },
    ))
}

/// `media-basic = string SP media-subtype`
///
/// The RFC's quoted special cases are a subset of `string`.
fn media_basic<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], (IString<'a>, IString<'a>)> {
    let mut parser = tuple((|i| string(i, opts), sp, |i| string(i, opts)));

    let (remaining, (r#type, _, subtype)) = parser(input)?;

    Ok((remaining, (r#type, subtype)))
}

/// `media-message = DQUOTE "MESSAGE" DQUOTE SP DQUOTE "RFC822" DQUOTE`
fn media_message(input: &[u8]) -> IMAPResult<&[u8], &[u8]> {
    tag_no_case(b"\"MESSAGE\" \"RFC822\"")(input)
}

/// `media-text = DQUOTE "TEXT" DQUOTE SP media-subtype`
fn media_text<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], IString<'a>> {
    preceded(tag_no_case(b"\"TEXT\" "), |i| string(i, opts))(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::core::{NString, Quoted};

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    const DEPTH: usize = 100;

    #[test]
    fn test_parse_basic_single_part() {
        // Text part with parameters and a line count.
        let wire = b"(\"TEXT\" \"PLAIN\" (\"CHARSET\" \"utf-8\") NIL NIL \"7BIT\" 1234 42)x";
        let (rem, got) = body(wire, &opts(), DEPTH).unwrap();
        assert_eq!(rem, b"x");

        match got {
            BodyStructure::Single {
                body,
                extension_data,
            } => {
                assert!(extension_data.is_none());
                assert_eq!(
                    body.basic.parameter_list,
                    vec![(
                        IString::Quoted(Quoted::try_from("CHARSET").unwrap()),
                        IString::Quoted(Quoted::try_from("utf-8").unwrap()),
                    )]
                );
                assert_eq!(body.basic.id, NString(None));
                assert_eq!(body.basic.description, NString(None));
                assert_eq!(
                    body.basic.content_transfer_encoding,
                    ContentTransferEncoding::SevenBit
                );
                assert_eq!(body.basic.size, 1234);
                assert_eq!(
                    body.specific,
                    SpecificFields::Text {
                        subtype: IString::Quoted(Quoted::try_from("PLAIN").unwrap()),
                        number_of_lines: 42,
                    }
                );
            }
            other => panic!("expected a single part, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_multipart_recursion() {
        let wire = b"(((\"TEXT\" \"PLAIN\" NIL NIL NIL \"7BIT\" 10 1)(\"TEXT\" \"HTML\" NIL NIL NIL \"7BIT\" 20 2) \"ALTERNATIVE\") \"MIXED\")x";
        let (rem, got) = body(wire, &opts(), DEPTH).unwrap();
        assert_eq!(rem, b"x");

        match got {
            BodyStructure::Multi {
                bodies, subtype, ..
            } => {
                assert_eq!(subtype, IString::Quoted(Quoted::try_from("MIXED").unwrap()));
                assert_eq!(bodies.len(), 1);
                match &bodies.as_slice()[0] {
                    BodyStructure::Multi {
                        bodies, subtype, ..
                    } => {
                        assert_eq!(
                            *subtype,
                            IString::Quoted(Quoted::try_from("ALTERNATIVE").unwrap())
                        );
                        assert_eq!(bodies.len(), 2);
                    }
                    other => panic!("expected the inner multipart, got {other:?}"),
                }
            }
            other => panic!("expected a multipart, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_message_part() {
        let wire = b"(\"MESSAGE\" \"RFC822\" NIL NIL NIL \"7BIT\" 333 (NIL NIL NIL NIL NIL NIL NIL NIL NIL NIL) (\"TEXT\" \"PLAIN\" NIL NIL NIL \"7BIT\" 10 1) 5)x";
        let (rem, got) = body(wire, &opts(), DEPTH).unwrap();
        assert_eq!(rem, b"x");

        match got {
            BodyStructure::Single { body, .. } => match body.specific {
                SpecificFields::Message {
                    number_of_lines, ..
                } => assert_eq!(number_of_lines, 5),
                other => panic!("expected a message part, got {other:?}"),
            },
            other => panic!("expected a single part, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_body_ext_1part_prefixes() {
        for test in [
            b"\"md5\"|xxx".as_ref(),
            b"\"md5\" nil|xxx".as_ref(),
            b"\"md5\" (\"dsp\" nil)|xxx".as_ref(),
            b"\"md5\" (\"dsp\" (\"key\" \"value\")) nil|xxx".as_ref(),
            b"\"md5\" (\"dsp\" (\"key\" \"value\")) \"swedish\"|xxx".as_ref(),
            b"\"md5\" (\"dsp\" (\"key\" \"value\")) (\"german\" \"russian\") \"loc\" (1 \"2\" (nil 4))|xxx".as_ref(),
            b"\"AABB\" NIL NIL NIL 1337|xxx",
            b"\"AABB\" NIL NIL NIL (1337 (1337 (1337 \"FOO\" {0}\r\n)))|xxx",
        ] {
            let (rem, _) = body_ext_1part(test, &opts(), DEPTH).unwrap();
            assert_eq!(rem, b"|xxx");
        }
    }

    #[test]
    fn test_recursion_limit() {
        // One million opening parens must fail fast, not overflow.
        let wire = "(".repeat(1_000_000);
        let got = body(wire.as_bytes(), &opts(), DEPTH);
        assert!(matches!(
            got,
            Err(nom::Err::Failure(IMAPParseError {
                kind: IMAPErrorKind::RecursionLimitExceeded,
                ..
            }))
        ));
    }

    #[test]
    fn test_body_extension_recursion_limit() {
        let wire = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        let got = body_extension(wire.as_bytes(), &opts(), DEPTH);
        assert!(matches!(
            got,
            Err(nom::Err::Failure(IMAPParseError {
                kind: IMAPErrorKind::RecursionLimitExceeded,
                ..
            }))
        ));
    }

    #[test]
    fn test_negative_octets_rectified() {
        let wire = b"(\"TEXT\" \"PLAIN\" NIL NIL NIL \"7BIT\" -1 0)x";
        let (_, got) = body(wire, &opts(), DEPTH).unwrap();
        match got {
            BodyStructure::Single { body, .. } => assert_eq!(body.basic.size, 0),
            other => panic!("expected a single part, got {other:?}"),
        }
    }
}
