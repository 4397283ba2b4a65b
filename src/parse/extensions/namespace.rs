//! NAMESPACE productions (RFC 2342).

use abnf_core::streaming::sp;
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, value},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, preceded, tuple},
};

use crate::{
    decode::{IMAPResult, ParseOptions},
    parse::core::{nil, quoted_char, string},
    types::{
        core::Vec1,
        extensions::namespace::{Namespace, NamespaceExtension, Namespaces},
        response::Data,
    },
};

/// ```abnf
/// namespace-response = "NAMESPACE" SP namespace SP namespace SP namespace
/// ```
///
/// The three lists are personal, other-user and shared.
pub fn namespace_response<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Data<'a>> {
    let mut parser = tuple((
        tag_no_case(b"NAMESPACE "),
        |i| namespaces(i, opts),
        preceded(sp, |i| namespaces(i, opts)),
        preceded(sp, |i| namespaces(i, opts)),
    ));

    let (remaining, (_, personal, other, shared)) = parser(input)?;

    Ok((
        remaining,
        Data::Namespace {
            personal,
            other,
            shared,
        },
    ))
}

/// ```abnf
/// namespace = nil / "(" 1*namespace-descr ")"
/// ```
fn namespaces<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Namespaces<'a>> {
    alt((
        delimited(tag(b"("), many1(|i| namespace_descr(i, opts)), tag(b")")),
        map(nil, |_| Vec::new()),
    ))(input)
}

/// ```abnf
/// namespace-descr = "(" string SP
///                   (DQUOTE QUOTED-CHAR DQUOTE / nil)
///                   *namespace-response-extension ")"
/// ```
fn namespace_descr<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Namespace<'a>> {
    let delimiter = alt((
        map(delimited(tag(b"\""), quoted_char, tag(b"\"")), Some),
        value(None, nil),
    ));

    map(
        delimited(
            tag(b"("),
            tuple((
                |i| string(i, opts),
                preceded(sp, delimiter),
                many0(|i| namespace_response_extension(i, opts)),
            )),
            tag(b")"),
        ),
        |(prefix, delimiter, extensions)| Namespace {
            prefix,
            delimiter,
            extensions,
        },
    )(input)
}

/// ```abnf
/// namespace-response-extension = SP string SP "(" string *(SP string) ")"
/// ```
fn namespace_response_extension<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], NamespaceExtension<'a>> {
    map(
        preceded(
            sp,
            tuple((
                |i| string(i, opts),
                preceded(
                    sp,
                    delimited(
                        tag(b"("),
                        separated_list1(sp, |i| string(i, opts)),
                        tag(b")"),
                    ),
                ),
            )),
        ),
        |(key, values)| NamespaceExtension {
            key,
            values: Vec1::unvalidated(values),
        },
    )(input)
}
