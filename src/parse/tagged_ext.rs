//! Tagged extension parameters (RFC 4466) and their consumers.

use std::str::from_utf8;

use abnf_core::streaming::sp;
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case, take_while},
    combinator::{map, opt},
    multi::separated_list1,
    sequence::{delimited, preceded, tuple},
};

use crate::{
    decode::{IMAPErrorKind, IMAPParseError, IMAPResult, ParseOptions},
    parse::{
        core::{astring, number64, nz_number},
        extensions::condstore_qresync::mod_sequence_value,
        sequence::sequence_set,
        status::status_option,
    },
    types::{
        core::Vec1,
        params::{Parameter, ReturnOption, SelectParameter, TaggedExtComp, TaggedExtLabel,
                 TaggedExtValue},
    },
    utils::indicators::{is_tagged_label_char, is_tagged_label_fchar},
};

/// `tagged-ext-label = tagged-label-fchar *tagged-label-char`
pub fn tagged_ext_label(input: &[u8]) -> IMAPResult<&[u8], TaggedExtLabel> {
    let Some(first) = input.first() else {
        return Err(nom::Err::Incomplete(nom::Needed::new(1)));
    };

    if !is_tagged_label_fchar(*first) {
        return Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::Nom(nom::error::ErrorKind::Tag),
        }));
    }

    let (remaining, label) = take_while(is_tagged_label_char)(input)?;

    // Safety: the label alphabet is ASCII-only.
    Ok((remaining, TaggedExtLabel::unvalidated(from_utf8(label).unwrap())))
}

/// ```abnf
/// tagged-ext-val = tagged-ext-simple / "(" [tagged-ext-comp] ")"
/// tagged-ext-simple = sequence-set / number
/// ```
///
/// A lone number is also a valid sequence-set, so the number branch
/// effectively catches `0` and 64-bit values.
pub fn tagged_ext_val<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
    remaining_recursions: usize,
) -> IMAPResult<&'a [u8], TaggedExtValue<'a>> {
    alt((
        map(sequence_set, TaggedExtValue::Sequence),
        map(number64, TaggedExtValue::Number),
        map(
            delimited(
                tag(b"("),
                opt(|i| tagged_ext_comp(i, opts, remaining_recursions)),
                tag(b")"),
            ),
            |comp| TaggedExtValue::Comp(comp.unwrap_or_default()),
        ),
    ))(input)
}

/// `tagged-ext-comp = astring / tagged-ext-comp *(SP tagged-ext-comp) /
///                    "(" tagged-ext-comp ")"`
///
/// Realised as a space-separated list of nodes; recursion is bounded.
pub fn tagged_ext_comp<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
    remaining_recursions: usize,
) -> IMAPResult<&'a [u8], Vec<TaggedExtComp<'a>>> {
    if remaining_recursions == 0 {
        return Err(nom::Err::Failure(IMAPParseError {
            input,
            kind: IMAPErrorKind::RecursionLimitExceeded,
        }));
    }

    let next = remaining_recursions.saturating_sub(1);

    separated_list1(
        sp,
        alt((
            map(|i| astring(i, opts), TaggedExtComp::AString),
            map(
                delimited(tag(b"("), move |i| tagged_ext_comp(i, opts, next), tag(b")")),
                |nodes| TaggedExtComp::List(Vec1::unvalidated(nodes)),
            ),
        )),
    )(input)
}

/// A generic extension parameter: `tagged-ext-label [SP tagged-ext-val]`.
///
/// The label `CATENATE` aborts this path with a recoverable mismatch:
/// it is syntactically identical to a tagged extension but is append
/// data, and the caller must disambiguate.
pub fn parameter<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Parameter<'a>> {
    let (remaining, name) = tagged_ext_label(input)?;

    if name.inner().eq_ignore_ascii_case("CATENATE") {
        return Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::Nom(nom::error::ErrorKind::Tag),
        }));
    }

    let (remaining, value) = opt(preceded(sp, |i| {
        tagged_ext_val(i, opts, opts.max_recursion_depth)
    }))(remaining)?;

    Ok((remaining, Parameter { name, value }))
}

/// ```abnf
/// select-param = "CONDSTORE" /
///                "QRESYNC" SP "(" uidvalidity SP mod-sequence-value
///                    [SP known-uids] [SP seq-match-data] ")" /
///                tagged-ext-label [SP tagged-ext-val]
/// ```
pub fn select_param<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], SelectParameter<'a>> {
    alt((
        map(
            preceded(
                tag_no_case(b"QRESYNC ("),
                tuple((
                    nz_number,
                    preceded(sp, mod_sequence_value),
                    opt(preceded(sp, sequence_set)),
                    opt(preceded(
                        sp,
                        delimited(
                            tag(b"("),
                            tuple((sequence_set, preceded(sp, sequence_set))),
                            tag(b")"),
                        ),
                    )),
                )),
            ),
            |(uid_validity, mod_seq, known_uids, seq_match_data)| SelectParameter::Qresync {
                uid_validity,
                mod_seq,
                known_uids,
                seq_match_data,
            },
        ),
        // CONDSTORE carries no value, but a longer label must not be
        // half-matched; reject when label characters follow.
        |i: &'a [u8]| {
            let (remaining, _) = tag_no_case::<_, _, IMAPParseError<&[u8]>>(b"CONDSTORE")(i)?;
            match remaining.first() {
                Some(b) if is_tagged_label_char(*b) => Err(nom::Err::Error(IMAPParseError {
                    input: i,
                    kind: IMAPErrorKind::Nom(nom::error::ErrorKind::Tag),
                })),
                _ => Ok((remaining, SelectParameter::CondStore)),
            }
        },
        map(|i| parameter(i, opts), SelectParameter::Other),
    ))(input)
}

/// `select-params = "(" select-param *(SP select-param) ")"`
pub fn select_params<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Vec<SelectParameter<'a>>> {
    delimited(
        tag(b"("),
        separated_list1(sp, |i| select_param(i, opts)),
        tag(b")"),
    )(input)
}

/// ```abnf
/// return-option = "SUBSCRIBED" / "CHILDREN" / status-option /
///                 option-extension
/// ```
pub fn return_option<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], ReturnOption<'a>> {
    alt((
        map(status_option, |attributes| {
            ReturnOption::Status(Vec1::unvalidated(attributes))
        }),
        |i: &'a [u8]| keyword_option(i, b"SUBSCRIBED", ReturnOption::Subscribed),
        |i: &'a [u8]| keyword_option(i, b"CHILDREN", ReturnOption::Children),
        map(|i| parameter(i, opts), ReturnOption::Other),
    ))(input)
}

/// `return-opts = "RETURN" SP "(" [return-option *(SP return-option)] ")"`
pub fn return_opts<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Vec<ReturnOption<'a>>> {
    preceded(
        tag_no_case(b"RETURN "),
        delimited(
            tag(b"("),
            map(
                opt(separated_list1(sp, |i| return_option(i, opts))),
                Option::unwrap_or_default,
            ),
            tag(b")"),
        ),
    )(input)
}

/// A fixed keyword that must not be the prefix of a longer label.
fn keyword_option<'a, T>(
    input: &'a [u8],
    keyword: &'static [u8],
    result: T,
) -> IMAPResult<&'a [u8], T> {
    let (remaining, _) = tag_no_case::<_, _, IMAPParseError<&[u8]>>(keyword)(input)?;

    match remaining.first() {
        Some(b) if is_tagged_label_char(*b) => Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::Nom(nom::error::ErrorKind::Tag),
        })),
        _ => Ok((remaining, result)),
    }
}
