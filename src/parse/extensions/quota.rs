//! QUOTA productions (RFC 2087 / RFC 9208).

use abnf_core::streaming::sp;
use nom::{
    bytes::streaming::{tag, tag_no_case},
    combinator::map,
    multi::{many0, separated_list0, separated_list1},
    sequence::{delimited, preceded, tuple},
};

use crate::{
    decode::{IMAPResult, ParseOptions},
    parse::{
        core::{astring, atom, number64},
        mailbox::mailbox,
    },
    types::{
        core::{AString, Vec1},
        extensions::quota::{QuotaGet, QuotaSet, Resource},
        response::Data,
    },
};

/// ```abnf
/// quota-root-name = astring
/// ```
#[inline]
pub fn quota_root_name<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], AString<'a>> {
    astring(input, opts)
}

/// ```abnf
/// resource-name = "STORAGE" / "MESSAGE" / "MAILBOX" /
///                 "ANNOTATION-STORAGE" / resource-name-ext
/// resource-name-ext = atom
/// ```
///
/// The atom is consumed whole and classified afterwards, so
/// `STORAGEX` never half-matches `STORAGE`.
pub fn resource_name<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Resource<'a>> {
    map(|i| atom(i, opts), Resource::from)(input)
}

/// ```abnf
/// quota-resource = resource-name SP resource-usage SP resource-limit
/// resource-usage = number64
/// resource-limit = number64
/// ```
fn quota_resource<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], QuotaGet<'a>> {
    let mut parser = tuple((
        |i| resource_name(i, opts),
        sp,
        number64,
        sp,
        number64,
    ));

    let (remaining, (resource, _, usage, _, limit)) = parser(input)?;

    Ok((
        remaining,
        QuotaGet {
            resource,
            usage,
            limit,
        },
    ))
}

/// ```abnf
/// quota-response = "QUOTA" SP quota-root-name SP quota-list
/// quota-list = "(" quota-resource *(SP quota-resource) ")"
/// ```
pub fn quota_response<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Data<'a>> {
    let mut parser = tuple((
        tag_no_case(b"QUOTA "),
        |i| quota_root_name(i, opts),
        delimited(
            tag(b" ("),
            separated_list1(sp, |i| quota_resource(i, opts)),
            tag(b")"),
        ),
    ));

    let (remaining, (_, root, quotas)) = parser(input)?;

    Ok((
        remaining,
        Data::Quota {
            root,
            // Safety: `separated_list1` yields at least one element.
            quotas: Vec1::unvalidated(quotas),
        },
    ))
}

/// ```abnf
/// quotaroot-response = "QUOTAROOT" SP mailbox *(SP quota-root-name)
/// ```
pub fn quotaroot_response<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Data<'a>> {
    let mut parser = tuple((
        tag_no_case(b"QUOTAROOT "),
        |i| mailbox(i, opts),
        many0(preceded(sp, |i| quota_root_name(i, opts))),
    ));

    let (remaining, (_, mailbox, roots)) = parser(input)?;

    Ok((remaining, Data::QuotaRoot { mailbox, roots }))
}

/// ```abnf
/// setquota-list = "(" [setquota-resource *(SP setquota-resource)] ")"
/// setquota-resource = resource-name SP resource-limit
/// ```
pub fn setquota_list<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Vec<QuotaSet<'a>>> {
    delimited(
        tag(b"("),
        separated_list0(
            sp,
            map(
                tuple((|i| resource_name(i, opts), sp, number64)),
                |(resource, _, limit)| QuotaSet { resource, limit },
            ),
        ),
        tag(b")"),
    )(input)
}
