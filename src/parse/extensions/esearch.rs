//! Extended SEARCH productions (RFC 4731) and multi-mailbox source
//! options (RFC 7377).

use abnf_core::streaming::sp;
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, opt, value},
    multi::{many0, separated_list1},
    sequence::{delimited, preceded, tuple},
};

use crate::{
    decode::{IMAPResult, ParseOptions},
    parse::{
        core::{number, nz_number, string},
        extensions::condstore_qresync::mod_sequence_value,
        mailbox::mailbox,
        sequence::sequence_set,
        tagged_ext::parameter,
    },
    types::{
        core::Vec1,
        extensions::esearch::{
            ExtendedSearchResponse, MailboxFilter, SearchCorrelator, SearchReturnData,
            SearchSourceOptions,
        },
        response::Data,
    },
};

/// ```abnf
/// esearch-response = "ESEARCH" [search-correlator] [SP "UID"]
///                    *(SP search-return-data)
/// ```
pub fn esearch_response<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Data<'a>> {
    let mut parser = tuple((
        tag_no_case(b"ESEARCH"),
        opt(|i| search_correlator(i, opts)),
        map(opt(preceded(sp, tag_no_case(b"UID"))), |uid| uid.is_some()),
        many0(preceded(sp, |i| search_return_data(i, opts))),
    ));

    let (remaining, (_, correlator, uid, data)) = parser(input)?;

    Ok((
        remaining,
        Data::ExtendedSearch(ExtendedSearchResponse {
            correlator,
            uid,
            data,
        }),
    ))
}

/// ```abnf
/// search-correlator = SP "(" "TAG" SP tag-string ")"
/// ```
///
/// RFC 7377 extends the correlator with the source mailbox and its
/// UIDVALIDITY:
///
/// ```abnf
/// search-correlator =/ SP "(" "TAG" SP tag-string SP
///                      "MAILBOX" SP mailbox SP
///                      "UIDVALIDITY" SP nz-number ")"
/// ```
fn search_correlator<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], SearchCorrelator<'a>> {
    let mut parser = delimited(
        tag(b" ("),
        tuple((
            preceded(tag_no_case(b"TAG "), |i| string(i, opts)),
            opt(preceded(tag_no_case(b" MAILBOX "), |i| mailbox(i, opts))),
            opt(preceded(tag_no_case(b" UIDVALIDITY "), nz_number)),
        )),
        tag(b")"),
    );

    let (remaining, (tag, mailbox, uid_validity)) = parser(input)?;

    Ok((
        remaining,
        SearchCorrelator {
            tag,
            mailbox,
            uid_validity,
        },
    ))
}

/// ```abnf
/// search-return-data = "MIN" SP nz-number /
///                      "MAX" SP nz-number /
///                      "ALL" SP sequence-set /
///                      "COUNT" SP number /
///                      "MODSEQ" SP mod-sequence-value /  ; RFC 7162
///                      search-ret-data-ext
/// ```
fn search_return_data<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], SearchReturnData<'a>> {
    alt((
        map(
            preceded(tag_no_case(b"MIN "), nz_number),
            SearchReturnData::Min,
        ),
        map(
            preceded(tag_no_case(b"MAX "), nz_number),
            SearchReturnData::Max,
        ),
        map(
            preceded(tag_no_case(b"ALL "), sequence_set),
            SearchReturnData::All,
        ),
        map(
            preceded(tag_no_case(b"COUNT "), number),
            SearchReturnData::Count,
        ),
        map(
            preceded(tag_no_case(b"MODSEQ "), mod_sequence_value),
            SearchReturnData::ModSeq,
        ),
        map(|i| parameter(i, opts), SearchReturnData::Other),
    ))(input)
}

/// ```abnf
/// esearch-source-opts = "IN" SP "(" source-mbox
///                       [SP "(" scope-options ")"] ")"
/// source-mbox = filter-mailboxes *(SP filter-mailboxes)
/// scope-options = scope-option *(SP scope-option)
/// ```
pub fn esearch_source_opts<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], SearchSourceOptions<'a>> {
    let mut parser = delimited(
        tag_no_case(b"IN ("),
        tuple((
            separated_list1(sp, |i| filter_mailboxes(i, opts)),
            opt(preceded(
                sp,
                delimited(
                    tag(b"("),
                    separated_list1(sp, |i| parameter(i, opts)),
                    tag(b")"),
                ),
            )),
        )),
        tag(b")"),
    );

    let (remaining, (filters, scope)) = parser(input)?;

    Ok((
        remaining,
        SearchSourceOptions {
            filters: Vec1::unvalidated(filters),
            scope: scope.unwrap_or_default(),
        },
    ))
}

/// ```abnf
/// filter-mailboxes = "selected" / "selected-delayed" / "inboxes" /
///                    "personal" / "subscribed" /
///                    ("subtree" SP one-or-more-mailbox) /
///                    ("subtree-one" SP one-or-more-mailbox) /
///                    ("mailboxes" SP one-or-more-mailbox)
/// ```
fn filter_mailboxes<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], MailboxFilter<'a>> {
    alt((
        value(
            MailboxFilter::SelectedDelayed,
            tag_no_case(b"selected-delayed"),
        ),
        value(MailboxFilter::Selected, tag_no_case(b"selected")),
        value(MailboxFilter::Inboxes, tag_no_case(b"inboxes")),
        value(MailboxFilter::Personal, tag_no_case(b"personal")),
        value(MailboxFilter::Subscribed, tag_no_case(b"subscribed")),
        map(
            preceded(tag_no_case(b"subtree-one "), |i| {
                one_or_more_mailbox(i, opts)
            }),
            MailboxFilter::SubtreeOne,
        ),
        map(
            preceded(tag_no_case(b"subtree "), |i| one_or_more_mailbox(i, opts)),
            MailboxFilter::Subtree,
        ),
        map(
            preceded(tag_no_case(b"mailboxes "), |i| one_or_more_mailbox(i, opts)),
            MailboxFilter::Mailboxes,
        ),
    ))(input)
}

/// `one-or-more-mailbox = mailbox / "(" mailbox *(SP mailbox) ")"`
fn one_or_more_mailbox<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Vec1<crate::types::mailbox::Mailbox<'a>>> {
    alt((
        map(
            delimited(
                tag(b"("),
                separated_list1(sp, |i| mailbox(i, opts)),
                tag(b")"),
            ),
            Vec1::unvalidated,
        ),
        map(|i| mailbox(i, opts), Vec1::from),
    ))(input)
}
