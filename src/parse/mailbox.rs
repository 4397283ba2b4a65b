//! Mailbox productions and the mailbox-data responses.

use abnf_core::streaming::{dquote, sp};
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, opt, value},
    multi::{many0, separated_list1},
    sequence::{delimited, preceded, terminated, tuple},
};

use crate::{
    decode::{IMAPResult, ParseOptions},
    parse::{
        core::{astring, nil, number, nz_number, quoted_char},
        extensions::{
            condstore_qresync::{expunged_resp, search_sort_mod_seq},
            esearch::esearch_response,
            metadata::metadata_resp,
            namespace::namespace_response,
            quota::{quota_response, quotaroot_response},
        },
        flag::{flag_list, mbx_list_flags},
        status::status_att_list,
        tagged_ext::tagged_ext_val,
    },
    types::{
        core::{AString, QuotedChar},
        flag::FlagNameAttribute,
        mailbox::Mailbox,
        params::TaggedExtValue,
        response::Data,
        status::StatusItems,
    },
};

/// `mailbox = "INBOX" / astring`
///
/// All case variants of INBOX denote INBOX.
pub fn mailbox<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Mailbox<'a>> {
    map(|i| astring(i, opts), Mailbox::from)(input)
}

/// ```abnf
/// mailbox-data = "FLAGS" SP flag-list /
///                "LIST" SP mailbox-list /
///                "LSUB" SP mailbox-list /
///                "SEARCH" *(SP nz-number) [SP search-sort-mod-seq] /
///                esearch-response /                            ; RFC 4731
///                "STATUS" SP mailbox SP "(" [status-att-list] ")" /
///                number SP "EXISTS" /
///                number SP "RECENT" /
///                expunged-resp /                               ; RFC 7162
///                namespace-response /                          ; RFC 2342
///                metadata-resp /                               ; RFC 5464
///                quota-response / quotaroot-response           ; RFC 9208
/// ```
pub fn mailbox_data<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Data<'a>> {
    alt((
        map(
            preceded(tag_no_case(b"FLAGS "), |i| flag_list(i, opts)),
            Data::Flags,
        ),
        map(
            preceded(tag_no_case(b"LIST "), |i| mailbox_list(i, opts)),
            |(items, delimiter, mailbox, extensions)| Data::List {
                items: items.unwrap_or_default(),
                delimiter,
                mailbox,
                extensions,
            },
        ),
        map(
            preceded(tag_no_case(b"LSUB "), |i| mailbox_list(i, opts)),
            |(items, delimiter, mailbox, _)| Data::Lsub {
                items: items.unwrap_or_default(),
                delimiter,
                mailbox,
            },
        ),
        |i| esearch_response(i, opts),
        map(
            tuple((
                tag_no_case(b"SEARCH"),
                many0(preceded(sp, nz_number)),
                opt(preceded(sp, search_sort_mod_seq)),
            )),
            |(_, ids, highest_modseq)| Data::Search {
                ids,
                highest_modseq,
            },
        ),
        map(
            tuple((
                tag_no_case(b"STATUS "),
                |i| mailbox(i, opts),
                delimited(tag(b" ("), opt(status_att_list), tag(b")")),
            )),
            |(_, mailbox, items)| Data::Status {
                mailbox,
                items: items.unwrap_or_else(StatusItems::default),
            },
        ),
        map(terminated(number, tag_no_case(b" EXISTS")), Data::Exists),
        map(terminated(number, tag_no_case(b" RECENT")), Data::Recent),
        expunged_resp,
        |i| namespace_response(i, opts),
        |i| metadata_resp(i, opts),
        |i| quotaroot_response(i, opts),
        |i| quota_response(i, opts),
    ))(input)
}

/// ```abnf
/// mailbox-list = "(" [mbx-list-flags] ")" SP
///                (DQUOTE QUOTED-CHAR DQUOTE / nil) SP mailbox
///                [SP mbox-list-extended]
/// ```
///
/// The trailing extended items are RFC 5258; their wire order is
/// preserved.
#[allow(clippy::type_complexity)]
pub fn mailbox_list<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<
    &'a [u8],
    (
        Option<Vec<FlagNameAttribute<'a>>>,
        Option<QuotedChar>,
        Mailbox<'a>,
        Vec<(AString<'a>, TaggedExtValue<'a>)>,
    ),
> {
    let mut parser = tuple((
        delimited(tag(b"("), opt(|i| mbx_list_flags(i, opts)), tag(b")")),
        sp,
        alt((
            map(delimited(dquote, quoted_char, dquote), Some),
            value(None, nil),
        )),
        sp,
        |i| mailbox(i, opts),
        map(
            opt(preceded(sp, |i| mbox_list_extended(i, opts))),
            Option::unwrap_or_default,
        ),
    ));

    let (remaining, (items, _, delimiter, _, mailbox, extensions)) = parser(input)?;

    Ok((remaining, (items, delimiter, mailbox, extensions)))
}

/// ```abnf
/// mbox-list-extended = "(" [mbox-list-extended-item
///                      *(SP mbox-list-extended-item)] ")"
/// mbox-list-extended-item = mbox-list-extended-item-tag SP
///                           tagged-ext-val
/// mbox-list-extended-item-tag = astring
/// ```
fn mbox_list_extended<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Vec<(AString<'a>, TaggedExtValue<'a>)>> {
    delimited(
        tag(b"("),
        map(
            opt(separated_list1(
                sp,
                tuple((
                    terminated(|i| astring(i, opts), sp),
                    |i| tagged_ext_val(i, opts, opts.max_recursion_depth),
                )),
            )),
            Option::unwrap_or_default,
        ),
        tag(b")"),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::core::Atom;

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn test_parse_mailbox() {
        assert_eq!(
            mailbox(b"\"iNbOx\" ", &opts()).unwrap().1,
            Mailbox::Inbox
        );
        assert!(mailbox(b"{3}\r\naaa\r\n", &opts()).is_ok());
        assert!(matches!(
            mailbox(b"inbox.sent ", &opts()).unwrap().1,
            Mailbox::Other(_)
        ));
        assert!(mailbox(b"(", &opts()).is_err());
    }

    #[test]
    fn test_parse_list_response() {
        let (rem, got) = mailbox_data(b"LIST (\\Noselect) \"/\" bbb\r", &opts()).unwrap();
        assert_eq!(rem, b"\r");
        match got {
            Data::List {
                items,
                delimiter,
                mailbox,
                extensions,
            } => {
                assert_eq!(items, vec![FlagNameAttribute::Noselect]);
                assert_eq!(delimiter, Some(QuotedChar::try_from('/').unwrap()));
                assert_eq!(mailbox.as_bytes(), b"bbb");
                assert!(extensions.is_empty());
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_extended_items() {
        let wire = b"LIST () \"/\" Fruit (CHILDINFO (\"SUBSCRIBED\"))\r";
        let (_, got) = mailbox_data(wire, &opts()).unwrap();
        match got {
            Data::List { extensions, .. } => {
                assert_eq!(extensions.len(), 1);
                assert_eq!(extensions[0].0.as_bytes(), b"CHILDINFO");
                assert!(matches!(extensions[0].1, TaggedExtValue::Comp(_)));
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_parse_special_use_attribute() {
        let (_, got) = mailbox_data(b"LIST (\\Sent \\HasNoChildren) \"/\" Sent\r", &opts()).unwrap();
        match got {
            Data::List { items, .. } => {
                assert_eq!(
                    items,
                    vec![
                        FlagNameAttribute::Extension(Atom::try_from("Sent").unwrap()),
                        FlagNameAttribute::HasNoChildren,
                    ]
                );
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_parse_search_with_modseq() {
        let (_, got) = mailbox_data(b"SEARCH 2 5 6 (MODSEQ 917162500)\r", &opts()).unwrap();
        match got {
            Data::Search {
                ids,
                highest_modseq,
            } => {
                assert_eq!(ids.len(), 3);
                assert_eq!(highest_modseq.map(|m| m.get()), Some(917162500));
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_parse_status_response() {
        let (_, got) = mailbox_data(b"STATUS blurdybloop (MESSAGES 231 UIDNEXT 44292)\r", &opts())
            .unwrap();
        match got {
            Data::Status { items, .. } => {
                assert_eq!(items.messages, Some(231));
                assert_eq!(items.uid_next.map(|n| n.get()), Some(44292));
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_parse_exists_and_recent() {
        assert!(matches!(
            mailbox_data(b"23 EXISTS\r", &opts()).unwrap().1,
            Data::Exists(23)
        ));
        assert!(matches!(
            mailbox_data(b"5 RECENT\r", &opts()).unwrap().1,
            Data::Recent(5)
        ));
    }
}

