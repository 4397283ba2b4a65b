//! Flag productions and the STORE attribute modifier.

use abnf_core::streaming::sp;
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    character::streaming::char,
    combinator::{map, opt, recognize, value},
    multi::{separated_list0, separated_list1},
    sequence::{delimited, preceded, tuple},
};

use crate::{
    decode::{IMAPResult, ParseOptions},
    parse::{core::atom, extensions::gmail::gmail_label},
    types::{
        core::Vec1,
        flag::{Flag, FlagFetch, FlagNameAttribute, FlagPerm, StoreModifier, StoreOperation,
               StorePayload},
    },
};

/// ```abnf
/// flag = "\Answered" / "\Flagged" / "\Deleted" / "\Seen" / "\Draft" /
///        flag-keyword / flag-extension
/// ```
///
/// Note: Does not include `\Recent`.
pub fn flag<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Flag<'a>> {
    alt((
        map(preceded(char('\\'), |i| atom(i, opts)), Flag::system),
        map(|i| atom(i, opts), Flag::Keyword),
    ))(input)
}

/// `flag-list = "(" [flag *(SP flag)] ")"`
pub fn flag_list<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Vec<Flag<'a>>> {
    delimited(
        tag(b"("),
        separated_list0(sp, |i| flag(i, opts)),
        tag(b")"),
    )(input)
}

/// `flag-fetch = flag / "\Recent"`
pub fn flag_fetch<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], FlagFetch<'a>> {
    if let Ok((rem, peeked)) = recognize(tuple((char('\\'), |i| atom(i, opts))))(input) {
        if peeked.eq_ignore_ascii_case(b"\\recent") {
            return Ok((rem, FlagFetch::Recent));
        }
    }

    map(|i| flag(i, opts), FlagFetch::Flag)(input)
}

/// `flag-perm = flag / "\*"`
pub fn flag_perm<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], FlagPerm<'a>> {
    alt((
        value(FlagPerm::Asterisk, tag("\\*")),
        map(|i| flag(i, opts), FlagPerm::Flag),
    ))(input)
}

/// ```abnf
/// mbx-list-flags = *(mbx-list-oflag SP) mbx-list-sflag *(SP mbx-list-oflag) /
///                  mbx-list-oflag *(SP mbx-list-oflag)
/// ```
///
/// Any backslash-prefixed atom is accepted; semantics are the caller's.
pub fn mbx_list_flags<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Vec<FlagNameAttribute<'a>>> {
    separated_list1(
        sp,
        map(
            preceded(char('\\'), |i| atom(i, opts)),
            FlagNameAttribute::from,
        ),
    )(input)
}

/// The STORE attribute: operation prefix, `.SILENT` suffix, and the
/// flag or Gmail-label payload.
///
/// ```abnf
/// store-att-flags = (["+" / "-"] "FLAGS" [".SILENT"]) SP
///                   (flag-list / (flag *(SP flag)))
/// ```
///
/// `X-GM-LABELS` takes the same prefixes and a parenthesised astring
/// list.
pub fn store_att_flags<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], StoreModifier<'a>> {
    let (remaining, operation) = map(opt(alt((char('+'), char('-')))), |sign| match sign {
        Some('+') => StoreOperation::Add,
        Some('-') => StoreOperation::Remove,
        _ => StoreOperation::Replace,
    })(input)?;

    alt((
        map(
            tuple((
                tag_no_case(b"FLAGS"),
                map(opt(tag_no_case(b".SILENT")), |silent| silent.is_some()),
                sp,
                alt((
                    |i| flag_list(i, opts),
                    separated_list1(sp, |i| flag(i, opts)),
                )),
            )),
            move |(_, silent, _, flags)| StoreModifier {
                operation,
                silent,
                payload: StorePayload::Flags(flags),
            },
        ),
        map(
            tuple((
                tag_no_case(b"X-GM-LABELS"),
                map(opt(tag_no_case(b".SILENT")), |silent| silent.is_some()),
                sp,
                delimited(
                    tag(b"("),
                    separated_list1(sp, |i| gmail_label(i, opts)),
                    tag(b")"),
                ),
            )),
            move |(_, silent, _, labels)| StoreModifier {
                operation,
                silent,
                payload: StorePayload::GmailLabels(Vec1::unvalidated(labels)),
            },
        ),
    ))(remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::core::Atom;

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn test_parse_flag() {
        let (_, val) = flag(b"\\Seen ", &opts()).unwrap();
        assert_eq!(val, Flag::Seen);

        let (_, val) = flag(b"\\Junk ", &opts()).unwrap();
        assert_eq!(val, Flag::Extension(Atom::try_from("Junk").unwrap()));

        let (_, val) = flag(b"$Forwarded ", &opts()).unwrap();
        assert_eq!(val, Flag::Keyword(Atom::try_from("$Forwarded").unwrap()));
    }

    #[test]
    fn test_parse_flag_list() {
        let (rem, val) = flag_list(b"(\\Answered \\Seen keyword1)x", &opts()).unwrap();
        assert_eq!(rem, b"x");
        assert_eq!(
            val,
            vec![
                Flag::Answered,
                Flag::Seen,
                Flag::Keyword(Atom::try_from("keyword1").unwrap())
            ]
        );

        let (_, val) = flag_list(b"()x", &opts()).unwrap();
        assert!(val.is_empty());

        // Truncated list: more bytes may still arrive.
        assert!(matches!(
            flag_list(b"(\\Answered \\Seen keyword1", &opts()),
            Err(nom::Err::Incomplete(_))
        ));
    }

    #[test]
    fn test_parse_flag_fetch() {
        let (rem, val) = flag_fetch(b"iS)", &opts()).unwrap();
        assert_eq!(rem.len(), 1);
        assert_eq!(val, FlagFetch::Flag(Flag::Keyword(Atom::try_from("iS").unwrap())));

        let (_, val) = flag_fetch(b"\\Recent ", &opts()).unwrap();
        assert_eq!(val, FlagFetch::Recent);

        let (_, val) = flag_fetch(b"\\Recentx ", &opts()).unwrap();
        assert_eq!(
            val,
            FlagFetch::Flag(Flag::Extension(Atom::try_from("Recentx").unwrap()))
        );
    }

    #[test]
    fn test_parse_flag_perm() {
        let tests = [
            ("\\Deleted)", FlagPerm::Flag(Flag::Deleted)),
            (
                "\\Deletedx)",
                FlagPerm::Flag(Flag::Extension(Atom::try_from("Deletedx").unwrap())),
            ),
            ("\\Seen ", FlagPerm::Flag(Flag::Seen)),
            ("\\*)", FlagPerm::Asterisk),
        ];

        for (test, expected) in tests {
            let (rem, got) = flag_perm(test.as_bytes(), &opts()).unwrap();
            assert_eq!(rem.len(), 1);
            assert_eq!(expected, got);
        }
    }

    #[test]
    fn test_parse_mbx_list_flags() {
        let (rem, got) = mbx_list_flags(b"\\Marked)", &opts()).unwrap();
        assert_eq!(got, vec![FlagNameAttribute::Marked]);
        assert_eq!(rem.len(), 1);

        let (rem, got) = mbx_list_flags(b"\\Markedm)", &opts()).unwrap();
        assert_eq!(
            got,
            vec![FlagNameAttribute::Extension(
                Atom::try_from("Markedm").unwrap()
            )]
        );
        assert_eq!(rem.len(), 1);
    }

    #[test]
    fn test_parse_store_att_flags() {
        let (_, got) = store_att_flags(b"+FLAGS.SILENT (\\Seen)\r", &opts()).unwrap();
        assert_eq!(got.operation, StoreOperation::Add);
        assert!(got.silent);
        assert_eq!(got.payload, StorePayload::Flags(vec![Flag::Seen]));

        let (_, got) = store_att_flags(b"-FLAGS \\Deleted \\Seen\r", &opts()).unwrap();
        assert_eq!(got.operation, StoreOperation::Remove);
        assert!(!got.silent);
        assert_eq!(
            got.payload,
            StorePayload::Flags(vec![Flag::Deleted, Flag::Seen])
        );

        let (_, got) = store_att_flags(b"FLAGS (\\Seen)\r", &opts()).unwrap();
        assert_eq!(got.operation, StoreOperation::Replace);

        let (_, got) = store_att_flags(b"+X-GM-LABELS (\\Important \"foo\")\r", &opts()).unwrap();
        assert_eq!(got.operation, StoreOperation::Add);
        assert!(matches!(got.payload, StorePayload::GmailLabels(_)));
    }
}
