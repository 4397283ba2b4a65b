//! STATUS attribute productions.

use std::str::from_utf8;

use abnf_core::streaming::sp;
use nom::{
    bytes::streaming::take_while1,
    multi::separated_list1,
    sequence::{preceded, tuple},
};

use crate::{
    decode::{IMAPErrorKind, IMAPParseError, IMAPResult},
    parse::{
        core::{number, number64, nz_number},
        extensions::condstore_qresync::mod_sequence_valzer,
    },
    types::status::{StatusAttribute, StatusItems},
};

/// ```abnf
/// status-att = "MESSAGES" / "UIDNEXT" / "UIDVALIDITY" / "UNSEEN" /
///              "DELETED" / "SIZE" / "RECENT" / "HIGHESTMODSEQ"
/// ```
///
/// The alphabetic token is taken whole and matched case-insensitively;
/// an unknown name is a recoverable mismatch.
pub fn status_att(input: &[u8]) -> IMAPResult<&[u8], StatusAttribute> {
    let (remaining, word) = take_while1(|b: u8| b.is_ascii_alphabetic())(input)?;

    // Safety: ASCII letters only.
    let attribute = match from_utf8(word).unwrap().to_ascii_uppercase().as_str() {
        "MESSAGES" => StatusAttribute::Messages,
        "UIDNEXT" => StatusAttribute::UidNext,
        "UIDVALIDITY" => StatusAttribute::UidValidity,
        "UNSEEN" => StatusAttribute::Unseen,
        "DELETED" => StatusAttribute::Deleted,
        "SIZE" => StatusAttribute::Size,
        "RECENT" => StatusAttribute::Recent,
        "HIGHESTMODSEQ" => StatusAttribute::HighestModSeq,
        _ => {
            return Err(nom::Err::Error(IMAPParseError {
                input,
                kind: IMAPErrorKind::Nom(nom::error::ErrorKind::Tag),
            }))
        }
    };

    Ok((remaining, attribute))
}

/// `status-att-list = status-att-val *(SP status-att-val)`
///
/// The attribute/value pairs are folded into one [`StatusItems`];
/// later duplicates overwrite earlier ones.
pub fn status_att_list(input: &[u8]) -> IMAPResult<&[u8], StatusItems> {
    let (remaining, pairs) = separated_list1(sp, status_att_val)(input)?;

    let mut items = StatusItems::default();
    for pair in pairs {
        match pair {
            StatusAttValue::Messages(n) => items.messages = Some(n),
            StatusAttValue::UidNext(n) => items.uid_next = Some(n),
            StatusAttValue::UidValidity(n) => items.uid_validity = Some(n),
            StatusAttValue::Unseen(n) => items.unseen = Some(n),
            StatusAttValue::Deleted(n) => items.deleted = Some(n),
            StatusAttValue::Size(n) => items.size = Some(n),
            StatusAttValue::Recent(n) => items.recent = Some(n),
            StatusAttValue::HighestModSeq(n) => items.highest_modseq = Some(n),
        }
    }

    Ok((remaining, items))
}

enum StatusAttValue {
    Messages(u32),
    UidNext(std::num::NonZeroU32),
    UidValidity(std::num::NonZeroU32),
    Unseen(u32),
    Deleted(u32),
    Size(u64),
    Recent(u32),
    HighestModSeq(u64),
}

/// ```abnf
/// status-att-val = "MESSAGES" SP number / "UIDNEXT" SP nz-number /
///                  "UIDVALIDITY" SP nz-number / "UNSEEN" SP number /
///                  "DELETED" SP number / "SIZE" SP number64 /
///                  "RECENT" SP number /
///                  "HIGHESTMODSEQ" SP mod-sequence-valzer
/// ```
fn status_att_val(input: &[u8]) -> IMAPResult<&[u8], StatusAttValue> {
    let (remaining, (attribute, _)) = tuple((status_att, sp))(input)?;

    match attribute {
        StatusAttribute::Messages => {
            let (remaining, n) = number(remaining)?;
            Ok((remaining, StatusAttValue::Messages(n)))
        }
        StatusAttribute::UidNext => {
            let (remaining, n) = nz_number(remaining)?;
            Ok((remaining, StatusAttValue::UidNext(n)))
        }
        StatusAttribute::UidValidity => {
            let (remaining, n) = nz_number(remaining)?;
            Ok((remaining, StatusAttValue::UidValidity(n)))
        }
        StatusAttribute::Unseen => {
            let (remaining, n) = number(remaining)?;
            Ok((remaining, StatusAttValue::Unseen(n)))
        }
        StatusAttribute::Deleted => {
            let (remaining, n) = number(remaining)?;
            Ok((remaining, StatusAttValue::Deleted(n)))
        }
        StatusAttribute::Size => {
            let (remaining, n) = number64(remaining)?;
            Ok((remaining, StatusAttValue::Size(n)))
        }
        StatusAttribute::Recent => {
            let (remaining, n) = number(remaining)?;
            Ok((remaining, StatusAttValue::Recent(n)))
        }
        StatusAttribute::HighestModSeq => {
            let (remaining, n) = mod_sequence_valzer(remaining)?;
            Ok((remaining, StatusAttValue::HighestModSeq(n)))
        }
    }
}

/// `status-option = "STATUS" SP "(" status-att *(SP status-att) ")"`
///
/// The LIST return option of RFC 5819.
pub fn status_option(input: &[u8]) -> IMAPResult<&[u8], Vec<StatusAttribute>> {
    use nom::{bytes::streaming::tag, bytes::streaming::tag_no_case, sequence::delimited};

    preceded(
        tag_no_case(b"STATUS "),
        delimited(tag(b"("), separated_list1(sp, status_att), tag(b")")),
    )(input)
}
