//! CONDSTORE/QRESYNC productions (RFC 7162).

use std::num::NonZeroU64;

use abnf_core::streaming::sp;
use nom::{
    bytes::streaming::{tag, tag_no_case},
    character::streaming::char,
    combinator::{map, map_res, opt},
    sequence::{delimited, preceded, tuple},
};

use crate::{
    decode::IMAPResult,
    parse::{core::number64, sequence::uid_set},
    types::response::Data,
};

/// ```abnf
/// mod-sequence-value = 1*DIGIT
/// ```
///
/// Positive unsigned 63-bit integer.
pub fn mod_sequence_value(input: &[u8]) -> IMAPResult<&[u8], NonZeroU64> {
    map_res(number64, NonZeroU64::try_from)(input)
}

/// ```abnf
/// mod-sequence-valzer = "0" / mod-sequence-value
/// ```
pub fn mod_sequence_valzer(input: &[u8]) -> IMAPResult<&[u8], u64> {
    number64(input)
}

/// ```abnf
/// search-sort-mod-seq = "(" "MODSEQ" SP mod-sequence-value ")"
/// ```
///
/// The tail of a legacy SEARCH response under CONDSTORE.
pub fn search_sort_mod_seq(input: &[u8]) -> IMAPResult<&[u8], NonZeroU64> {
    delimited(
        char('('),
        preceded(tag_no_case("MODSEQ "), mod_sequence_value),
        char(')'),
    )(input)
}

/// ```abnf
/// fetch-mod-resp = "MODSEQ" SP "(" permsg-modsequence ")"
/// ```
pub fn fetch_mod_resp(input: &[u8]) -> IMAPResult<&[u8], NonZeroU64> {
    preceded(
        tag_no_case(b"MODSEQ "),
        delimited(tag(b"("), mod_sequence_value, tag(b")")),
    )(input)
}

/// ```abnf
/// expunged-resp = "VANISHED" [SP "(EARLIER)"] SP known-uids
/// ```
pub fn expunged_resp<'a>(input: &'a [u8]) -> IMAPResult<&'a [u8], Data<'a>> {
    let mut parser = tuple((
        tag_no_case(b"VANISHED"),
        map(opt(preceded(sp, tag_no_case(b"(EARLIER)"))), |earlier| {
            earlier.is_some()
        }),
        preceded(sp, uid_set),
    ));

    let (remaining, (_, earlier, uids)) = parser(input)?;

    Ok((remaining, Data::Vanished { earlier, uids }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mod_sequence_value() {
        assert_eq!(
            mod_sequence_value(b"715194045007 ").unwrap().1.get(),
            715194045007
        );
        assert!(mod_sequence_value(b"0 ").is_err());
    }

    #[test]
    fn test_parse_fetch_mod_resp() {
        assert_eq!(fetch_mod_resp(b"MODSEQ (624140003)x").unwrap().1.get(), 624140003);
    }

    #[test]
    fn test_parse_expunged_resp() {
        let (_, got) = expunged_resp(b"VANISHED (EARLIER) 300:310,405\r").unwrap();
        match got {
            Data::Vanished { earlier, uids } => {
                assert!(earlier);
                assert_eq!(uids.sequences().len(), 2);
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_parse_expunged_resp_without_earlier() {
        let (_, got) = expunged_resp(b"VANISHED 405\r").unwrap();
        assert!(matches!(got, Data::Vanished { earlier: false, .. }));
    }
}
