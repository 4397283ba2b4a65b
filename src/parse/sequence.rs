//! Sequence set productions.

use nom::{
    branch::alt,
    bytes::streaming::tag,
    combinator::{map, value},
    multi::separated_list1,
    sequence::tuple,
};

use crate::{
    decode::IMAPResult,
    parse::core::nz_number,
    types::{
        core::Vec1,
        sequence::{SeqOrUid, Sequence, SequenceSet},
    },
};

/// `sequence-set = (seq-number / seq-range) *("," (seq-number / seq-range))`
///
/// Extended by RFC 5182: a lone `$` denotes the saved result of the
/// last SEARCH.
pub fn sequence_set(input: &[u8]) -> IMAPResult<&[u8], SequenceSet> {
    alt((
        // `$` must not swallow the first char of a range, so it is its
        // own alternative, tried first.
        value(SequenceSet::SavedResult, tag(b"$")),
        map(
            separated_list1(
                tag(b","),
                alt((
                    // Ordering is important: a range shares its first
                    // number with a plain seq-number.
                    map(seq_range, |(from, to)| Sequence::Range(from, to)),
                    map(seq_number, Sequence::Single),
                )),
            ),
            |set| SequenceSet::Sequences(Vec1::unvalidated(set)),
        ),
    ))(input)
}

/// `seq-range = seq-number ":" seq-number`
///
/// Two endpoints and all values between them regardless of order;
/// `2:4` and `4:2` are equivalent.
pub fn seq_range(input: &[u8]) -> IMAPResult<&[u8], (SeqOrUid, SeqOrUid)> {
    let mut parser = tuple((seq_number, tag(b":"), seq_number));

    let (remaining, (from, _, to)) = parser(input)?;

    Ok((remaining, (from, to)))
}

/// `seq-number = nz-number / "*"`
///
/// `*` is the largest sequence number or UID in use.
pub fn seq_number(input: &[u8]) -> IMAPResult<&[u8], SeqOrUid> {
    alt((
        map(nz_number, SeqOrUid::Value),
        value(SeqOrUid::Asterisk, tag(b"*")),
    ))(input)
}

/// `uid-set = (uniqueid / uid-range) *("," (uniqueid / uid-range))`
///
/// The UIDPLUS/QRESYNC form: like `sequence-set` but without `*` and
/// without `$`.
pub fn uid_set(input: &[u8]) -> IMAPResult<&[u8], SequenceSet> {
    map(
        separated_list1(
            tag(b","),
            alt((
                map(
                    tuple((nz_number, tag(b":"), nz_number)),
                    |(from, _, to)| Sequence::Range(SeqOrUid::Value(from), SeqOrUid::Value(to)),
                ),
                map(nz_number, |uid| Sequence::Single(SeqOrUid::Value(uid))),
            )),
        ),
        |set| SequenceSet::Sequences(Vec1::unvalidated(set)),
    )(input)
}
