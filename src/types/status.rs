//! STATUS attributes and the folded response value.

use std::num::NonZeroU32;

/// A STATUS attribute name.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StatusAttribute {
    Messages,
    UidNext,
    UidValidity,
    Unseen,
    /// `DELETED` (QUOTA, RFC 9208).
    Deleted,
    /// `SIZE` (RFC 8438).
    Size,
    Recent,
    /// `HIGHESTMODSEQ` (CONDSTORE, RFC 7162).
    HighestModSeq,
}

/// The attribute/value pairs of a STATUS response, folded into one struct.
///
/// Later occurrences of the same attribute overwrite earlier ones.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct StatusItems {
    pub messages: Option<u32>,
    pub uid_next: Option<NonZeroU32>,
    pub uid_validity: Option<NonZeroU32>,
    pub unseen: Option<u32>,
    pub deleted: Option<u32>,
    pub size: Option<u64>,
    pub recent: Option<u32>,
    pub highest_modseq: Option<u64>,
}
