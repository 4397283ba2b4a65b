//! Extended SEARCH responses (RFC 4731) and multi-mailbox source options
//! (RFC 7377).

use std::num::{NonZeroU32, NonZeroU64};

use crate::types::{
    core::{IString, Vec1},
    mailbox::Mailbox,
    params::Parameter,
    sequence::SequenceSet,
};

/// `ESEARCH [search-correlator] [SP "UID"] *(SP search-return-data)`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ExtendedSearchResponse<'a> {
    pub correlator: Option<SearchCorrelator<'a>>,
    /// Whether the returned identifiers are UIDs.
    pub uid: bool,
    pub data: Vec<SearchReturnData<'a>>,
}

/// `search-correlator = SP "(" "TAG" SP tag-string ")"`, extended by
/// RFC 7377 with the mailbox and UIDVALIDITY of multi-mailbox results.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SearchCorrelator<'a> {
    pub tag: IString<'a>,
    pub mailbox: Option<Mailbox<'a>>,
    pub uid_validity: Option<NonZeroU32>,
}

/// One `search-return-data` item.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SearchReturnData<'a> {
    Min(NonZeroU32),
    Max(NonZeroU32),
    All(SequenceSet),
    Count(u32),
    /// `MODSEQ n` (RFC 7162).
    ModSeq(NonZeroU64),
    /// `search-ret-data-ext`.
    Other(Parameter<'a>),
}

/// Which mailboxes a multi-mailbox search draws from:
/// `IN (source-mbox [(scope-options)])`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SearchSourceOptions<'a> {
    pub filters: Vec1<MailboxFilter<'a>>,
    pub scope: Vec<Parameter<'a>>,
}

/// A `filter-mailboxes` alternative (RFC 7377).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum MailboxFilter<'a> {
    Selected,
    SelectedDelayed,
    Inboxes,
    Personal,
    Subscribed,
    Subtree(Vec1<Mailbox<'a>>),
    SubtreeOne(Vec1<Mailbox<'a>>),
    Mailboxes(Vec1<Mailbox<'a>>),
}
