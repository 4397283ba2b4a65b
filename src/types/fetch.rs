//! FETCH data items and section addressing.

use std::num::{NonZeroU32, NonZeroU64};

use chrono::{DateTime, FixedOffset};

use crate::types::{
    body::BodyStructure,
    core::{AString, NString, NString8, Vec1},
    envelope::Envelope,
    extensions::gmail::GmailLabel,
    flag::FlagFetch,
};

/// A body part path: `nz-number *("." nz-number)`, e.g. `4.1.2`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Part(pub Vec1<NonZeroU32>);

/// A section specifier, the bracketed part of `BODY[…]`.
///
/// The empty bracket pair `[]` addresses the complete body and is encoded
/// as `None` at the use sites.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Section<'a> {
    /// `BODY[1.2]`
    Part(Part),
    /// `BODY[HEADER]` / `BODY[1.2.HEADER]`
    Header(Option<Part>),
    /// `BODY[HEADER.FIELDS (…)]`
    HeaderFields(Option<Part>, Vec1<AString<'a>>),
    /// `BODY[HEADER.FIELDS.NOT (…)]`
    HeaderFieldsNot(Option<Part>, Vec1<AString<'a>>),
    /// `BODY[TEXT]` / `BODY[1.2.TEXT]`
    Text(Option<Part>),
    /// `BODY[1.2.MIME]`; a part path is mandatory here.
    Mime(Part),
}

/// One item of an untagged FETCH response.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum MessageDataItem<'a> {
    /// `BODY` without a section: the non-extensible body structure.
    Body(BodyStructure<'a>),
    /// `BODY[…]<origin>` data.
    BodyExt {
        section: Option<Section<'a>>,
        /// The `<origin>` octet offset, if a partial fetch was answered.
        origin: Option<u32>,
        data: NString<'a>,
    },
    /// `BODYSTRUCTURE`: the extensible body structure.
    BodyStructure(BodyStructure<'a>),
    /// `BINARY[…]` data (RFC 3516); may be a literal8.
    Binary {
        section: Vec<NonZeroU32>,
        value: NString8<'a>,
    },
    /// `BINARY.SIZE[…]` (RFC 3516).
    BinarySize {
        section: Vec<NonZeroU32>,
        size: u32,
    },
    Envelope(Envelope<'a>),
    Flags(Vec<FlagFetch<'a>>),
    InternalDate(DateTime<FixedOffset>),
    Rfc822(NString<'a>),
    Rfc822Header(NString<'a>),
    Rfc822Size(u32),
    Rfc822Text(NString<'a>),
    Uid(NonZeroU32),
    /// `MODSEQ (n)` (CONDSTORE, RFC 7162).
    ModSeq(NonZeroU64),
    /// `X-GM-MSGID n` (Gmail).
    GmailMessageId(u64),
    /// `X-GM-THRID n` (Gmail).
    GmailThreadId(u64),
    /// `X-GM-LABELS (…)` (Gmail).
    GmailLabels(Vec<GmailLabel<'a>>),
}
