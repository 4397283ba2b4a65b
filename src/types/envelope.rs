//! Envelope and address structures of FETCH data.

use crate::types::core::NString;

/// The parsed envelope of a message, as returned by `FETCH ENVELOPE` and
/// nested inside `message/rfc822` body structures.
///
/// All fields are raw wire values; header decoding (MIME encoded-words,
/// date parsing) is the caller's concern.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Envelope<'a> {
    pub date: NString<'a>,
    pub subject: NString<'a>,
    pub from: Vec<Address<'a>>,
    pub sender: Vec<Address<'a>>,
    pub reply_to: Vec<Address<'a>>,
    pub to: Vec<Address<'a>>,
    pub cc: Vec<Address<'a>>,
    pub bcc: Vec<Address<'a>>,
    pub in_reply_to: NString<'a>,
    pub message_id: NString<'a>,
}

/// A single parenthesised address.
///
/// Group syntax is encoded the RFC 3501 way: a start-of-group has a NIL
/// `mailbox` and NIL `host`, the members follow, then an end-of-group
/// marker with everything NIL.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Address<'a> {
    /// Personal name.
    pub name: NString<'a>,
    /// At-domain-list (source route); historic.
    pub adl: NString<'a>,
    /// Local part.
    pub mailbox: NString<'a>,
    /// Domain.
    pub host: NString<'a>,
}
