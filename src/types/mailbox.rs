//! Mailbox names.

use crate::types::core::{AString, ValidationError};

/// `mailbox = "INBOX" / astring`
///
/// All case variants of INBOX denote INBOX; the raw bytes of other names
/// are preserved (they are usually Modified-UTF-7 and decoding them is an
/// external concern).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Mailbox<'a> {
    Inbox,
    Other(AString<'a>),
}

impl<'a> Mailbox<'a> {
    /// The raw wire bytes; `INBOX` is canonicalised.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Inbox => b"INBOX",
            Self::Other(other) => other.as_bytes(),
        }
    }
}

impl<'a> From<AString<'a>> for Mailbox<'a> {
    fn from(value: AString<'a>) -> Self {
        if value.as_bytes().eq_ignore_ascii_case(b"INBOX") {
            Self::Inbox
        } else {
            Self::Other(value)
        }
    }
}

impl<'a> TryFrom<&'a str> for Mailbox<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Ok(Self::from(AString::try_from(value)?))
    }
}
