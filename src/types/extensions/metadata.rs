//! METADATA grammar nodes (RFC 5464).

use crate::types::core::{AString, NString8, ValidationError, Vec1};

/// A slash-separated entry path, e.g. `/shared/comment`.
///
/// Must not contain `*` or `%`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Entry<'a>(AString<'a>);

impl<'a> Entry<'a> {
    pub fn inner(&self) -> &AString<'a> {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl<'a> TryFrom<AString<'a>> for Entry<'a> {
    type Error = ValidationError;

    fn try_from(value: AString<'a>) -> Result<Self, Self::Error> {
        if let Some(position) = value
            .as_bytes()
            .iter()
            .position(|b| *b == b'*' || *b == b'%')
        {
            return Err(ValidationError::ByteNotAllowed {
                found: value.as_bytes()[position],
                position,
            });
        }

        Ok(Self(value))
    }
}

/// `entry-value = entry SP value`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EntryValue<'a> {
    pub entry: Entry<'a>,
    /// `nstring / literal8`.
    pub value: NString8<'a>,
}

/// The payload of a METADATA response: entries with values (GETMETADATA
/// result) or an unsolicited entry list.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum MetadataResponse<'a> {
    WithValues(Vec1<EntryValue<'a>>),
    WithoutValues(Vec1<Entry<'a>>),
}

/// The `METADATA` response codes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MetadataCode {
    /// `LONGENTRIES n`: entries longer than the requested MAXSIZE exist.
    LongEntries(u32),
    /// `MAXSIZE n`: the value exceeded the server's limit.
    MaxSize(u32),
    /// `TOOMANY`: too many entries were attempted.
    TooMany,
    /// `NOPRIVATE`: the server only supports shared annotations.
    NoPrivate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_rejects_wildcards() {
        assert!(Entry::try_from(AString::try_from("/shared/comment").unwrap()).is_ok());
        assert!(Entry::try_from(AString::try_from("/shared/co*ment").unwrap()).is_err());
        assert!(Entry::try_from(AString::try_from("/shared/co%ment").unwrap()).is_err());
    }
}
