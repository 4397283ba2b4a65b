//! Tagged extension parameters (RFC 4466) and their consumers: select
//! parameters, LIST return options.

use std::{borrow::Cow, fmt, num::{NonZeroU32, NonZeroU64}, str::from_utf8};

use crate::{
    types::{
        core::{AString, ValidationError, Vec1},
        sequence::SequenceSet,
        status::StatusAttribute,
    },
    utils::indicators::{is_tagged_label_char, is_tagged_label_fchar},
};

/// `tagged-ext-label = tagged-label-fchar *tagged-label-char`
///
/// The first character is restricted to letters, `-`, `_` and `.`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TaggedExtLabel<'a>(pub(crate) Cow<'a, str>);

impl<'a> TaggedExtLabel<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), ValidationError> {
        let value = value.as_ref();

        match value.first() {
            None => return Err(ValidationError::Empty),
            Some(first) if !is_tagged_label_fchar(*first) => {
                return Err(ValidationError::ByteNotAllowed {
                    found: *first,
                    position: 0,
                })
            }
            Some(_) => {}
        }

        if let Some(position) = value.iter().position(|b| !is_tagged_label_char(*b)) {
            return Err(ValidationError::ByteNotAllowed {
                found: value[position],
                position,
            });
        }

        Ok(())
    }

    pub fn inner(&self) -> &str {
        &self.0
    }

    pub(crate) fn unvalidated<C>(inner: C) -> Self
    where
        C: Into<Cow<'a, str>>,
    {
        let inner = inner.into();

        #[cfg(debug_assertions)]
        Self::verify(inner.as_bytes()).unwrap();

        Self(inner)
    }
}

impl<'a> TryFrom<&'a str> for TaggedExtLabel<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::verify(value)?;

        Ok(Self(Cow::Borrowed(value)))
    }
}

impl<'a> TryFrom<&'a [u8]> for TaggedExtLabel<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        Self::verify(value)?;

        // Safety: the label alphabet is ASCII-only.
        Ok(Self(Cow::Borrowed(from_utf8(value).unwrap())))
    }
}

impl fmt::Display for TaggedExtLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One node of a `tagged-ext-comp` tree: astrings and nested lists.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TaggedExtComp<'a> {
    AString(AString<'a>),
    List(Vec1<TaggedExtComp<'a>>),
}

/// `tagged-ext-val = tagged-ext-simple / "(" [tagged-ext-comp] ")"`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TaggedExtValue<'a> {
    /// A sequence-set form.
    Sequence(SequenceSet),
    /// A bare number (64-bit to cover mod-sequence values).
    Number(u64),
    /// A parenthesised, possibly empty composite list.
    Comp(Vec<TaggedExtComp<'a>>),
}

/// A generic extension parameter: `name [SP value]`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Parameter<'a> {
    pub name: TaggedExtLabel<'a>,
    pub value: Option<TaggedExtValue<'a>>,
}

/// A SELECT/EXAMINE parameter.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SelectParameter<'a> {
    /// `CONDSTORE` (RFC 7162).
    CondStore,
    /// `QRESYNC (uidvalidity modseq [known-uids] [seq-match-data])`
    /// (RFC 7162).
    Qresync {
        uid_validity: NonZeroU32,
        mod_seq: NonZeroU64,
        known_uids: Option<SequenceSet>,
        seq_match_data: Option<(SequenceSet, SequenceSet)>,
    },
    /// Any other labelled parameter.
    Other(Parameter<'a>),
}

/// A LIST return option (RFC 5258).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ReturnOption<'a> {
    Subscribed,
    Children,
    /// `STATUS (…)` (RFC 5819).
    Status(Vec1<StatusAttribute>),
    /// `option-extension`.
    Other(Parameter<'a>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_alphabet() {
        assert!(TaggedExtLabel::try_from("SHARED").is_ok());
        assert!(TaggedExtLabel::try_from("-vendor.example").is_ok());
        assert!(TaggedExtLabel::try_from("a1:b").is_ok());
        // May not start with a digit or colon.
        assert!(TaggedExtLabel::try_from("1abc").is_err());
        assert!(TaggedExtLabel::try_from(":abc").is_err());
        assert!(TaggedExtLabel::try_from("").is_err());
        assert!(TaggedExtLabel::try_from("with space").is_err());
    }
}
