//! Sequence sets over message sequence numbers and UIDs.

use std::num::NonZeroU32;

use crate::types::core::{ValidationError, Vec1};

/// A single endpoint of a sequence range.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SeqOrUid {
    Value(NonZeroU32),
    /// `*`: the largest number in use.
    Asterisk,
}

impl SeqOrUid {
    /// Resolves the endpoint against the current largest identifier.
    pub fn expand(&self, largest: NonZeroU32) -> NonZeroU32 {
        match self {
            Self::Value(value) => *value,
            Self::Asterisk => largest,
        }
    }
}

impl TryFrom<u32> for SeqOrUid {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(Self::Value(
            NonZeroU32::new(value).ok_or(ValidationError::Empty)?,
        ))
    }
}

/// `seq-number / seq-range`
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Sequence {
    Single(SeqOrUid),
    Range(SeqOrUid, SeqOrUid),
}

/// A comma-separated set of sequence ranges, or the saved-result marker
/// `$` of RFC 5182.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SequenceSet {
    /// `$`: the result saved by the last SEARCH (RETURN (SAVE)).
    SavedResult,
    Sequences(Vec1<Sequence>),
}

impl SequenceSet {
    pub fn sequences(&self) -> &[Sequence] {
        match self {
            Self::SavedResult => &[],
            Self::Sequences(sequences) => sequences.as_slice(),
        }
    }
}

impl TryFrom<Vec<Sequence>> for SequenceSet {
    type Error = ValidationError;

    fn try_from(value: Vec<Sequence>) -> Result<Self, Self::Error> {
        Ok(Self::Sequences(Vec1::try_from(value)?))
    }
}

impl From<Sequence> for SequenceSet {
    fn from(value: Sequence) -> Self {
        Self::Sequences(Vec1::from(value))
    }
}
