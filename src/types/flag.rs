//! Flag-related types, including the STORE modifier grammar nodes.

use std::fmt::{Display, Formatter};

use crate::types::{
    core::{Atom, ValidationError, Vec1},
    extensions::gmail::GmailLabel,
};

/// A message flag: either a system flag (`\Answered` …), a future system
/// extension (`\<atom>`), or a server-defined keyword (bare atom).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Flag<'a> {
    /// `\Answered`
    Answered,
    /// `\Deleted`
    Deleted,
    /// `\Draft`
    Draft,
    /// `\Flagged`
    Flagged,
    /// `\Seen`
    Seen,
    /// `\<atom>` that is not one of the pre-defined system flags.
    Extension(Atom<'a>),
    /// A bare keyword atom.
    Keyword(Atom<'a>),
}

impl<'a> Flag<'a> {
    /// Interprets a backslash-prefixed atom.
    pub fn system(atom: Atom<'a>) -> Self {
        match atom.as_ref().to_ascii_lowercase().as_ref() {
            "answered" => Self::Answered,
            "deleted" => Self::Deleted,
            "draft" => Self::Draft,
            "flagged" => Self::Flagged,
            "seen" => Self::Seen,
            _ => Self::Extension(atom),
        }
    }

    pub fn keyword(atom: Atom<'a>) -> Self {
        Self::Keyword(atom)
    }
}

impl<'a> TryFrom<&'a str> for Flag<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Ok(if let Some(value) = value.strip_prefix('\\') {
            Self::system(Atom::try_from(value)?)
        } else {
            Self::keyword(Atom::try_from(value)?)
        })
    }
}

impl Display for Flag<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Flag::Answered => f.write_str("\\Answered"),
            Flag::Deleted => f.write_str("\\Deleted"),
            Flag::Draft => f.write_str("\\Draft"),
            Flag::Flagged => f.write_str("\\Flagged"),
            Flag::Seen => f.write_str("\\Seen"),
            Flag::Extension(other) => write!(f, "\\{other}"),
            Flag::Keyword(atom) => write!(f, "{atom}"),
        }
    }
}

/// A flag as it appears in FETCH data; adds `\Recent`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum FlagFetch<'a> {
    Flag(Flag<'a>),
    /// `\Recent`: first session to be notified about this message.
    Recent,
}

impl<'a> From<Flag<'a>> for FlagFetch<'a> {
    fn from(flag: Flag<'a>) -> Self {
        Self::Flag(flag)
    }
}

/// A flag inside a PERMANENTFLAGS code; adds the `\*` wildcard.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum FlagPerm<'a> {
    Flag(Flag<'a>),
    /// `\*`: new keywords may be created by storing them.
    Asterisk,
}

impl<'a> From<Flag<'a>> for FlagPerm<'a> {
    fn from(flag: Flag<'a>) -> Self {
        Self::Flag(flag)
    }
}

/// A mailbox name attribute of a LIST/LSUB response.
///
/// The RFC 3501 selectability flags and the widely deployed child-info
/// attributes (RFC 3348/5258) get dedicated variants; everything else —
/// including the SPECIAL-USE set — is carried as `Extension` and left to
/// the caller.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum FlagNameAttribute<'a> {
    /// `\Noinferiors`
    Noinferiors,
    /// `\Noselect`
    Noselect,
    /// `\Marked`
    Marked,
    /// `\Unmarked`
    Unmarked,
    /// `\HasChildren`
    HasChildren,
    /// `\HasNoChildren`
    HasNoChildren,
    /// `\Subscribed` (LIST-EXTENDED)
    Subscribed,
    /// `\NonExistent` (LIST-EXTENDED)
    NonExistent,
    /// Any other `\<atom>`, e.g. the SPECIAL-USE set.
    Extension(Atom<'a>),
}

impl<'a> From<Atom<'a>> for FlagNameAttribute<'a> {
    fn from(atom: Atom<'a>) -> Self {
        match atom.as_ref().to_ascii_lowercase().as_ref() {
            "noinferiors" => Self::Noinferiors,
            "noselect" => Self::Noselect,
            "marked" => Self::Marked,
            "unmarked" => Self::Unmarked,
            "haschildren" => Self::HasChildren,
            "hasnochildren" => Self::HasNoChildren,
            "subscribed" => Self::Subscribed,
            "nonexistent" => Self::NonExistent,
            _ => Self::Extension(atom),
        }
    }
}

impl Display for FlagNameAttribute<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Noinferiors => f.write_str("\\Noinferiors"),
            Self::Noselect => f.write_str("\\Noselect"),
            Self::Marked => f.write_str("\\Marked"),
            Self::Unmarked => f.write_str("\\Unmarked"),
            Self::HasChildren => f.write_str("\\HasChildren"),
            Self::HasNoChildren => f.write_str("\\HasNoChildren"),
            Self::Subscribed => f.write_str("\\Subscribed"),
            Self::NonExistent => f.write_str("\\NonExistent"),
            Self::Extension(atom) => write!(f, "\\{atom}"),
        }
    }
}

/// How a STORE modifies the targeted attribute.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StoreOperation {
    /// `+FLAGS …`: add to the current set.
    Add,
    /// `-FLAGS …`: remove from the current set.
    Remove,
    /// `FLAGS …`: replace the current set.
    Replace,
}

/// The attribute payload of a STORE: flags or Gmail labels.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum StorePayload<'a> {
    /// `FLAGS[.SILENT] (…)` or the unparenthesised spaced form.
    Flags(Vec<Flag<'a>>),
    /// `X-GM-LABELS[.SILENT] (…)`
    GmailLabels(Vec1<GmailLabel<'a>>),
}

/// A parsed STORE attribute modifier, e.g. `+FLAGS.SILENT (\Seen)`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct StoreModifier<'a> {
    pub operation: StoreOperation,
    /// `.SILENT` suppresses the untagged FETCH echo.
    pub silent: bool,
    pub payload: StorePayload<'a>,
}
