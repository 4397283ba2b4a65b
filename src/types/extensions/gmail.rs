//! Gmail extension nodes (`X-GM-EXT-1`).

use crate::types::core::{AString, Atom};

/// A Gmail label as it appears in `X-GM-LABELS` lists.
///
/// System folders are backslash-prefixed atoms (`\Inbox`, `\Sent`);
/// user-defined labels are ordinary astrings.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum GmailLabel<'a> {
    System(Atom<'a>),
    UserDefined(AString<'a>),
}
