//! Gmail productions (`X-GM-EXT-1`).

use nom::{branch::alt, character::streaming::char, combinator::map, sequence::preceded};

use crate::{
    decode::{IMAPResult, ParseOptions},
    parse::core::{astring, atom},
    types::extensions::gmail::GmailLabel,
};

/// A single label: `"\" atom / astring`.
///
/// System folders come backslash-prefixed (`\Inbox`, `\Sent`);
/// everything else is an astring.
pub fn gmail_label<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], GmailLabel<'a>> {
    alt((
        map(preceded(char('\\'), |i| atom(i, opts)), GmailLabel::System),
        map(|i| astring(i, opts), GmailLabel::UserDefined),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::core::{AString, Atom, IString, Quoted};

    #[test]
    fn test_parse_gmail_label() {
        let opts = ParseOptions::default();

        let (_, got) = gmail_label(b"\\Inbox ", &opts).unwrap();
        assert_eq!(got, GmailLabel::System(Atom::try_from("Inbox").unwrap()));

        let (_, got) = gmail_label(b"\"receipts/2026\" ", &opts).unwrap();
        assert_eq!(
            got,
            GmailLabel::UserDefined(AString::String(IString::Quoted(
                Quoted::try_from("receipts/2026").unwrap()
            )))
        );
    }
}
