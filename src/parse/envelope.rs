//! Envelope and address productions.

use abnf_core::streaming::sp;
use nom::{
    branch::alt,
    bytes::streaming::tag,
    combinator::map,
    multi::many1,
    sequence::{delimited, preceded, tuple},
};

use crate::{
    decode::{IMAPResult, ParseOptions},
    parse::core::{nil, nstring},
    types::envelope::{Address, Envelope},
};

/// ```abnf
/// envelope = "("
///              env-date SP
///              env-subject SP
///              env-from SP
///              env-sender SP
///              env-reply-to SP
///              env-to SP
///              env-cc SP
///              env-bcc SP
///              env-in-reply-to SP
///              env-message-id
///            ")"
/// ```
///
/// The address fields are each `"(" 1*address ")" / nil`.
pub fn envelope<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Envelope<'a>> {
    let mut parser = delimited(
        tag(b"("),
        tuple((
            |i| nstring(i, opts),
            preceded(sp, |i| nstring(i, opts)),
            preceded(sp, |i| address_list(i, opts)),
            preceded(sp, |i| address_list(i, opts)),
            preceded(sp, |i| address_list(i, opts)),
            preceded(sp, |i| address_list(i, opts)),
            preceded(sp, |i| address_list(i, opts)),
            preceded(sp, |i| address_list(i, opts)),
            preceded(sp, |i| nstring(i, opts)),
            preceded(sp, |i| nstring(i, opts)),
        )),
        tag(b")"),
    );

    let (remaining, (date, subject, from, sender, reply_to, to, cc, bcc, in_reply_to, message_id)) =
        parser(input)?;

    Ok((
        remaining,
        Envelope {
            date,
            subject,
            from,
            sender,
            reply_to,
            to,
            cc,
            bcc,
            in_reply_to,
            message_id,
        },
    ))
}

/// `"(" 1*address ")" / nil`
fn address_list<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Vec<Address<'a>>> {
    alt((
        delimited(tag(b"("), many1(|i| address(i, opts)), tag(b")")),
        map(nil, |_| Vec::new()),
    ))(input)
}

/// ```abnf
/// address = "(" addr-name SP addr-adl SP addr-mailbox SP addr-host ")"
/// ```
///
/// Note: Some servers put spaces between addresses; a leading space is
/// therefore skipped.
pub fn address<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Address<'a>> {
    let (input, _) = nom::combinator::opt(sp)(input)?;

    let mut parser = delimited(
        tag(b"("),
        tuple((
            |i| nstring(i, opts),
            preceded(sp, |i| nstring(i, opts)),
            preceded(sp, |i| nstring(i, opts)),
            preceded(sp, |i| nstring(i, opts)),
        )),
        tag(b")"),
    );

    let (remaining, (name, adl, mailbox, host)) = parser(input)?;

    Ok((
        remaining,
        Address {
            name,
            adl,
            mailbox,
            host,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::core::NString;

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn test_parse_address() {
        let (rem, got) =
            address(b"(NIL {3}\r\nxxx \"xxx\" NIL)", &opts()).unwrap();
        assert_eq!(rem, b"");
        assert_eq!(got.name, NString(None));
        assert_eq!(got.adl.as_bytes(), Some(b"xxx".as_ref()));
        assert_eq!(got.mailbox.as_bytes(), Some(b"xxx".as_ref()));
        assert_eq!(got.host, NString(None));
    }

    #[test]
    fn test_parse_envelope_all_nil() {
        let wire = b"(NIL NIL NIL NIL NIL NIL NIL NIL NIL NIL)x";
        let (rem, got) = envelope(wire, &opts()).unwrap();
        assert_eq!(rem, b"x");
        assert!(got.from.is_empty());
        assert_eq!(got.subject, NString(None));
    }

    #[test]
    fn test_parse_envelope() {
        let wire = b"(\"date\" \"subject\" ((\"name\" NIL \"mailbox\" \"host\")) NIL NIL NIL NIL NIL NIL \"<id@host>\")x";
        let (rem, got) = envelope(wire, &opts()).unwrap();
        assert_eq!(rem, b"x");
        assert_eq!(got.from.len(), 1);
        assert_eq!(got.message_id.as_bytes(), Some(b"<id@host>".as_ref()));
    }
}
