//! IMAP URL productions (RFC 5092) with URLAUTH (RFC 4467).
//!
//! URLs reach the parser as complete values (astring payloads of
//! GENURLAUTH/URLFETCH exchanges, BADURL codes), never as a byte stream,
//! so this module matches in complete mode: the end of input ends the
//! URL instead of signalling `Incomplete`.
//!
//! `enc-mailbox` and `enc-section` may legally end in `/`, which is
//! also the prefix of the following component (`/;UID=`, `/;PARTIAL=`).
//! The inner form is attempted first; when the next component announces
//! itself without its slash, the trailing slash is reattached to it.

use std::{borrow::Cow, net::Ipv4Addr, num::NonZeroU32, str::from_utf8};

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    combinator::{map, opt, value},
    sequence::{delimited, preceded, terminated, tuple},
};

use crate::{
    decode::{IMAPErrorKind, IMAPParseError, IMAPResult},
    parse::datetime::timestamp,
    types::url::{
        ImapUrl, MailboxRef, MessagePath, PartialRange, UrlAccess, UrlAuth, UrlAuthMechanism,
        UrlAuthMechanismName, UrlAuthVerifier, UrlCommand, UrlHost, UrlServer, UrlUserInfo,
    },
    utils::indicators::{is_url_achar_unencoded, is_url_reg_name_char},
};

/// `bchar = achar / ":" / "@" / "/"`
fn is_url_bchar_unencoded(i: u8) -> bool {
    is_url_achar_unencoded(i) || matches!(i, b':' | b'@' | b'/')
}

/// `imapurl = "imap://" iserver ipath-query`
///
/// `ipath-query = ["/" [icommand]]`
pub fn imap_url(input: &[u8]) -> IMAPResult<&[u8], ImapUrl<'_>> {
    let (remaining, _) = tag_no_case(b"imap://")(input)?;
    let (remaining, server) = iserver(remaining)?;

    let (remaining, slash) = opt(tag(b"/"))(remaining)?;
    if slash.is_none() {
        return Ok((remaining, ImapUrl {
            server,
            command: None,
        }));
    }

    let (remaining, command) = opt(icommand)(remaining)?;

    Ok((remaining, ImapUrl { server, command }))
}

/// `iserver = [iuserinfo "@"] host [":" port]`
pub fn iserver(input: &[u8]) -> IMAPResult<&[u8], UrlServer<'_>> {
    let (remaining, user_info) = opt(terminated(iuserinfo, tag(b"@")))(input)?;
    let (remaining, host) = url_host(remaining)?;
    let (remaining, port) = opt(preceded(tag(b":"), url_port))(remaining)?;

    Ok((
        remaining,
        UrlServer {
            user_info,
            host,
            port,
        },
    ))
}

/// `iuserinfo = enc-user [iauth] / [enc-user] iauth`
///
/// At least one of the two parts must be present.
fn iuserinfo(input: &[u8]) -> IMAPResult<&[u8], UrlUserInfo<'_>> {
    let (remaining, user) = opt(enc_user)(input)?;
    let (remaining, auth) = opt(preceded(tag_no_case(b";AUTH="), auth_mechanism))(remaining)?;

    if user.is_none() && auth.is_none() {
        return Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::Nom(nom::error::ErrorKind::Alt),
        }));
    }

    Ok((remaining, UrlUserInfo { user, auth }))
}

/// `iauth = ";AUTH=" ( "*" / enc-auth-type )`
fn auth_mechanism(input: &[u8]) -> IMAPResult<&[u8], UrlAuthMechanism<'_>> {
    alt((
        value(UrlAuthMechanism::Any, tag(b"*")),
        map(enc_user, UrlAuthMechanism::Mechanism),
    ))(input)
}

/// `host = IP-literal / IPv4address / reg-name`
fn url_host(input: &[u8]) -> IMAPResult<&[u8], UrlHost<'_>> {
    alt((
        map(
            delimited(
                tag(b"["),
                take_while1(|b: u8| b != b']' && !b.is_ascii_control()),
                tag(b"]"),
            ),
            |literal: &[u8]| {
                // Safety: control bytes are excluded and `]` terminates,
                // leaving printable ASCII.
                UrlHost::IpLiteral(Cow::Borrowed(from_utf8(literal).unwrap()))
            },
        ),
        map(ipv4_address, UrlHost::Ipv4),
        map(
            |i| pct_string(i, is_url_reg_name_char),
            UrlHost::RegName,
        ),
    ))(input)
}

/// `IPv4address = dec-octet "." dec-octet "." dec-octet "." dec-octet`
///
/// A name that merely looks numeric falls through to `reg-name`.
fn ipv4_address(input: &[u8]) -> IMAPResult<&[u8], Ipv4Addr> {
    fn dec_octet(input: &[u8]) -> IMAPResult<&[u8], u8> {
        let (remaining, digits) = take_while1(|b: u8| b.is_ascii_digit())(input)?;

        // Safety: ASCII digits.
        from_utf8(digits)
            .unwrap()
            .parse::<u8>()
            .map(|octet| (remaining, octet))
            .map_err(|_| {
                nom::Err::Error(IMAPParseError {
                    input,
                    kind: IMAPErrorKind::BadNumber,
                })
            })
    }

    let (remaining, (a, _, b, _, c, _, d)) = tuple((
        dec_octet,
        tag(b"."),
        dec_octet,
        tag(b"."),
        dec_octet,
        tag(b"."),
        dec_octet,
    ))(input)?;

    // "10.0.0.1x" is a reg-name, not an address with a remainder.
    if remaining
        .first()
        .is_some_and(|b| is_url_reg_name_char(*b))
    {
        return Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::Nom(nom::error::ErrorKind::Verify),
        }));
    }

    Ok((remaining, Ipv4Addr::new(a, b, c, d)))
}

/// `port = 1*DIGIT`, bounded to the 16-bit range.
fn url_port(input: &[u8]) -> IMAPResult<&[u8], u16> {
    let (remaining, digits) = take_while1(|b: u8| b.is_ascii_digit())(input)?;

    // Safety: ASCII digits.
    from_utf8(digits)
        .unwrap()
        .parse::<u16>()
        .map(|port| (remaining, port))
        .map_err(|_| {
            nom::Err::Error(IMAPParseError {
                input,
                kind: IMAPErrorKind::BadNumber,
            })
        })
}

/// `number = 1*DIGIT`, complete-mode twin of the lexical production.
fn url_number(input: &[u8]) -> IMAPResult<&[u8], u32> {
    let (remaining, digits) = take_while1(|b: u8| b.is_ascii_digit())(input)?;

    // Safety: ASCII digits.
    from_utf8(digits)
        .unwrap()
        .parse::<u32>()
        .map(|number| (remaining, number))
        .map_err(|_| {
            nom::Err::Error(IMAPParseError {
                input,
                kind: IMAPErrorKind::BadNumber,
            })
        })
}

/// `nz-number`, complete-mode; a leading zero does not match.
fn url_nz_number(input: &[u8]) -> IMAPResult<&[u8], NonZeroU32> {
    if input.first() == Some(&b'0') {
        return Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::BadNumber,
        }));
    }

    let (remaining, number) = url_number(input)?;

    NonZeroU32::new(number)
        .map(|number| (remaining, number))
        .ok_or_else(|| {
            nom::Err::Error(IMAPParseError {
                input,
                kind: IMAPErrorKind::BadNumber,
            })
        })
}

/// `icommand = imessagelist / imessagepart [iurlauth]`
///
/// The message-part form is attempted first because the message-list
/// form is a proper prefix of it.
fn icommand(input: &[u8]) -> IMAPResult<&[u8], UrlCommand<'_>> {
    alt((imessagepart, imessagelist))(input)
}

/// `imessagelist = imailbox-ref ["?" enc-search]`
fn imessagelist(input: &[u8]) -> IMAPResult<&[u8], UrlCommand<'_>> {
    let (remaining, mailbox) = imailbox_ref(input)?;
    let (remaining, search) = opt(preceded(tag(b"?"), |i| {
        pct_bytes(i, is_url_bchar_unencoded)
    }))(remaining)?;

    Ok((remaining, UrlCommand::MessageList { mailbox, search }))
}

/// `imailbox-ref = enc-mailbox [";UIDVALIDITY=" nz-number]`
fn imailbox_ref(input: &[u8]) -> IMAPResult<&[u8], MailboxRef<'_>> {
    let (remaining, mailbox) = pct_bytes(input, is_url_bchar_unencoded)?;
    let (remaining, uid_validity) =
        opt(preceded(tag_no_case(b";UIDVALIDITY="), url_nz_number))(remaining)?;

    Ok((
        remaining,
        MailboxRef {
            mailbox,
            uid_validity,
        },
    ))
}

/// `imessagepart = imailbox-ref iuid [isection] [ipartial]`, plus the
/// optional `iurlauth` tail of RFC 4467.
fn imessagepart(input: &[u8]) -> IMAPResult<&[u8], UrlCommand<'_>> {
    let (remaining, mut mailbox) = imailbox_ref(input)?;

    // `iuid = "/;UID=" nz-number`. The maximal enc-mailbox run may have
    // swallowed the slash; give it back.
    let (remaining, uid) = if let Ok((rest, uid)) =
        preceded(tag_no_case::<_, _, IMAPParseError<&[u8]>>(b"/;UID="), url_nz_number)(remaining)
    {
        (rest, uid)
    } else if mailbox.mailbox.last() == Some(&b'/') {
        let (rest, uid) = preceded(tag_no_case(b";UID="), url_nz_number)(remaining)?;
        truncate_trailing_slash(&mut mailbox.mailbox);
        (rest, uid)
    } else {
        return Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::Nom(nom::error::ErrorKind::Tag),
        }));
    };

    // `isection = "/;SECTION=" enc-section`
    let (remaining, mut section) = opt(preceded(tag_no_case(b"/;SECTION="), |i| {
        pct_bytes(i, is_url_bchar_unencoded)
    }))(remaining)?;

    // `ipartial = "/;PARTIAL=" partial-range`, with the same trailing
    // slash rule against the section. A fatal range error must not be
    // masked by the fallback.
    let (remaining, partial) = match preceded(
        tag_no_case::<_, _, IMAPParseError<&[u8]>>(b"/;PARTIAL="),
        partial_range,
    )(remaining)
    {
        Ok((rest, partial)) => (rest, Some(partial)),
        Err(fatal @ nom::Err::Failure(_)) => return Err(fatal),
        Err(_)
            if section
                .as_ref()
                .is_some_and(|section| section.last() == Some(&b'/')) =>
        {
            match preceded(
                tag_no_case::<_, _, IMAPParseError<&[u8]>>(b";PARTIAL="),
                partial_range,
            )(remaining)
            {
                Ok((rest, partial)) => {
                    truncate_trailing_slash(section.as_mut().expect("checked above"));
                    (rest, Some(partial))
                }
                Err(fatal @ nom::Err::Failure(_)) => return Err(fatal),
                Err(_) => (remaining, None),
            }
        }
        Err(_) => (remaining, None),
    };

    let (remaining, auth) = opt(iurlauth)(remaining)?;

    Ok((
        remaining,
        UrlCommand::MessagePart {
            path: MessagePath {
                mailbox,
                uid,
                section,
                partial,
            },
            auth,
        },
    ))
}

fn truncate_trailing_slash(bytes: &mut Cow<'_, [u8]>) {
    match bytes {
        Cow::Borrowed(slice) => *slice = &slice[..slice.len() - 1],
        Cow::Owned(vec) => {
            vec.pop();
        }
    }
}

/// `partial-range = number ["." nz-number]`
///
/// A zero length or a range leaving the 32-bit space is malformed.
fn partial_range(input: &[u8]) -> IMAPResult<&[u8], PartialRange> {
    let (remaining, offset) = url_number(input)?;
    let (remaining, length) = opt(preceded(tag(b"."), url_number))(remaining)?;

    let length = match length {
        None => None,
        Some(length) => {
            let Some(length) = NonZeroU32::new(length) else {
                return Err(nom::Err::Failure(IMAPParseError {
                    input,
                    kind: IMAPErrorKind::BadPartialRange,
                }));
            };

            if offset.checked_add(length.get() - 1).is_none() {
                return Err(nom::Err::Failure(IMAPParseError {
                    input,
                    kind: IMAPErrorKind::BadPartialRange,
                }));
            }

            Some(length)
        }
    };

    Ok((remaining, PartialRange { offset, length }))
}

/// ```abnf
/// iurlauth = [";EXPIRE=" date-time] ";URLAUTH=" access
///            [":" uauth-mechanism ":" enc-urlauth]
/// ```
///
/// Without the verifier tail this is the rump that gets MAC'd.
fn iurlauth(input: &[u8]) -> IMAPResult<&[u8], UrlAuth<'_>> {
    let (remaining, expire) = opt(preceded(tag_no_case(b";EXPIRE="), timestamp))(input)?;
    let (remaining, access) = preceded(tag_no_case(b";URLAUTH="), url_access)(remaining)?;
    let (remaining, verifier) = opt(url_verifier)(remaining)?;

    Ok((
        remaining,
        UrlAuth {
            expire,
            access,
            verifier,
        },
    ))
}

/// `access = "submit+" enc-user / "user+" enc-user / "authuser" / "anonymous"`
fn url_access(input: &[u8]) -> IMAPResult<&[u8], UrlAccess<'_>> {
    alt((
        map(
            preceded(tag_no_case(b"submit+"), enc_user),
            UrlAccess::Submit,
        ),
        map(preceded(tag_no_case(b"user+"), enc_user), UrlAccess::User),
        value(UrlAccess::AuthUser, tag_no_case(b"authuser")),
        value(UrlAccess::Anonymous, tag_no_case(b"anonymous")),
    ))(input)
}

/// `":" uauth-mechanism ":" enc-urlauth` where `enc-urlauth = 32*HEXDIG`.
fn url_verifier(input: &[u8]) -> IMAPResult<&[u8], UrlAuthVerifier<'_>> {
    let (remaining, mechanism) = preceded(
        tag(b":"),
        take_while1(|b: u8| b.is_ascii_alphanumeric() || b == b'-' || b == b'.'),
    )(input)?;

    // Safety: the mechanism alphabet is ASCII-only.
    let mechanism = from_utf8(mechanism).unwrap();
    let mechanism = if mechanism.eq_ignore_ascii_case("INTERNAL") {
        UrlAuthMechanismName::Internal
    } else {
        UrlAuthMechanismName::Other(Cow::Borrowed(mechanism))
    };

    let (remaining, token) = preceded(
        tag(b":"),
        take_while1(|b: u8| b.is_ascii_hexdigit()),
    )(remaining)?;

    if token.len() < 32 {
        return Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::Nom(nom::error::ErrorKind::Verify),
        }));
    }

    Ok((
        remaining,
        UrlAuthVerifier {
            mechanism,
            // Safety: hex digits are ASCII.
            token: Cow::Borrowed(from_utf8(token).unwrap()),
        },
    ))
}

/// `enc-user = 1*achar`, percent-decoded and validated as UTF-8.
fn enc_user(input: &[u8]) -> IMAPResult<&[u8], Cow<'_, str>> {
    let (remaining, decoded) = pct_bytes(input, is_url_achar_unencoded)?;

    match decoded {
        Cow::Borrowed(bytes) => match from_utf8(bytes) {
            Ok(text) => Ok((remaining, Cow::Borrowed(text))),
            Err(_) => Err(bad_utf8(input)),
        },
        Cow::Owned(bytes) => match String::from_utf8(bytes) {
            Ok(text) => Ok((remaining, Cow::Owned(text))),
            Err(_) => Err(bad_utf8(input)),
        },
    }
}

/// A percent-decoded run over `allowed`, decoded to text.
fn pct_string(input: &[u8], allowed: fn(u8) -> bool) -> IMAPResult<&[u8], Cow<'_, str>> {
    let (remaining, decoded) = pct_bytes(input, allowed)?;

    match decoded {
        Cow::Borrowed(bytes) => match from_utf8(bytes) {
            Ok(text) => Ok((remaining, Cow::Borrowed(text))),
            Err(_) => Err(bad_utf8(input)),
        },
        Cow::Owned(bytes) => match String::from_utf8(bytes) {
            Ok(text) => Ok((remaining, Cow::Owned(text))),
            Err(_) => Err(bad_utf8(input)),
        },
    }
}

fn bad_utf8(input: &[u8]) -> nom::Err<IMAPParseError<&[u8]>> {
    nom::Err::Failure(IMAPParseError {
        input,
        kind: IMAPErrorKind::BadUtf8,
    })
}

/// The maximal run of `allowed` characters and `%XX` escapes, decoded.
///
/// Only allocates when an escape is present. An invalid hex pair after
/// `%` is malformed, not a mismatch.
fn pct_bytes(input: &[u8], allowed: fn(u8) -> bool) -> IMAPResult<&[u8], Cow<'_, [u8]>> {
    let mut decoded: Option<Vec<u8>> = None;
    let mut position = 0;

    while position < input.len() {
        let byte = input[position];

        if allowed(byte) {
            if let Some(decoded) = decoded.as_mut() {
                decoded.push(byte);
            }
            position += 1;
        } else if byte == b'%' {
            let (high, low) = match (input.get(position + 1), input.get(position + 2)) {
                (Some(high), Some(low))
                    if high.is_ascii_hexdigit() && low.is_ascii_hexdigit() =>
                {
                    (*high, *low)
                }
                _ => {
                    return Err(nom::Err::Failure(IMAPParseError {
                        input: &input[position..],
                        kind: IMAPErrorKind::BadPercentEncoding,
                    }))
                }
            };

            let octet = (hex_value(high) << 4) | hex_value(low);
            decoded
                .get_or_insert_with(|| input[..position].to_vec())
                .push(octet);
            position += 3;
        } else {
            break;
        }
    }

    if position == 0 {
        return Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::Nom(nom::error::ErrorKind::TakeWhile1),
        }));
    }

    let value = match decoded {
        Some(decoded) => Cow::Owned(decoded),
        None => Cow::Borrowed(&input[..position]),
    };

    Ok((&input[position..], value))
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_part_url() {
        let wire = b"imap://user;AUTH=*@host.example:143/INBOX/;UID=42/;SECTION=HEADER";
        let (rem, url) = imap_url(wire).unwrap();
        assert_eq!(rem, b"");

        let user_info = url.server.user_info.unwrap();
        assert_eq!(user_info.user.as_deref(), Some("user"));
        assert_eq!(user_info.auth, Some(UrlAuthMechanism::Any));
        assert_eq!(
            url.server.host,
            UrlHost::RegName(Cow::Borrowed("host.example"))
        );
        assert_eq!(url.server.port, Some(143));

        match url.command {
            Some(UrlCommand::MessagePart { path, auth }) => {
                assert_eq!(path.mailbox.mailbox.as_ref(), b"INBOX");
                assert_eq!(path.mailbox.uid_validity, None);
                assert_eq!(path.uid.get(), 42);
                assert_eq!(path.section.as_deref(), Some(b"HEADER".as_ref()));
                assert_eq!(path.partial, None);
                assert!(auth.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_message_list_url() {
        let (_, url) = imap_url(b"imap://host/archive;UIDVALIDITY=385759045?subject%20today")
            .unwrap();
        match url.command {
            Some(UrlCommand::MessageList { mailbox, search }) => {
                assert_eq!(mailbox.mailbox.as_ref(), b"archive");
                assert_eq!(mailbox.uid_validity.map(|v| v.get()), Some(385759045));
                assert_eq!(search.as_deref(), Some(b"subject today".as_ref()));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_server_only_url() {
        let (_, url) = imap_url(b"imap://mail.example.org").unwrap();
        assert!(url.command.is_none());
        assert!(url.server.user_info.is_none());
        assert_eq!(url.server.port, None);

        let (_, url) = imap_url(b"imap://mail.example.org/").unwrap();
        assert!(url.command.is_none());
    }

    #[test]
    fn test_parse_host_forms() {
        let (_, url) = imap_url(b"imap://10.0.0.1/").unwrap();
        assert_eq!(url.server.host, UrlHost::Ipv4(Ipv4Addr::new(10, 0, 0, 1)));

        let (_, url) = imap_url(b"imap://[2001:db8::1]:993/").unwrap();
        assert_eq!(
            url.server.host,
            UrlHost::IpLiteral(Cow::Borrowed("2001:db8::1"))
        );
        assert_eq!(url.server.port, Some(993));

        // Out-of-range octets make it a reg-name.
        let (_, url) = imap_url(b"imap://999.12.13.14/").unwrap();
        assert!(matches!(url.server.host, UrlHost::RegName(_)));
    }

    #[test]
    fn test_parse_partial_and_uidvalidity() {
        let wire = b"imap://host/INBOX;UIDVALIDITY=7/;UID=5/;SECTION=1.2/;PARTIAL=0.1024";
        let (_, url) = imap_url(wire).unwrap();
        match url.command {
            Some(UrlCommand::MessagePart { path, .. }) => {
                assert_eq!(path.mailbox.uid_validity.map(|v| v.get()), Some(7));
                assert_eq!(path.section.as_deref(), Some(b"1.2".as_ref()));
                assert_eq!(
                    path.partial,
                    Some(PartialRange {
                        offset: 0,
                        length: NonZeroU32::new(1024),
                    })
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_partial_range_checks() {
        assert!(matches!(
            imap_url(b"imap://host/f/;UID=1/;PARTIAL=5.0"),
            Err(nom::Err::Failure(IMAPParseError {
                kind: IMAPErrorKind::BadPartialRange,
                ..
            }))
        ));
        assert!(matches!(
            imap_url(b"imap://host/f/;UID=1/;PARTIAL=4294967295.2"),
            Err(nom::Err::Failure(IMAPParseError {
                kind: IMAPErrorKind::BadPartialRange,
                ..
            }))
        ));
    }

    #[test]
    fn test_parse_urlauth() {
        let wire = b"imap://joe@example.com/INBOX/;UID=20;EXPIRE=2026-08-01T12:00:00Z;URLAUTH=user+fred:internal:91354a473744909de610943775f92038";
        let (rem, url) = imap_url(wire).unwrap();
        assert_eq!(rem, b"");

        match url.command {
            Some(UrlCommand::MessagePart { auth: Some(auth), .. }) => {
                assert!(auth.expire.is_some());
                assert_eq!(auth.access, UrlAccess::User(Cow::Borrowed("fred")));
                let verifier = auth.verifier.unwrap();
                assert_eq!(verifier.mechanism, UrlAuthMechanismName::Internal);
                assert_eq!(
                    verifier.token.as_ref(),
                    "91354a473744909de610943775f92038"
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_urlauth_rump_without_verifier() {
        let wire = b"imap://example.com/Sales/;UID=20000;URLAUTH=submit+fred";
        let (_, url) = imap_url(wire).unwrap();
        match url.command {
            Some(UrlCommand::MessagePart { auth: Some(auth), .. }) => {
                assert_eq!(auth.expire, None);
                assert_eq!(auth.access, UrlAccess::Submit(Cow::Borrowed("fred")));
                assert!(auth.verifier.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_percent_decoding() {
        let (_, url) = imap_url(b"imap://host/funny%2Fname/;UID=3").unwrap();
        match url.command {
            Some(UrlCommand::MessagePart { path, .. }) => {
                assert_eq!(path.mailbox.mailbox.as_ref(), b"funny/name");
            }
            other => panic!("unexpected command: {other:?}"),
        }

        // Broken escapes are malformed, not mismatches.
        assert!(matches!(
            imap_url(b"imap://host/bad%2xname/;UID=3"),
            Err(nom::Err::Failure(IMAPParseError {
                kind: IMAPErrorKind::BadPercentEncoding,
                ..
            }))
        ));
    }
}
