//! IMAP URL nodes (RFC 5092) and URLAUTH (RFC 4467).
//!
//! Percent-encoded components are stored decoded. Mailbox names and
//! search programs keep raw bytes (they may carry Modified-UTF-7 or other
//! non-UTF-8 octets after decoding); user names and mechanisms are ASCII
//! by grammar and stored as strings.

use std::{borrow::Cow, net::Ipv4Addr, num::NonZeroU32};

use chrono::{DateTime, FixedOffset};

/// `imapurl = "imap://" iserver ipath-query`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ImapUrl<'a> {
    pub server: UrlServer<'a>,
    /// `None` for a bare server reference (`imap://host/` or without the
    /// trailing slash).
    pub command: Option<UrlCommand<'a>>,
}

/// `iserver = [iuserinfo "@"] host [":" port]`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct UrlServer<'a> {
    pub user_info: Option<UrlUserInfo<'a>>,
    pub host: UrlHost<'a>,
    pub port: Option<u16>,
}

/// `iuserinfo = enc-user [iauth] / [enc-user] iauth`
///
/// At least one of the two fields is present.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct UrlUserInfo<'a> {
    pub user: Option<Cow<'a, str>>,
    pub auth: Option<UrlAuthMechanism<'a>>,
}

/// `iauth = ";AUTH=" ( "*" / enc-auth-type )`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum UrlAuthMechanism<'a> {
    /// `*`: any mechanism the client considers appropriate.
    Any,
    Mechanism(Cow<'a, str>),
}

/// `host = IP-literal / IPv4address / reg-name`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum UrlHost<'a> {
    /// The bracketed form: an IPv6 address or an `IPvFuture` literal,
    /// kept as raw text without the brackets.
    IpLiteral(Cow<'a, str>),
    Ipv4(Ipv4Addr),
    /// A registered name, percent-decoded.
    RegName(Cow<'a, str>),
}

/// `imailbox-ref = enc-mailbox [";UIDVALIDITY=" nz-number]`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MailboxRef<'a> {
    /// Percent-decoded mailbox bytes; possibly Modified-UTF-7.
    pub mailbox: Cow<'a, [u8]>,
    pub uid_validity: Option<NonZeroU32>,
}

/// `icommand = imessagelist / imessagepart [iurlauth]`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum UrlCommand<'a> {
    /// A mailbox reference with an optional `?enc-search` program.
    MessageList {
        mailbox: MailboxRef<'a>,
        /// Raw (percent-decoded) search program bytes.
        search: Option<Cow<'a, [u8]>>,
    },
    /// A fully addressed message (part), optionally authorised.
    MessagePart {
        path: MessagePath<'a>,
        auth: Option<UrlAuth<'a>>,
    },
}

/// `imessagepart = imailbox-ref iuid [isection] [ipartial]`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MessagePath<'a> {
    pub mailbox: MailboxRef<'a>,
    pub uid: NonZeroU32,
    /// Percent-decoded section specifier, e.g. `HEADER` or `1.2.TEXT`.
    pub section: Option<Cow<'a, [u8]>>,
    pub partial: Option<PartialRange>,
}

/// `partial-range = number ["." nz-number]`
///
/// Length is non-zero by grammar; `offset + length - 1` must stay within
/// the 32-bit range.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PartialRange {
    pub offset: u32,
    pub length: Option<NonZeroU32>,
}

/// `iurlauth = [";EXPIRE=" date-time] ";URLAUTH=" access [verifier]`
///
/// A URL carrying only the rump (no verifier) is what gets MAC'd; the
/// verifier is the appended `:mech:hex` tail.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct UrlAuth<'a> {
    pub expire: Option<DateTime<FixedOffset>>,
    pub access: UrlAccess<'a>,
    pub verifier: Option<UrlAuthVerifier<'a>>,
}

/// `access = "submit+" enc-user / "user+" enc-user / "authuser" / "anonymous"`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum UrlAccess<'a> {
    /// Use of the URL is limited to a message submission entity acting
    /// for the given user.
    Submit(Cow<'a, str>),
    /// Use is limited to the given user.
    User(Cow<'a, str>),
    /// Use is limited to any authenticated user.
    AuthUser,
    /// Anyone may use the URL.
    Anonymous,
}

/// `":" uauth-mechanism ":" 32*HEXDIG`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct UrlAuthVerifier<'a> {
    pub mechanism: UrlAuthMechanismName<'a>,
    /// The authorisation token, lower-cased hex as it appeared.
    pub token: Cow<'a, str>,
}

/// `uauth-mechanism = "INTERNAL" / 1*(ALPHA / DIGIT / "-" / ".")`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum UrlAuthMechanismName<'a> {
    Internal,
    Other(Cow<'a, str>),
}
