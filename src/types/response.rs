//! Server responses: greeting, status responses, untagged data and
//! continuation requests.

use std::num::{NonZeroU32, NonZeroU64};

use crate::types::{
    core::{AString, Atom, Charset, IString, NString, QuotedChar, Tag, Text, Vec1},
    extensions::{
        esearch::ExtendedSearchResponse,
        metadata::{MetadataCode, MetadataResponse},
        namespace::Namespaces,
        quota::QuotaGet,
    },
    fetch::MessageDataItem,
    flag::{Flag, FlagNameAttribute, FlagPerm},
    mailbox::Mailbox,
    params::TaggedExtValue,
    sequence::SequenceSet,
    status::StatusItems,
};

/// One parsed server message.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Response<'a> {
    /// Tagged or untagged condition state, or BYE.
    Status(Status<'a>),
    /// Untagged data.
    Data(Data<'a>),
    /// `+ …`: the server is ready for the rest of a command.
    ContinuationRequest(ContinuationRequest<'a>),
}

/// The first line of every session: `* (OK / PREAUTH / BYE) resp-text`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Greeting<'a> {
    pub kind: GreetingKind,
    pub code: Option<Code<'a>>,
    pub text: Text<'a>,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GreetingKind {
    /// Connection is not yet authenticated.
    Ok,
    /// Connection has already been authenticated by external means.
    PreAuth,
    /// The server is unwilling to accept a connection.
    Bye,
}

/// OK/NO/BAD condition states and BYE.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Status<'a> {
    Untagged(StatusBody<'a>),
    Tagged(Tagged<'a>),
    Bye(Bye<'a>),
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Tagged<'a> {
    pub tag: Tag<'a>,
    pub body: StatusBody<'a>,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct StatusBody<'a> {
    pub kind: StatusKind,
    pub code: Option<Code<'a>>,
    pub text: Text<'a>,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StatusKind {
    Ok,
    No,
    Bad,
}

/// The server is about to close the connection.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Bye<'a> {
    pub code: Option<Code<'a>>,
    pub text: Text<'a>,
}

/// A response code, the bracketed part of a condition state.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Code<'a> {
    Alert,
    BadCharset {
        allowed: Vec<Charset<'a>>,
    },
    Capability(Vec1<Capability<'a>>),
    Parse,
    PermanentFlags(Vec<FlagPerm<'a>>),
    ReadOnly,
    ReadWrite,
    TryCreate,
    UidNext(NonZeroU32),
    UidValidity(NonZeroU32),
    Unseen(NonZeroU32),
    /// `APPENDUID` (UIDPLUS, RFC 4315).
    AppendUid {
        uid_validity: NonZeroU32,
        /// A single UID, or a set when MULTIAPPEND was used.
        uid: SequenceSet,
    },
    /// `COPYUID` (UIDPLUS, RFC 4315).
    CopyUid {
        uid_validity: NonZeroU32,
        source: SequenceSet,
        destination: SequenceSet,
    },
    /// `UIDNOTSTICKY` (UIDPLUS, RFC 4315).
    UidNotSticky,
    /// `HIGHESTMODSEQ n` (CONDSTORE, RFC 7162).
    HighestModSeq(NonZeroU64),
    /// `NOMODSEQ` (CONDSTORE, RFC 7162).
    NoModSeq,
    /// `MODIFIED sequence-set` (CONDSTORE, RFC 7162).
    Modified(SequenceSet),
    /// `CLOSED` (QRESYNC, RFC 7162).
    Closed,
    /// `METADATA …` codes (RFC 5464).
    Metadata(MetadataCode),
    /// `OVERQUOTA` (RFC 9208).
    OverQuota,
    /// `TOOBIG` (RFC 4469).
    TooBig,
    /// `UNKNOWN-CTE` (RFC 3516).
    UnknownCte,
    /// Any other code; the raw bytes up to `]` are preserved.
    Other(CodeOther<'a>),
}

/// An unrecognised response code: `atom [SP 1*<any TEXT-CHAR except "]">]`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CodeOther<'a>(pub(crate) std::borrow::Cow<'a, [u8]>);

impl<'a> CodeOther<'a> {
    pub fn inner(&self) -> &[u8] {
        &self.0
    }

    pub(crate) fn unvalidated(data: &'a [u8]) -> Self {
        Self(std::borrow::Cow::Borrowed(data))
    }
}

/// A single capability name.
///
/// The parser eagerly consumes an atom and classifies it afterwards, so
/// `QUOTAFOO` never half-matches `QUOTA`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Capability<'a> {
    Imap4Rev1,
    /// `AUTH=<mechanism>`
    Auth(Atom<'a>),
    Binary,
    Children,
    CondStore,
    Enable,
    Esearch,
    Id,
    Idle,
    ListExtended,
    ListStatus,
    LiteralPlus,
    LiteralMinus,
    Metadata,
    MetadataServer,
    Move,
    Namespace,
    Qresync,
    Quota,
    /// `QUOTA=RES-<resource>` (RFC 9208).
    QuotaRes(Atom<'a>),
    QuotaSet,
    SaslIr,
    SearchRes,
    SpecialUse,
    StartTls,
    UidPlus,
    Unselect,
    UrlAuth,
    /// `X-GM-EXT-1` (Gmail).
    GmailExt1,
    Other(Atom<'a>),
}

impl<'a> From<Atom<'a>> for Capability<'a> {
    fn from(atom: Atom<'a>) -> Self {
        let upper = atom.as_ref().to_ascii_uppercase();

        if let Some(mechanism) = upper.strip_prefix("AUTH=") {
            // Preserve the mechanism's original spelling.
            let offset = atom.as_ref().len() - mechanism.len();
            if let Ok(mechanism) = Atom::try_from(atom.as_ref()[offset..].to_owned()) {
                return Self::Auth(mechanism);
            }
        }

        if let Some(resource) = upper.strip_prefix("QUOTA=RES-") {
            let offset = atom.as_ref().len() - resource.len();
            if let Ok(resource) = Atom::try_from(atom.as_ref()[offset..].to_owned()) {
                return Self::QuotaRes(resource);
            }
        }

        match upper.as_str() {
            "IMAP4REV1" => Self::Imap4Rev1,
            "BINARY" => Self::Binary,
            "CHILDREN" => Self::Children,
            "CONDSTORE" => Self::CondStore,
            "ENABLE" => Self::Enable,
            "ESEARCH" => Self::Esearch,
            "ID" => Self::Id,
            "IDLE" => Self::Idle,
            "LIST-EXTENDED" => Self::ListExtended,
            "LIST-STATUS" => Self::ListStatus,
            "LITERAL+" => Self::LiteralPlus,
            "LITERAL-" => Self::LiteralMinus,
            "METADATA" => Self::Metadata,
            "METADATA-SERVER" => Self::MetadataServer,
            "MOVE" => Self::Move,
            "NAMESPACE" => Self::Namespace,
            "QRESYNC" => Self::Qresync,
            "QUOTA" => Self::Quota,
            "QUOTASET" => Self::QuotaSet,
            "SASL-IR" => Self::SaslIr,
            "SEARCHRES" => Self::SearchRes,
            "SPECIAL-USE" => Self::SpecialUse,
            "STARTTLS" => Self::StartTls,
            "UIDPLUS" => Self::UidPlus,
            "UNSELECT" => Self::Unselect,
            "URLAUTH" => Self::UrlAuth,
            "X-GM-EXT-1" => Self::GmailExt1,
            _ => Self::Other(atom),
        }
    }
}

/// Untagged server data.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Data<'a> {
    Capability(Vec1<Capability<'a>>),
    List {
        items: Vec<FlagNameAttribute<'a>>,
        delimiter: Option<QuotedChar>,
        mailbox: Mailbox<'a>,
        /// LIST-EXTENDED items in wire order (RFC 5258).
        extensions: Vec<(AString<'a>, TaggedExtValue<'a>)>,
    },
    Lsub {
        items: Vec<FlagNameAttribute<'a>>,
        delimiter: Option<QuotedChar>,
        mailbox: Mailbox<'a>,
    },
    /// Legacy `SEARCH` data, with the CONDSTORE `(MODSEQ n)` tail.
    Search {
        ids: Vec<NonZeroU32>,
        highest_modseq: Option<NonZeroU64>,
    },
    /// `ESEARCH` data (RFC 4731).
    ExtendedSearch(ExtendedSearchResponse<'a>),
    Status {
        mailbox: Mailbox<'a>,
        items: StatusItems,
    },
    Exists(u32),
    Recent(u32),
    Expunge(NonZeroU32),
    /// `VANISHED [(EARLIER)]` (QRESYNC, RFC 7162).
    Vanished {
        earlier: bool,
        uids: SequenceSet,
    },
    Fetch {
        seq: NonZeroU32,
        items: Vec1<MessageDataItem<'a>>,
    },
    Flags(Vec<Flag<'a>>),
    /// `ENABLED` (RFC 5161).
    Enabled {
        capabilities: Vec<Capability<'a>>,
    },
    Namespace {
        personal: Namespaces<'a>,
        other: Namespaces<'a>,
        shared: Namespaces<'a>,
    },
    /// `METADATA` (RFC 5464).
    Metadata {
        mailbox: Mailbox<'a>,
        items: MetadataResponse<'a>,
    },
    /// `QUOTA` (RFC 9208).
    Quota {
        root: AString<'a>,
        quotas: Vec1<QuotaGet<'a>>,
    },
    /// `QUOTAROOT` (RFC 9208).
    QuotaRoot {
        mailbox: Mailbox<'a>,
        roots: Vec<AString<'a>>,
    },
    /// `ID` (RFC 2971).
    Id {
        parameters: Option<Vec<(IString<'a>, NString<'a>)>>,
    },
}

/// `continue-req = "+" SP (resp-text / base64) CRLF`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ContinuationRequest<'a> {
    Basic {
        code: Option<Code<'a>>,
        text: Text<'a>,
    },
    /// A server challenge, already base64-decoded.
    Base64(Vec<u8>),
}
