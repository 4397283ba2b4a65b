//! QUOTA grammar nodes (RFC 2087 / RFC 9208).

use std::fmt::{Display, Formatter};

use crate::types::core::Atom;

/// A quota resource name.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Resource<'a> {
    Storage,
    Message,
    Mailbox,
    AnnotationStorage,
    Other(Atom<'a>),
}

impl<'a> From<Atom<'a>> for Resource<'a> {
    fn from(atom: Atom<'a>) -> Self {
        match atom.as_ref().to_ascii_lowercase().as_ref() {
            "storage" => Self::Storage,
            "message" => Self::Message,
            "mailbox" => Self::Mailbox,
            "annotation-storage" => Self::AnnotationStorage,
            _ => Self::Other(atom),
        }
    }
}

impl Display for Resource<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Storage => f.write_str("STORAGE"),
            Self::Message => f.write_str("MESSAGE"),
            Self::Mailbox => f.write_str("MAILBOX"),
            Self::AnnotationStorage => f.write_str("ANNOTATION-STORAGE"),
            Self::Other(atom) => f.write_str(atom.inner()),
        }
    }
}

/// `quota-resource = resource-name SP resource-usage SP resource-limit`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct QuotaGet<'a> {
    pub resource: Resource<'a>,
    pub usage: u64,
    pub limit: u64,
}

/// `setquota-resource = resource-name SP resource-limit`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct QuotaSet<'a> {
    pub resource: Resource<'a>,
    pub limit: u64,
}
