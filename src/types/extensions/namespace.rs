//! NAMESPACE grammar nodes (RFC 2342).

use crate::types::core::{IString, QuotedChar, Vec1};

/// One of the three namespace lists; `NIL` on the wire becomes an empty
/// vector.
pub type Namespaces<'a> = Vec<Namespace<'a>>;

/// A single namespace description: `"(" prefix SP separator *ext ")"`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Namespace<'a> {
    pub prefix: IString<'a>,
    /// The hierarchy delimiter; `NIL` for a flat namespace.
    pub delimiter: Option<QuotedChar>,
    pub extensions: Vec<NamespaceExtension<'a>>,
}

/// `Namespace_Response_Extension = SP string SP "(" string *(SP string) ")"`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct NamespaceExtension<'a> {
    pub key: IString<'a>,
    pub values: Vec1<IString<'a>>,
}
