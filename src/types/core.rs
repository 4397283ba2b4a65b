//! Core string types of the grammar.
//!
//! ```text
//!        ┌───────┐ ┌─────────────────┐
//!        │AString│ │     NString     │
//!        └──┬─┬──┘ │(Option<IString>)│
//!           │ │    └─────┬───────────┘
//!           │ └──────┐   │
//!           │        │   │
//! ┌────┐ ┌──▼────┐ ┌─▼───▼─┐
//! │Atom│ │AtomExt│ │IString│
//! └────┘ └───────┘ └┬─────┬┘
//!                   │     │
//!             ┌─────▼─┐ ┌─▼────┐
//!             │Literal│ │Quoted│
//!             └───────┘ └──────┘
//! ```
//!
//! Raw bytes are preserved wherever the wire may carry non-UTF-8 data
//! (literals); UTF-8 is only promised where the character classes already
//! guarantee ASCII.

use std::{borrow::Cow, fmt, str::from_utf8};

use thiserror::Error;

use crate::utils::indicators::{
    is_astring_char, is_atom_char, is_char8, is_quoted_specials, is_text_char,
};

/// Why a typed constructor rejected a value.
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum ValidationError {
    #[error("must not be empty")]
    Empty,
    #[error("invalid byte b'\\x{found:02x}' at index {position}")]
    ByteNotAllowed { found: u8, position: usize },
    #[error("invalid character {found:?}")]
    CharNotAllowed { found: char },
}

fn verify_bytes(value: &[u8], allowed: fn(u8) -> bool) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty);
    }

    if let Some(position) = value.iter().position(|b| !allowed(*b)) {
        return Err(ValidationError::ByteNotAllowed {
            found: value[position],
            position,
        });
    }

    Ok(())
}

macro_rules! impl_str_newtype_conversions {
    ($target:ident) => {
        impl<'a> TryFrom<&'a str> for $target<'a> {
            type Error = ValidationError;

            fn try_from(value: &'a str) -> Result<Self, Self::Error> {
                Self::verify(value)?;

                Ok(Self(Cow::Borrowed(value)))
            }
        }

        impl<'a> TryFrom<String> for $target<'a> {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::verify(&value)?;

                Ok(Self(Cow::Owned(value)))
            }
        }

        impl<'a> TryFrom<&'a [u8]> for $target<'a> {
            type Error = ValidationError;

            fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
                Self::verify(value)?;

                // Safety: `verify` only passes ASCII subsets.
                Ok(Self(Cow::Borrowed(from_utf8(value).unwrap())))
            }
        }

        impl<'a> AsRef<str> for $target<'a> {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl<'a> fmt::Display for $target<'a> {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

/// An atom: one or more `ATOM-CHAR`s, the lightest token of the grammar.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Atom<'a>(pub(crate) Cow<'a, str>);

impl<'a> Atom<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), ValidationError> {
        verify_bytes(value.as_ref(), is_atom_char)
    }

    pub fn inner(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> Cow<'a, str> {
        self.0
    }

    pub(crate) fn unvalidated<C>(inner: C) -> Self
    where
        C: Into<Cow<'a, str>>,
    {
        let inner = inner.into();

        #[cfg(debug_assertions)]
        Self::verify(inner.as_bytes()).unwrap();

        Self(inner)
    }
}

impl_str_newtype_conversions!(Atom);

/// An atom over the wider `ASTRING-CHAR` alphabet (adds `]`).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct AtomExt<'a>(pub(crate) Cow<'a, str>);

impl<'a> AtomExt<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), ValidationError> {
        verify_bytes(value.as_ref(), is_astring_char)
    }

    pub fn inner(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> Cow<'a, str> {
        self.0
    }

    pub(crate) fn unvalidated<C>(inner: C) -> Self
    where
        C: Into<Cow<'a, str>>,
    {
        let inner = inner.into();

        #[cfg(debug_assertions)]
        Self::verify(inner.as_bytes()).unwrap();

        Self(inner)
    }
}

impl_str_newtype_conversions!(AtomExt);

impl<'a> From<Atom<'a>> for AtomExt<'a> {
    fn from(value: Atom<'a>) -> Self {
        Self(value.0)
    }
}

/// Whether a literal requires the peer to wait for a continuation request.
///
/// `{3}\r\nfoo` is synchronising, `{3+}\r\nfoo` is not (RFC 7888).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum LiteralMode {
    #[default]
    Sync,
    NonSync,
}

/// An explicit-length byte block, announced by `{n}`/`{n+}` + CRLF.
///
/// NUL is excluded from `CHAR8`, so a literal can never contain `0x00`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Literal<'a> {
    pub(crate) data: Cow<'a, [u8]>,
    pub(crate) mode: LiteralMode,
}

impl<'a> Literal<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), ValidationError> {
        let value = value.as_ref();

        if let Some(position) = value.iter().position(|b| !is_char8(*b)) {
            return Err(ValidationError::ByteNotAllowed {
                found: value[position],
                position,
            });
        }

        Ok(())
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn mode(&self) -> LiteralMode {
        self.mode
    }

    pub fn into_inner(self) -> Cow<'a, [u8]> {
        self.data
    }

    pub(crate) fn unvalidated(data: &'a [u8], mode: LiteralMode) -> Self {
        #[cfg(debug_assertions)]
        Self::verify(data).unwrap();

        Self {
            data: Cow::Borrowed(data),
            mode,
        }
    }
}

impl<'a> TryFrom<&'a [u8]> for Literal<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        Self::verify(value)?;

        Ok(Self {
            data: Cow::Borrowed(value),
            mode: LiteralMode::Sync,
        })
    }
}

impl<'a> TryFrom<&'a str> for Literal<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::try_from(value.as_bytes())
    }
}

impl TryFrom<Vec<u8>> for Literal<'_> {
    type Error = ValidationError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::verify(&value)?;

        Ok(Self {
            data: Cow::Owned(value),
            mode: LiteralMode::Sync,
        })
    }
}

impl<'a> AsRef<[u8]> for Literal<'a> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// A literal carrying arbitrary octets except NUL, marked by `~{n}`
/// (RFC 3516 / RFC 4466). Used for binary payloads.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Literal8<'a> {
    pub data: Cow<'a, [u8]>,
    pub mode: LiteralMode,
}

impl<'a> AsRef<[u8]> for Literal8<'a> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// A quoted string; stored in unescaped form.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Quoted<'a>(pub(crate) Cow<'a, str>);

impl<'a> Quoted<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), ValidationError> {
        let value = value.as_ref();

        // Quoted specials are allowed here because they are escaped on the
        // wire; anything outside TEXT-CHAR is not representable.
        if let Some(position) = value.iter().position(|b| !is_text_char(*b)) {
            return Err(ValidationError::ByteNotAllowed {
                found: value[position],
                position,
            });
        }

        Ok(())
    }

    pub fn inner(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> Cow<'a, str> {
        self.0
    }

    pub(crate) fn unvalidated<C>(inner: C) -> Self
    where
        C: Into<Cow<'a, str>>,
    {
        let inner = inner.into();

        #[cfg(debug_assertions)]
        Self::verify(inner.as_bytes()).unwrap();

        Self(inner)
    }
}

impl<'a> TryFrom<&'a str> for Quoted<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::verify(value)?;

        Ok(Self(Cow::Borrowed(value)))
    }
}

impl<'a> TryFrom<String> for Quoted<'a> {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::verify(&value)?;

        Ok(Self(Cow::Owned(value)))
    }
}

impl<'a> AsRef<str> for Quoted<'a> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Either a literal or a quoted string.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum IString<'a> {
    Literal(Literal<'a>),
    Quoted(Quoted<'a>),
}

impl<'a> IString<'a> {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Literal(literal) => literal.as_ref(),
            Self::Quoted(quoted) => quoted.as_ref().as_bytes(),
        }
    }

    /// Demands UTF-8 at the boundary where a string type is required.
    pub fn to_str(&self) -> Result<&str, std::str::Utf8Error> {
        match self {
            Self::Literal(literal) => from_utf8(literal.as_ref()),
            Self::Quoted(quoted) => Ok(quoted.as_ref()),
        }
    }

    pub fn into_inner(self) -> Cow<'a, [u8]> {
        match self {
            Self::Literal(literal) => literal.into_inner(),
            Self::Quoted(quoted) => match quoted.into_inner() {
                Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
                Cow::Owned(s) => Cow::Owned(s.into_bytes()),
            },
        }
    }
}

impl<'a> TryFrom<&'a str> for IString<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        if let Ok(quoted) = Quoted::try_from(value) {
            return Ok(IString::Quoted(quoted));
        }

        Ok(IString::Literal(Literal::try_from(value)?))
    }
}

impl<'a> From<Literal<'a>> for IString<'a> {
    fn from(value: Literal<'a>) -> Self {
        Self::Literal(value)
    }
}

impl<'a> From<Quoted<'a>> for IString<'a> {
    fn from(value: Quoted<'a>) -> Self {
        Self::Quoted(value)
    }
}

impl<'a> AsRef<[u8]> for IString<'a> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// `astring = 1*ASTRING-CHAR / string`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum AString<'a> {
    Atom(AtomExt<'a>),
    String(IString<'a>),
}

impl<'a> AString<'a> {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Atom(atom) => atom.inner().as_bytes(),
            Self::String(string) => string.as_bytes(),
        }
    }

    /// Demands UTF-8 at the boundary where a string type is required.
    pub fn to_str(&self) -> Result<&str, std::str::Utf8Error> {
        match self {
            Self::Atom(atom) => Ok(atom.inner()),
            Self::String(string) => string.to_str(),
        }
    }
}

impl<'a> TryFrom<&'a str> for AString<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        if let Ok(atom) = AtomExt::try_from(value) {
            return Ok(AString::Atom(atom));
        }

        Ok(AString::String(IString::try_from(value)?))
    }
}

impl<'a> From<AtomExt<'a>> for AString<'a> {
    fn from(value: AtomExt<'a>) -> Self {
        Self::Atom(value)
    }
}

impl<'a> From<IString<'a>> for AString<'a> {
    fn from(value: IString<'a>) -> Self {
        Self::String(value)
    }
}

impl<'a> AsRef<[u8]> for AString<'a> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Either `NIL` or a string.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct NString<'a>(pub Option<IString<'a>>);

impl<'a> NString<'a> {
    pub const NIL: NString<'static> = NString(None);

    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.0.as_ref().map(IString::as_bytes)
    }
}

impl<'a> TryFrom<&'a str> for NString<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Ok(Self(Some(IString::try_from(value)?)))
    }
}

impl<'a> From<Literal<'a>> for NString<'a> {
    fn from(value: Literal<'a>) -> Self {
        Self(Some(value.into()))
    }
}

impl<'a> From<Quoted<'a>> for NString<'a> {
    fn from(value: Quoted<'a>) -> Self {
        Self(Some(value.into()))
    }
}

/// `nstring / literal8`: the value form of METADATA and BINARY items.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum NString8<'a> {
    NString(NString<'a>),
    Literal8(Literal8<'a>),
}

/// A single `QUOTED-CHAR`, e.g. a mailbox hierarchy delimiter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct QuotedChar(char);

impl QuotedChar {
    pub fn verify(value: char) -> Result<(), ValidationError> {
        if value.is_ascii()
            && (is_text_char(value as u8) || is_quoted_specials(value as u8))
        {
            Ok(())
        } else {
            Err(ValidationError::CharNotAllowed { found: value })
        }
    }

    pub fn inner(&self) -> char {
        self.0
    }

    pub(crate) fn unvalidated(inner: char) -> Self {
        #[cfg(debug_assertions)]
        Self::verify(inner).unwrap();

        Self(inner)
    }
}

impl TryFrom<char> for QuotedChar {
    type Error = ValidationError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::verify(value)?;

        Ok(Self(value))
    }
}

/// `charset = atom / quoted` (errata id 261)
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Charset<'a> {
    Atom(Atom<'a>),
    Quoted(Quoted<'a>),
}

impl<'a> Charset<'a> {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Atom(atom) => atom.inner(),
            Self::Quoted(quoted) => quoted.inner(),
        }
    }
}

impl<'a> From<Atom<'a>> for Charset<'a> {
    fn from(value: Atom<'a>) -> Self {
        Self::Atom(value)
    }
}

/// A command tag: `1*<any ASTRING-CHAR except "+">`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Tag<'a>(pub(crate) Cow<'a, str>);

impl<'a> Tag<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), ValidationError> {
        verify_bytes(value.as_ref(), |b| is_astring_char(b) && b != b'+')
    }

    pub fn inner(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> Cow<'a, str> {
        self.0
    }

    pub(crate) fn unvalidated<C>(inner: C) -> Self
    where
        C: Into<Cow<'a, str>>,
    {
        let inner = inner.into();

        #[cfg(debug_assertions)]
        Self::verify(inner.as_bytes()).unwrap();

        Self(inner)
    }
}

impl_str_newtype_conversions!(Tag);

/// Human-readable text: `1*TEXT-CHAR`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Text<'a>(pub(crate) Cow<'a, str>);

impl<'a> Text<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), ValidationError> {
        verify_bytes(value.as_ref(), is_text_char)
    }

    pub fn inner(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> Cow<'a, str> {
        self.0
    }

    pub(crate) fn unvalidated<C>(inner: C) -> Self
    where
        C: Into<Cow<'a, str>>,
    {
        let inner = inner.into();

        #[cfg(debug_assertions)]
        Self::verify(inner.as_bytes()).unwrap();

        Self(inner)
    }
}

impl_str_newtype_conversions!(Text);

/// A non-empty vector.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Vec1<T>(Vec<T>);

impl<T> Vec1<T> {
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub(crate) fn unvalidated(inner: Vec<T>) -> Self {
        debug_assert!(!inner.is_empty());

        Self(inner)
    }
}

impl<T> From<T> for Vec1<T> {
    fn from(value: T) -> Self {
        Self(vec![value])
    }
}

impl<T> TryFrom<Vec<T>> for Vec1<T> {
    type Error = ValidationError;

    fn try_from(value: Vec<T>) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ValidationError::Empty);
        }

        Ok(Self(value))
    }
}

impl<T> AsRef<[T]> for Vec1<T> {
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

impl<T> IntoIterator for Vec1<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Vec1<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_constructors() {
        assert!(Atom::try_from("ok").is_ok());
        assert!(Atom::try_from("").is_err());
        assert!(Atom::try_from("a b").is_err());
        assert!(Atom::try_from("nope)").is_err());
        assert_eq!(Atom::try_from("xyz").unwrap().inner(), "xyz");
    }

    #[test]
    fn test_literal_rejects_nul() {
        assert!(Literal::try_from(b"ok".as_ref()).is_ok());
        assert_eq!(
            Literal::try_from(b"a\x00b".as_ref()),
            Err(ValidationError::ByteNotAllowed {
                found: 0,
                position: 1
            })
        );
    }

    #[test]
    fn test_quoted_char() {
        assert!(QuotedChar::try_from('/').is_ok());
        assert!(QuotedChar::try_from('"').is_ok());
        assert!(QuotedChar::try_from('\n').is_err());
        assert!(QuotedChar::try_from('ß').is_err());
    }

    #[test]
    fn test_vec1() {
        assert!(Vec1::<u8>::try_from(vec![]).is_err());
        let v = Vec1::<i32>::try_from(vec![1, 2]).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(Vec1::from(7).as_slice(), &[7]);
    }

    #[test]
    fn test_istring_to_str() {
        let q = IString::Quoted(Quoted::try_from("hello").unwrap());
        assert_eq!(q.to_str().unwrap(), "hello");

        let l = IString::Literal(Literal::try_from(b"\xff\xfe".as_ref()).unwrap());
        assert!(l.to_str().is_err());
    }
}
