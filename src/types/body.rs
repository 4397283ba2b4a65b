//! The recursive MIME tree returned by `FETCH BODY`/`BODYSTRUCTURE`.

use crate::types::{
    core::{IString, NString, Vec1},
    envelope::Envelope,
};

/// `body = "(" (body-type-1part / body-type-mpart) ")"`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum BodyStructure<'a> {
    Single {
        body: Body<'a>,
        /// Extension data is optional and may be truncated at any level;
        /// a valid prefix is accepted.
        extension_data: Option<SinglePartExtensionData<'a>>,
    },
    Multi {
        /// Always at least one child part.
        bodies: Vec1<BodyStructure<'a>>,
        subtype: IString<'a>,
        extension_data: Option<MultiPartExtensionData<'a>>,
    },
}

/// A single-part body: the common fields plus the type-specific tail.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Body<'a> {
    pub basic: BasicFields<'a>,
    pub specific: SpecificFields<'a>,
}

/// `body-fields`: the fields every single-part body carries.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct BasicFields<'a> {
    /// Key/value parameters in wire order; order is preserved so that
    /// round-trip serialisation is stable.
    pub parameter_list: Vec<(IString<'a>, IString<'a>)>,
    pub id: NString<'a>,
    pub description: NString<'a>,
    pub content_transfer_encoding: ContentTransferEncoding<'a>,
    /// Size in octets.
    pub size: u32,
}

/// `body-fld-enc`, folded to the closed set of well-known encodings.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ContentTransferEncoding<'a> {
    SevenBit,
    EightBit,
    Binary,
    Base64,
    QuotedPrintable,
    Other(IString<'a>),
}

impl<'a> ContentTransferEncoding<'a> {
    /// Folds the wire string case-insensitively.
    pub fn from_istring(value: IString<'a>) -> Self {
        let folded = match value.to_str() {
            Ok(s) => s.to_ascii_lowercase(),
            Err(_) => return Self::Other(value),
        };

        match folded.as_str() {
            "7bit" => Self::SevenBit,
            "8bit" => Self::EightBit,
            "binary" => Self::Binary,
            "base64" => Self::Base64,
            "quoted-printable" => Self::QuotedPrintable,
            _ => Self::Other(value),
        }
    }
}

/// The discriminating tail of a single-part body.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SpecificFields<'a> {
    /// `body-type-basic`
    Basic {
        r#type: IString<'a>,
        subtype: IString<'a>,
    },
    /// `body-type-msg`: a `message/rfc822` part embedding a full message.
    Message {
        envelope: Box<Envelope<'a>>,
        body_structure: Box<BodyStructure<'a>>,
        number_of_lines: u32,
    },
    /// `body-type-text`
    Text {
        subtype: IString<'a>,
        number_of_lines: u32,
    },
}

/// `body-ext-1part`: MD5, then the nested optional tail.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SinglePartExtensionData<'a> {
    pub md5: NString<'a>,
    pub tail: Option<Disposition<'a>>,
}

/// `body-ext-mpart`: parameters, then the nested optional tail.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MultiPartExtensionData<'a> {
    pub parameter_list: Vec<(IString<'a>, IString<'a>)>,
    pub tail: Option<Disposition<'a>>,
}

/// `body-fld-dsp` and what may follow it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Disposition<'a> {
    pub disposition: Option<(IString<'a>, Vec<(IString<'a>, IString<'a>)>)>,
    pub tail: Option<Language<'a>>,
}

/// `body-fld-lang` and what may follow it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Language<'a> {
    pub language: Vec<IString<'a>>,
    pub tail: Option<Location<'a>>,
}

/// `body-fld-loc` and the trailing future-expansion values.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Location<'a> {
    pub location: NString<'a>,
    pub extensions: Vec<BodyExtension<'a>>,
}

/// `body-extension = nstring / number / "(" body-extension *(SP body-extension) ")"`
///
/// Recursion is bounded by the parser's depth limit.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum BodyExtension<'a> {
    NString(NString<'a>),
    Number(u32),
    List(Vec1<BodyExtension<'a>>),
}
