//! ENABLE productions (RFC 5161).

use abnf_core::streaming::sp;
use nom::{
    bytes::streaming::tag_no_case,
    combinator::map,
    multi::many0,
    sequence::{preceded, tuple},
};

use crate::{
    decode::{IMAPResult, ParseOptions},
    parse::core::atom,
    types::response::{Capability, Data},
};

/// ```abnf
/// enable-data = "ENABLED" *(SP capability)
/// ```
pub fn enable_data<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Data<'a>> {
    let mut parser = tuple((
        tag_no_case(b"ENABLED"),
        many0(preceded(sp, map(|i| atom(i, opts), Capability::from))),
    ));

    let (remaining, (_, capabilities)) = parser(input)?;

    Ok((remaining, Data::Enabled { capabilities }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enable_data() {
        let (rem, got) = enable_data(b"ENABLED CONDSTORE QRESYNC\r", &ParseOptions::default())
            .unwrap();
        assert_eq!(rem, b"\r");
        assert_eq!(
            got,
            Data::Enabled {
                capabilities: vec![Capability::CondStore, Capability::Qresync]
            }
        );
    }

    #[test]
    fn test_parse_enable_data_empty() {
        let (_, got) = enable_data(b"ENABLED\r", &ParseOptions::default()).unwrap();
        assert_eq!(
            got,
            Data::Enabled {
                capabilities: vec![]
            }
        );
    }
}
