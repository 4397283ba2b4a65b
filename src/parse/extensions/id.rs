//! ID productions (RFC 2971).

use abnf_core::streaming::sp;
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, value},
    multi::separated_list0,
    sequence::{delimited, preceded, separated_pair},
};

use crate::{
    decode::{IMAPResult, ParseOptions},
    parse::core::{nil, nstring, string},
    types::core::{IString, Literal, NString},
};

/// ```abnf
/// id-response = "ID" SP id-params-list
/// ```
#[allow(clippy::type_complexity)]
pub fn id_response<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Option<Vec<(IString<'a>, NString<'a>)>>> {
    preceded(tag_no_case("ID "), |i| id_params_list(i, opts))(input)
}

/// ```abnf
/// id-params-list = "(" [string SP nstring *(SP string SP nstring)] ")" / nil
/// ```
///
/// Keys are UTF-8 by grammar. Mailbox names occurring in values are
/// Modified-UTF-7; when a decoder hook is configured, decodable values
/// are replaced by their decoded form.
#[allow(clippy::type_complexity)]
pub fn id_params_list<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Option<Vec<(IString<'a>, NString<'a>)>>> {
    let (remaining, parameters) = alt((
        map(
            delimited(
                tag("("),
                separated_list0(
                    sp,
                    separated_pair(|i| string(i, opts), sp, |i| nstring(i, opts)),
                ),
                tag(")"),
            ),
            Some,
        ),
        value(None, nil),
    ))(input)?;

    let Some(decode) = opts.decode_mailbox_name else {
        return Ok((remaining, parameters));
    };

    let parameters = parameters.map(|parameters| {
        parameters
            .into_iter()
            .map(|(key, value)| {
                // Decoded names may be non-ASCII, so a literal is the
                // only string form that can carry them.
                let value = match value.as_bytes().and_then(decode) {
                    Some(decoded) => match Literal::try_from(decoded.into_bytes()) {
                        Ok(decoded) => NString(Some(IString::Literal(decoded))),
                        Err(_) => value,
                    },
                    None => value,
                };

                (key, value)
            })
            .collect()
    });

    Ok((remaining, parameters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::core::Quoted;

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn test_parse_id_response() {
        let (_, got) = id_response(b"ID (\"name\" \"Dovecot\")\r", &opts()).unwrap();
        assert_eq!(
            got,
            Some(vec![(
                IString::Quoted(Quoted::try_from("name").unwrap()),
                NString::try_from("Dovecot").unwrap(),
            )])
        );

        let (_, got) = id_response(b"ID NIL\r", &opts()).unwrap();
        assert_eq!(got, None);

        let (_, got) = id_response(b"ID ()\r", &opts()).unwrap();
        assert_eq!(got, Some(vec![]));

        let (_, got) = id_response(b"ID (\"vendor\" NIL)\r", &opts()).unwrap();
        assert_eq!(
            got,
            Some(vec![(
                IString::Quoted(Quoted::try_from("vendor").unwrap()),
                NString(None),
            )])
        );
    }

    #[test]
    fn test_id_value_mailbox_decoding() {
        fn decode(bytes: &[u8]) -> Option<String> {
            // Stand-in for the external Modified-UTF-7 collaborator.
            std::str::from_utf8(bytes)
                .ok()
                .map(|s| s.replace("&AOQ-", "ä"))
        }

        let options = ParseOptions {
            decode_mailbox_name: Some(decode),
            ..ParseOptions::default()
        };

        let (_, got) = id_response(b"ID (\"mailbox\" \"Entw&AOQ-rfe\")\r", &options).unwrap();
        let value = &got.unwrap()[0].1;
        assert_eq!(value.as_bytes(), Some("Entwärfe".as_bytes()));
    }
}
