//! Greeting, condition states, untagged data and continuation requests.

use abnf_core::streaming::sp;
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case, take_while},
    combinator::{map, opt, peek, value},
    multi::separated_list1,
    sequence::{delimited, preceded, terminated, tuple},
};

use crate::{
    decode::{IMAPResult, ParseOptions},
    parse::{
        core::{base64, charset, newline, nz_number, tag_imap, text},
        extensions::{
            condstore_qresync::mod_sequence_value,
            enable::enable_data,
            id::id_response,
            metadata::metadata_code,
        },
        fetch::msg_att,
        flag::flag_perm,
        mailbox::mailbox_data,
        sequence::{sequence_set, uid_set},
    },
    types::{
        core::{Text, Vec1},
        response::{
            Bye, Capability, Code, CodeOther, ContinuationRequest, Data, Greeting, GreetingKind,
            Response, Status, StatusBody, StatusKind, Tagged,
        },
    },
};

// ----- greeting -----

/// `greeting = "*" SP (resp-cond-auth / resp-cond-bye) CRLF`
pub fn greeting<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Greeting<'a>> {
    let mut parser = delimited(
        tag(b"* "),
        alt((
            |i| resp_cond_auth(i, opts),
            map(
                |i| resp_cond_bye(i, opts),
                |(code, text)| (GreetingKind::Bye, (code, text)),
            ),
        )),
        newline,
    );

    let (remaining, (kind, (code, text))) = parser(input)?;

    Ok((remaining, Greeting { kind, code, text }))
}

/// `resp-cond-auth = ("OK" / "PREAUTH") SP resp-text`
#[allow(clippy::type_complexity)]
fn resp_cond_auth<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], (GreetingKind, (Option<Code<'a>>, Text<'a>))> {
    tuple((
        alt((
            value(GreetingKind::Ok, tag_no_case(b"OK ")),
            value(GreetingKind::PreAuth, tag_no_case(b"PREAUTH ")),
        )),
        |i| resp_text(i, opts),
    ))(input)
}

/// `resp-cond-bye = "BYE" SP resp-text`
#[allow(clippy::type_complexity)]
fn resp_cond_bye<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], (Option<Code<'a>>, Text<'a>)> {
    preceded(tag_no_case(b"BYE "), |i| resp_text(i, opts))(input)
}

/// `resp-text = ["[" resp-text-code "]" SP] text`
///
/// When the text starts with `[`, a code is insisted upon so a broken
/// code is never mistaken for text; an unknown code is preserved as raw
/// bytes. Some servers omit the text entirely, which is tolerated.
#[allow(clippy::type_complexity)]
fn resp_text<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], (Option<Code<'a>>, Text<'a>)> {
    let (_, start) = opt(tag(b"["))(input)?;

    if start.is_some() {
        tuple((
            preceded(
                tag(b"["),
                map(
                    alt((
                        terminated(|i| resp_text_code(i, opts), tag(b"]")),
                        map(
                            terminated(
                                take_while(|b: u8| b != b']' && b != b'\r' && b != b'\n'),
                                tag(b"]"),
                            ),
                            |bytes: &[u8]| Code::Other(CodeOther::unvalidated(bytes)),
                        ),
                    )),
                    Some,
                ),
            ),
            alt((
                preceded(sp, text),
                map(peek(newline), |_| {
                    log::warn!("tolerated a response code without text");
                    Text::unvalidated("...")
                }),
            )),
        ))(input)
    } else {
        map(text, |text| (None, text))(input)
    }
}

/// ```abnf
/// resp-text-code = "ALERT" /
///                  "BADCHARSET" [SP "(" charset *(SP charset) ")"] /
///                  capability-data /
///                  "PARSE" /
///                  "PERMANENTFLAGS" SP "(" [flag-perm *(SP flag-perm)] ")" /
///                  "READ-ONLY" / "READ-WRITE" / "TRYCREATE" /
///                  "UIDNEXT" SP nz-number / "UIDVALIDITY" SP nz-number /
///                  "UNSEEN" SP nz-number /
///                  "APPENDUID" SP nz-number SP append-uid /   ; RFC 4315
///                  "COPYUID" SP nz-number SP uid-set SP uid-set / ; RFC 4315
///                  "UIDNOTSTICKY" /                           ; RFC 4315
///                  "HIGHESTMODSEQ" SP mod-sequence-value /    ; RFC 7162
///                  "NOMODSEQ" /                               ; RFC 7162
///                  "MODIFIED" SP sequence-set /               ; RFC 7162
///                  "CLOSED" /                                 ; RFC 7162
///                  "METADATA" SP (…) /                        ; RFC 5464
///                  "OVERQUOTA" /                              ; RFC 9208
///                  "TOOBIG" /                                 ; RFC 4469
///                  "UNKNOWN-CTE" /                            ; RFC 3516
///                  atom [SP 1*<any TEXT-CHAR except "]">]
/// ```
///
/// The final catch-all lives in [`resp_text`].
fn resp_text_code<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Code<'a>> {
    alt((
        |i| resp_text_code_group1(i, opts),
        |i| resp_text_code_group2(i, opts),
    ))(input)
}

fn resp_text_code_group1<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Code<'a>> {
    alt((
        value(Code::Alert, tag_no_case(b"ALERT")),
        map(
            preceded(
                tag_no_case(b"BADCHARSET"),
                opt(delimited(
                    tag(b" ("),
                    separated_list1(sp, |i| charset(i, opts)),
                    tag(b")"),
                )),
            ),
            |allowed| Code::BadCharset {
                allowed: allowed.unwrap_or_default(),
            },
        ),
        map(|i| capability_data(i, opts), Code::Capability),
        value(Code::Parse, tag_no_case(b"PARSE")),
        map(
            preceded(
                tag_no_case(b"PERMANENTFLAGS "),
                delimited(
                    tag(b"("),
                    map(
                        opt(separated_list1(sp, |i| flag_perm(i, opts))),
                        Option::unwrap_or_default,
                    ),
                    tag(b")"),
                ),
            ),
            Code::PermanentFlags,
        ),
        value(Code::ReadOnly, tag_no_case(b"READ-ONLY")),
        value(Code::ReadWrite, tag_no_case(b"READ-WRITE")),
        value(Code::TryCreate, tag_no_case(b"TRYCREATE")),
        map(preceded(tag_no_case(b"UIDNEXT "), nz_number), Code::UidNext),
        map(
            preceded(tag_no_case(b"UIDVALIDITY "), nz_number),
            Code::UidValidity,
        ),
        map(preceded(tag_no_case(b"UNSEEN "), nz_number), Code::Unseen),
        map(
            preceded(
                tag_no_case(b"APPENDUID "),
                tuple((nz_number, preceded(sp, uid_set))),
            ),
            |(uid_validity, uid)| Code::AppendUid { uid_validity, uid },
        ),
        map(
            preceded(
                tag_no_case(b"COPYUID "),
                tuple((nz_number, preceded(sp, uid_set), preceded(sp, uid_set))),
            ),
            |(uid_validity, source, destination)| Code::CopyUid {
                uid_validity,
                source,
                destination,
            },
        ),
        value(Code::UidNotSticky, tag_no_case(b"UIDNOTSTICKY")),
    ))(input)
}

fn resp_text_code_group2<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Code<'a>> {
    alt((
        map(
            preceded(tag_no_case(b"HIGHESTMODSEQ "), mod_sequence_value),
            Code::HighestModSeq,
        ),
        value(Code::NoModSeq, tag_no_case(b"NOMODSEQ")),
        map(
            preceded(tag_no_case(b"MODIFIED "), sequence_set),
            Code::Modified,
        ),
        value(Code::Closed, tag_no_case(b"CLOSED")),
        map(
            preceded(tag_no_case(b"METADATA "), metadata_code),
            Code::Metadata,
        ),
        value(Code::OverQuota, tag_no_case(b"OVERQUOTA")),
        value(Code::TooBig, tag_no_case(b"TOOBIG")),
        value(Code::UnknownCte, tag_no_case(b"UNKNOWN-CTE")),
    ))(input)
}

/// `capability-data = "CAPABILITY" *(SP capability)`
///
/// The RFC requires IMAP4rev1 to be present; parsing does not enforce
/// this, matching deployed servers.
pub fn capability_data<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], Vec1<Capability<'a>>> {
    map(
        preceded(
            tag_no_case(b"CAPABILITY "),
            separated_list1(sp, |i| capability(i, opts)),
        ),
        Vec1::unvalidated,
    )(input)
}

/// `capability = ("AUTH=" auth-type) / atom`
///
/// The atom is consumed eagerly and classified afterwards.
pub fn capability<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Capability<'a>> {
    map(|i| crate::parse::core::atom(i, opts), Capability::from)(input)
}

// ----- response -----

/// `response = continue-req / response-data / response-done`
///
/// One message per call; the response-done branch covers tagged
/// condition states.
pub fn response<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Response<'a>> {
    alt((
        map(
            |i| continue_req(i, opts),
            Response::ContinuationRequest,
        ),
        |i| response_data(i, opts),
        map(|i| response_done(i, opts), Response::Status),
    ))(input)
}

/// `continue-req = "+" SP (resp-text / base64) CRLF`
///
/// A text that happens to be valid base64 decodes as base64; the two
/// forms cannot be told apart on the wire.
pub fn continue_req<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], ContinuationRequest<'a>> {
    enum Either<A, B> {
        Base64(A),
        Basic(B),
    }

    let mut parser = tuple((
        tag(b"+ "),
        alt((
            map(terminated(base64, peek(newline)), Either::Base64),
            map(|i| resp_text(i, opts), Either::Basic),
        )),
        newline,
    ));

    let (remaining, (_, either, _)) = parser(input)?;

    let request = match either {
        Either::Base64(data) => ContinuationRequest::Base64(data),
        Either::Basic((code, text)) => ContinuationRequest::Basic { code, text },
    };

    Ok((remaining, request))
}

/// ```abnf
/// response-data = "*" SP (resp-cond-state / resp-cond-bye /
///                 mailbox-data / message-data / capability-data /
///                 enable-data / id-response) CRLF
/// ```
fn response_data<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Response<'a>> {
    delimited(
        tag(b"* "),
        alt((
            map(
                |i| resp_cond_state(i, opts),
                |(kind, code, text)| {
                    Response::Status(Status::Untagged(StatusBody { kind, code, text }))
                },
            ),
            map(
                |i| resp_cond_bye(i, opts),
                |(code, text)| Response::Status(Status::Bye(Bye { code, text })),
            ),
            map(|i| mailbox_data(i, opts), Response::Data),
            map(|i| message_data(i, opts), Response::Data),
            map(|i| capability_data(i, opts), |caps| {
                Response::Data(Data::Capability(caps))
            }),
            map(|i| enable_data(i, opts), Response::Data),
            map(|i| id_response(i, opts), |parameters| {
                Response::Data(Data::Id { parameters })
            }),
        )),
        newline,
    )(input)
}

/// `resp-cond-state = ("OK" / "NO" / "BAD") SP resp-text`
#[allow(clippy::type_complexity)]
fn resp_cond_state<'a>(
    input: &'a [u8],
    opts: &ParseOptions,
) -> IMAPResult<&'a [u8], (StatusKind, Option<Code<'a>>, Text<'a>)> {
    let mut parser = tuple((
        alt((
            value(StatusKind::Ok, tag_no_case("OK ")),
            value(StatusKind::No, tag_no_case("NO ")),
            value(StatusKind::Bad, tag_no_case("BAD ")),
        )),
        |i| resp_text(i, opts),
    ));

    let (remaining, (kind, (code, text))) = parser(input)?;

    Ok((remaining, (kind, code, text)))
}

/// `response-done = response-tagged / response-fatal`
fn response_done<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Status<'a>> {
    alt((
        |i| response_tagged(i, opts),
        |i| response_fatal(i, opts),
    ))(input)
}

/// `response-tagged = tag SP resp-cond-state CRLF`
fn response_tagged<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Status<'a>> {
    let mut parser = tuple((tag_imap, sp, |i| resp_cond_state(i, opts), newline));

    let (remaining, (tag, _, (kind, code, text), _)) = parser(input)?;

    Ok((
        remaining,
        Status::Tagged(Tagged {
            tag,
            body: StatusBody { kind, code, text },
        }),
    ))
}

/// `response-fatal = "*" SP resp-cond-bye CRLF`
///
/// The server closes the connection immediately afterwards.
fn response_fatal<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Status<'a>> {
    let mut parser = delimited(tag(b"* "), |i| resp_cond_bye(i, opts), newline);

    let (remaining, (code, text)) = parser(input)?;

    Ok((remaining, Status::Bye(Bye { code, text })))
}

/// `message-data = nz-number SP ("EXPUNGE" / ("FETCH" SP msg-att))`
fn message_data<'a>(input: &'a [u8], opts: &ParseOptions) -> IMAPResult<&'a [u8], Data<'a>> {
    let (remaining, seq) = terminated(nz_number, sp)(input)?;

    alt((
        map(tag_no_case(b"EXPUNGE"), move |_| Data::Expunge(seq)),
        map(
            preceded(tag_no_case(b"FETCH "), |i| msg_att(i, opts)),
            move |items| Data::Fetch { seq, items },
        ),
    ))(remaining)
}
