//! Replays a realistic server session through the cursor, in one piece
//! and in small chunks, and checks that the parses are identical.

use imap_wire::{
    decode::{ByteCursor, DecodeError, ParseOptions},
    types::response::{Data, GreetingKind, Response, Status},
};

const GREETING: &[u8] =
    b"* OK [CAPABILITY IMAP4rev1 LITERAL+ NAMESPACE QUOTA ID ENABLE CONDSTORE QRESYNC BINARY ESEARCH METADATA LIST-EXTENDED SPECIAL-USE X-GM-EXT-1] ready\r\n";

const TRACE: &[u8] = b"\
* LIST (\\HasNoChildren \\Sent) \"/\" Sent (CHILDINFO (\"SUBSCRIBED\"))\r\n\
* STATUS INBOX (MESSAGES 231 UIDNEXT 44292 UNSEEN 5 SIZE 44202 HIGHESTMODSEQ 7011231777)\r\n\
* ESEARCH (TAG \"A282\") UID MIN 2 MAX 47 COUNT 25 ALL 2:10,12:47\r\n\
* 12 FETCH (FLAGS (\\Seen) UID 30 INTERNALDATE \"01-Jul-2003 10:52:37 +0200\" RFC822.SIZE 44827 MODSEQ (624140003) BODY[HEADER] {13}\r\nSubject: Hi\r\n)\r\n\
* 13 FETCH (BODYSTRUCTURE ((\"TEXT\" \"PLAIN\" (\"CHARSET\" \"utf-8\") NIL NIL \"7BIT\" 1152 23)(\"TEXT\" \"HTML\" NIL NIL NIL \"QUOTED-PRINTABLE\" 4523 72) \"ALTERNATIVE\") X-GM-LABELS (\\Inbox work))\r\n\
* 42 EXPUNGE\r\n\
* VANISHED (EARLIER) 300:310\r\n\
* QUOTA \"\" (STORAGE 10 512)\r\n\
* NAMESPACE ((\"\" \"/\")) NIL NIL\r\n\
* METADATA INBOX (/shared/comment \"Shared comment\")\r\n\
* ID (\"name\" \"Dovecot\")\r\n\
* ENABLED CONDSTORE QRESYNC\r\n\
+ idling\r\n\
A283 OK [READ-WRITE] SELECT completed\r\n";

const TRACE_RESPONSES: usize = 14;

/// Parses the whole trace, returning the debug rendering of every
/// response so runs with different chunkings can be compared.
fn drain(cursor: &mut ByteCursor) -> Vec<String> {
    let mut rendered = Vec::new();

    loop {
        match cursor.next_response() {
            Ok(response) => rendered.push(format!("{response:?}")),
            Err(DecodeError::Incomplete) => break,
            Err(other) => panic!("trace must parse cleanly, got {other:?}"),
        }
    }

    rendered
}

#[test]
fn test_trace_in_one_piece() {
    let mut cursor = ByteCursor::new(ParseOptions::default());
    cursor.feed(GREETING);

    let greeting = cursor.next_greeting().unwrap();
    assert_eq!(greeting.kind, GreetingKind::Ok);

    cursor.feed(TRACE);
    let rendered = drain(&mut cursor);
    assert_eq!(rendered.len(), TRACE_RESPONSES);
    assert_eq!(cursor.unread(), b"");
}

#[test]
fn test_trace_chunked_parses_identically() {
    let mut reference = ByteCursor::new(ParseOptions::default());
    reference.feed(TRACE);
    let expected = drain(&mut reference);
    assert_eq!(expected.len(), TRACE_RESPONSES);

    for chunk_size in [1, 2, 3, 7, 64] {
        let mut cursor = ByteCursor::new(ParseOptions::default());
        let mut rendered = Vec::new();

        for chunk in TRACE.chunks(chunk_size) {
            cursor.feed(chunk);
            rendered.extend(drain(&mut cursor));
        }

        assert_eq!(rendered, expected, "chunk size {chunk_size}");
        assert_eq!(cursor.unread(), b"");
    }
}

#[test]
fn test_trace_with_compaction() {
    let mut cursor = ByteCursor::new(ParseOptions::default());
    let mut parsed = 0;

    for chunk in TRACE.chunks(11) {
        cursor.feed(chunk);

        loop {
            match cursor.next_response() {
                Ok(_) => parsed += 1,
                Err(DecodeError::Incomplete) => break,
                Err(other) => panic!("trace must parse cleanly, got {other:?}"),
            }
            // Dropping the consumed prefix must not disturb parsing.
            cursor.compact();
        }
    }

    assert_eq!(parsed, TRACE_RESPONSES);
    assert_eq!(cursor.unread(), b"");
}

#[test]
fn test_trace_spot_checks() {
    let mut cursor = ByteCursor::new(ParseOptions::default());
    cursor.feed(TRACE);

    match cursor.next_response().unwrap() {
        Response::Data(Data::List {
            delimiter,
            extensions,
            ..
        }) => {
            assert_eq!(delimiter.map(|d| d.inner()), Some('/'));
            assert_eq!(extensions.len(), 1);
        }
        other => panic!("expected LIST, got {other:?}"),
    }

    match cursor.next_response().unwrap() {
        Response::Data(Data::Status { items, .. }) => {
            assert_eq!(items.messages, Some(231));
            assert_eq!(items.size, Some(44202));
            assert_eq!(items.highest_modseq, Some(7011231777));
        }
        other => panic!("expected STATUS, got {other:?}"),
    }

    match cursor.next_response().unwrap() {
        Response::Data(Data::ExtendedSearch(esearch)) => {
            assert!(esearch.uid);
            assert_eq!(esearch.data.len(), 4);
        }
        other => panic!("expected ESEARCH, got {other:?}"),
    }

    match cursor.next_response().unwrap() {
        Response::Data(Data::Fetch { seq, items }) => {
            assert_eq!(seq.get(), 12);
            assert_eq!(items.len(), 6);
        }
        other => panic!("expected FETCH, got {other:?}"),
    }

    // The session ends with the tagged completion.
    let remaining = drain(&mut cursor);
    assert!(remaining.last().unwrap().contains("Tagged"));
}

#[test]
fn test_tagged_completion() {
    let mut cursor = ByteCursor::new(ParseOptions::default());
    cursor.feed(b"A283 OK [READ-WRITE] SELECT completed\r\n");

    match cursor.next_response().unwrap() {
        Response::Status(Status::Tagged(tagged)) => {
            assert_eq!(tagged.tag.inner(), "A283");
        }
        other => panic!("expected a tagged status, got {other:?}"),
    }
}
