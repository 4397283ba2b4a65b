//! Incremental, typed parsing of the IMAP4rev1 wire grammar
//! ([RFC 3501](https://datatracker.ietf.org/doc/html/rfc3501)) and the
//! extensions commonly deployed next to it: CONDSTORE/QRESYNC,
//! LIST-EXTENDED, ESEARCH, NAMESPACE, METADATA, QUOTA, URLAUTH,
//! SPECIAL-USE, ID, ENABLE, BINARY and the Gmail items.
//!
//! The crate consumes raw bytes received from an IMAP peer and produces
//! typed grammar nodes. Transport, framing above the grammar and
//! command serialisation are deliberately out of scope.
//!
//! # Decoding
//!
//! A [`decode::ByteCursor`] buffers the connection's bytes and hands
//! out one parsed [`types::response::Response`] per call. "Need more
//! data" is an ordinary, retryable outcome, distinct from a malformed
//! response:
//!
//! ```rust
//! use imap_wire::{
//!     decode::{ByteCursor, DecodeError, ParseOptions},
//!     types::response::{Data, Response},
//! };
//!
//! let mut cursor = ByteCursor::new(ParseOptions::default());
//! cursor.feed(b"* 23 EXISTS\r\n* SEA");
//!
//! assert!(matches!(
//!     cursor.next_response(),
//!     Ok(Response::Data(Data::Exists(23)))
//! ));
//!
//! // The second response is still in flight.
//! assert_eq!(cursor.next_response(), Err(DecodeError::Incomplete));
//!
//! cursor.feed(b"RCH 2 3\r\n");
//! assert!(matches!(
//!     cursor.next_response(),
//!     Ok(Response::Data(Data::Search { .. }))
//! ));
//! ```
//!
//! # Raw productions
//!
//! The nom productions behind the cursor live in [`parse`] and are
//! exported for callers that need individual grammar rules (sequence
//! sets, store modifiers, IMAP URLs, …) outside of response framing.

#![deny(missing_debug_implementations)]

pub mod decode;
pub mod parse;
pub mod types;
pub mod utils;
