//! The incremental decoding layer.
//!
//! A [`ByteCursor`] owns the bytes received from the peer and a read
//! offset. The feeder appends with [`ByteCursor::feed`]; the dispatcher
//! calls [`ByteCursor::next_response`] (or
//! [`ByteCursor::next_greeting`] for the first line) until it returns
//! [`DecodeError::Incomplete`], then waits for more bytes and retries.
//! On success the offset advances past the consumed message; on
//! `Incomplete` it is untouched, so a retry re-parses from the same
//! position; on any other error it is left at the point of detection to
//! aid diagnostics.
//!
//! Four parse outcomes are distinguished throughout the crate, mapped
//! onto `nom`'s machinery:
//!
//! * success — `Ok((remaining, value))`;
//! * recoverable grammar mismatch — `nom::Err::Error`; an enclosing
//!   `alt`/`opt` retries the next alternative from the saved position;
//! * need more data — `nom::Err::Incomplete`; surfaces as
//!   [`DecodeError::Incomplete`];
//! * fatal — `nom::Err::Failure`; an invariant was violated (literal
//!   over the limit, NUL inside a literal, recursion depth, invalid
//!   base64, …) and no alternative may mask it.

use std::num::{ParseIntError, TryFromIntError};

use nom::error::{ErrorKind, FromExternalError, ParseError};
use thiserror::Error;

use crate::{
    parse::response::{greeting, response},
    types::{
        core::LiteralMode,
        response::{Greeting, Response},
    },
};

/// Result type of every grammar production in this crate.
pub type IMAPResult<I, O> = Result<(I, O), nom::Err<IMAPParseError<I>>>;

/// An extended version of [`nom::error::Error`].
#[derive(Debug)]
pub struct IMAPParseError<I> {
    pub input: I,
    pub kind: IMAPErrorKind,
}

/// An extended version of [`nom::error::ErrorKind`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IMAPErrorKind {
    /// A literal header was parsed but its body is not buffered yet.
    ///
    /// Raised only when the literal header ends the buffered input; with
    /// data following the header, the body is consumed directly.
    Literal { length: u32, mode: LiteralMode },
    /// The announced literal length exceeds the configured limit.
    ///
    /// Raised before any body bytes are taken.
    LiteralTooLarge { length: u64, limit: u64 },
    BadNumber,
    BadBase64,
    BadDateTime,
    BadPercentEncoding,
    BadPartialRange,
    BadUtf8,
    LiteralContainsNull,
    RecursionLimitExceeded,
    Nom(ErrorKind),
}

impl IMAPErrorKind {
    /// A short diagnostic for logs and [`DecodeError::Failed`].
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Literal { .. } => "literal body not buffered",
            Self::LiteralTooLarge { .. } => "literal exceeds configured limit",
            Self::BadNumber => "invalid or out-of-range number",
            Self::BadBase64 => "invalid base64",
            Self::BadDateTime => "invalid date-time",
            Self::BadPercentEncoding => "invalid percent-encoding",
            Self::BadPartialRange => "invalid partial range",
            Self::BadUtf8 => "invalid UTF-8",
            Self::LiteralContainsNull => "literal contains NUL",
            Self::RecursionLimitExceeded => "too much recursion",
            Self::Nom(_) => "no grammar production matched",
        }
    }
}

impl<I> ParseError<I> for IMAPParseError<I> {
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Self {
            input,
            kind: IMAPErrorKind::Nom(kind),
        }
    }

    fn append(input: I, kind: ErrorKind, _: Self) -> Self {
        Self {
            input,
            kind: IMAPErrorKind::Nom(kind),
        }
    }
}

impl<I> FromExternalError<I, ParseIntError> for IMAPParseError<I> {
    fn from_external_error(input: I, _: ErrorKind, _: ParseIntError) -> Self {
        Self {
            input,
            kind: IMAPErrorKind::BadNumber,
        }
    }
}

impl<I> FromExternalError<I, TryFromIntError> for IMAPParseError<I> {
    fn from_external_error(input: I, _: ErrorKind, _: TryFromIntError) -> Self {
        Self {
            input,
            kind: IMAPErrorKind::BadNumber,
        }
    }
}

impl<I> FromExternalError<I, base64::DecodeError> for IMAPParseError<I> {
    fn from_external_error(input: I, _: ErrorKind, _: base64::DecodeError) -> Self {
        Self {
            input,
            kind: IMAPErrorKind::BadBase64,
        }
    }
}

/// Deduplicates a short repeated string (flag and capability atoms).
///
/// Returns the canonical `'static` spelling when the value is known,
/// `None` to keep the borrowed input bytes. Must be idempotent.
pub type StringIntern = fn(&str) -> Option<&'static str>;

/// Decodes a Modified-UTF-7 mailbox name.
///
/// External collaborator contract; used for mailbox names appearing in
/// ID parameter values. Returns `None` when the bytes are not valid
/// Modified-UTF-7, in which case the raw bytes are kept.
pub type MailboxNameDecode = fn(&[u8]) -> Option<String>;

/// Per-connection parser configuration.
///
/// Immutable for the lifetime of the cursor; there is no process-wide
/// parser state.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    /// Largest acceptable single literal. Exceeding it is fatal before
    /// any body bytes are consumed.
    pub literal_size_limit: u32,
    /// Largest acceptable literal in message-body positions of FETCH
    /// data (`BODY[…]`, `RFC822*`, `BINARY`).
    pub body_size_limit: u32,
    /// Upper bound for nesting in recursive productions.
    pub max_recursion_depth: usize,
    pub intern: Option<StringIntern>,
    pub decode_mailbox_name: Option<MailboxNameDecode>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            literal_size_limit: 16 * 1024 * 1024,
            body_size_limit: 64 * 1024 * 1024,
            max_recursion_depth: 100,
            intern: None,
            decode_mailbox_name: None,
        }
    }
}

/// Error of a top-level decode call.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum DecodeError {
    /// More data is needed; the cursor position is unchanged.
    #[error("need more data")]
    Incomplete,

    /// A literal announced more bytes than the configured limit allows.
    #[error("literal of {length} bytes exceeds limit of {limit} bytes")]
    LiteralTooLarge { length: u64, limit: u64 },

    /// Nesting exceeded the configured recursion depth.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    /// The input is malformed; the connection should be terminated.
    #[error("malformed input: {hint}")]
    Failed { hint: &'static str },
}

/// An opaque saved read position of a [`ByteCursor`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Mark(usize);

/// The parse buffer of one connection.
///
/// Append-only from the feeder side; the read offset only moves forward
/// when a top-level parse succeeds (or is explicitly restored to a saved
/// [`Mark`]). A cursor must not be shared between concurrent parse
/// calls; the surrounding I/O layer owns it.
#[derive(Debug, Default)]
pub struct ByteCursor {
    buf: Vec<u8>,
    pos: usize,
    options: ParseOptions,
}

impl ByteCursor {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            buf: Vec::new(),
            pos: 0,
            options,
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Appends bytes received from the transport.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// The bytes not yet consumed by a successful parse.
    pub fn unread(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    /// How many bytes have been consumed since the last compaction.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Saves the current read position.
    pub fn save(&self) -> Mark {
        Mark(self.pos)
    }

    /// Moves the read position back to a previously saved [`Mark`].
    ///
    /// Marks are invalidated by [`ByteCursor::compact`].
    pub fn restore(&mut self, mark: Mark) {
        debug_assert!(mark.0 <= self.buf.len());
        self.pos = mark.0.min(self.buf.len());
    }

    /// Discards the consumed prefix, returning the number of bytes
    /// dropped. Outstanding [`Mark`]s are invalidated.
    pub fn compact(&mut self) -> usize {
        let dropped = self.pos;
        self.buf.drain(..self.pos);
        self.pos = 0;
        dropped
    }

    /// Parses the server greeting, the first line of a session.
    pub fn next_greeting(&mut self) -> Result<Greeting<'_>, DecodeError> {
        let total = self.buf.len();
        let pos = self.pos;

        match greeting(&self.buf[pos..], &self.options) {
            Ok((remaining, parsed)) => {
                self.pos = total - remaining.len();
                Ok(parsed)
            }
            Err(err) => {
                let (kind, at) = Self::error_details(err, total);
                let (mapped, new_pos) = Self::map_error(kind, at);
                if let Some(new_pos) = new_pos {
                    self.pos = new_pos;
                }
                Err(mapped)
            }
        }
    }

    /// Parses one complete server response from the unread region.
    ///
    /// Returns at most one grammar value per call.
    pub fn next_response(&mut self) -> Result<Response<'_>, DecodeError> {
        let total = self.buf.len();
        let pos = self.pos;

        match response(&self.buf[pos..], &self.options) {
            Ok((remaining, parsed)) => {
                self.pos = total - remaining.len();
                Ok(parsed)
            }
            Err(err) => {
                let (kind, at) = Self::error_details(err, total);
                let (mapped, new_pos) = Self::map_error(kind, at);
                if let Some(new_pos) = new_pos {
                    self.pos = new_pos;
                }
                Err(mapped)
            }
        }
    }

    /// Reduces a nom error to its copyable parts so the buffer borrow
    /// ends before the cursor is touched.
    fn error_details(
        err: nom::Err<IMAPParseError<&[u8]>>,
        total: usize,
    ) -> (Option<(IMAPErrorKind, bool)>, usize) {
        match err {
            nom::Err::Incomplete(_) => (None, total),
            nom::Err::Error(error) => (Some((error.kind, false)), total - error.input.len()),
            nom::Err::Failure(error) => (Some((error.kind, true)), total - error.input.len()),
        }
    }

    fn map_error(
        details: Option<(IMAPErrorKind, bool)>,
        at: usize,
    ) -> (DecodeError, Option<usize>) {
        let Some((kind, fatal)) = details else {
            return (DecodeError::Incomplete, None);
        };

        if !fatal {
            log::debug!("response rejected: {}", kind.hint());
            return (DecodeError::Failed { hint: kind.hint() }, None);
        }

        let mapped = match kind {
            // A literal header at the end of the buffer: the remainder
            // is in flight, not malformed.
            IMAPErrorKind::Literal { .. } => return (DecodeError::Incomplete, None),
            IMAPErrorKind::LiteralTooLarge { length, limit } => {
                DecodeError::LiteralTooLarge { length, limit }
            }
            IMAPErrorKind::RecursionLimitExceeded => DecodeError::RecursionLimitExceeded,
            kind => DecodeError::Failed { hint: kind.hint() },
        };

        log::debug!("fatal parse error at offset {at}: {}", kind.hint());
        // Leave the offset at the point of detection.
        (mapped, Some(at))
    }
}
