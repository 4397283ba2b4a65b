//! Raw nom productions for the IMAP4rev1 formal syntax
//! ([RFC 3501](https://datatracker.ietf.org/doc/html/rfc3501#section-9))
//! and the extensions this crate understands.
//!
//! Productions that can embed strings or recurse take the
//! [`ParseOptions`](crate::decode::ParseOptions) of the connection;
//! recursive productions additionally carry a `remaining_recursions`
//! countdown seeded from `max_recursion_depth`.

pub mod body;
pub mod core;
pub mod datetime;
pub mod envelope;
pub mod extensions;
pub mod fetch;
pub mod flag;
pub mod mailbox;
pub mod response;
pub mod sequence;
pub mod status;
pub mod tagged_ext;
pub mod url;
