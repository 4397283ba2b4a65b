//! Grammar nodes of IMAP extensions.

pub mod esearch;
pub mod gmail;
pub mod metadata;
pub mod namespace;
pub mod quota;
