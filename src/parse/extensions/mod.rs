//! Productions of IMAP extensions.

pub mod binary;
pub mod condstore_qresync;
pub mod enable;
pub mod esearch;
pub mod gmail;
pub mod id;
pub mod metadata;
pub mod namespace;
pub mod quota;
