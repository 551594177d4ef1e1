//! Corpus model and subject resolution
//!
//! The corpus is the immutable input of every analysis: the comments and
//! posts of one account, produced once by a fetcher and consumed once.

pub mod profile;
pub mod types;

pub use profile::{display_subject, extract_username, resolve_subject};
pub use types::{utc_from_epoch, Corpus, SourceItem, SourceKind};
