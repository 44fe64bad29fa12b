//! # Tandem Core
//!
//! Value types and contracts for the Tandem reconciliation engine.
//!
//! This crate provides:
//! - `SyncEntry`, the immutable entry snapshot exchanged with endpoints
//! - `VocabularyMap`, bidirectional status translation between two
//!   endpoint vocabularies
//! - `SyncEndpoint`, the capability every reconciler consumes
//! - `MemoryEndpoint`, an in-memory endpoint with a recorded-call log
//!
//! ## Key invariants
//!
//! - Entries are immutable snapshots; updates construct new entries
//! - Each local status maps to at most one partner status per direction
//! - Duplicate vocabulary registration fails instead of overwriting
//! - Status codes match exactly; no normalization anywhere

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod endpoint;
mod entry;
mod error;
mod vocabulary;

pub use endpoint::{EndpointCall, MemoryEndpoint, SyncEndpoint};
pub use entry::SyncEntry;
pub use error::{SyncError, SyncResult};
pub use vocabulary::{EndpointRole, VocabularyMap};
