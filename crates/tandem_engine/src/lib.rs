//! # Tandem Engine
//!
//! Reconciliation passes for workflow state held in two
//! independently-owned endpoints.
//!
//! This crate provides:
//! - `MembershipReconciler` — aligns which entries exist on the slave
//! - `StatusReconciler` — pushes master status, under vocabulary
//!   translation, when translated values diverge
//! - `DataReconciler` — replicates master properties and sequence into
//!   existing slave entries, never touching slave status
//! - `PropertyReconciler` — unconditionally pushes master properties into
//!   every matched slave entry
//! - `CachingSyncEndpoint` — a fetch-through read cache over any endpoint
//! - `ReconcilerPipeline` — the four passes sequenced over one pair
//!
//! ## Architecture
//!
//! Each reconciler holds two long-lived endpoint references (master and
//! slave) behind the `SyncEndpoint` capability from `tandem_core` and
//! exposes one synchronous `synchronize()` pass: fetch both sides, then
//! apply a batch of writes. Passes are stateless across invocations;
//! cadence, retry, and the role assignment for a given pair belong to the
//! caller. Neither endpoint ever learns about the other.
//!
//! ## Key invariants
//!
//! - The master is authoritative for membership and desired state
//! - Slave status is owned by the slave once an entry exists; only the
//!   status pass may move it, and only under translation
//! - An unmapped master status defers creation silently; an unmappable
//!   slave status fails the status and property passes
//! - Endpoint failures abort the remainder of a pass; earlier writes in
//!   the same pass stay applied

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod data;
mod membership;
mod pipeline;
mod property;
mod status;

pub use cache::CachingSyncEndpoint;
pub use data::DataReconciler;
pub use membership::MembershipReconciler;
pub use pipeline::ReconcilerPipeline;
pub use property::PropertyReconciler;
pub use status::StatusReconciler;
