#![forbid(unsafe_code)]
//! In-memory audit checklist store.
//!
//! One [`ChecklistStore`] holds the checklist of a single session: a small
//! table of (department, document) rows, each Pending until an upload marks
//! it Completed. The store is synchronous and wall-clock-free; callers pass
//! the completion timestamp in.

mod checklist;
mod seed;

pub use checklist::{ChecklistStore, SeedError, StoreError};
pub use seed::standard_pack;

pub const CRATE_NAME: &str = "audit-pack-store";
