//! Domain model shared by the state tree and the API boundary.
//!
//! # Responsibility
//! - Define the survey and user-identity records the store manipulates.
//! - Mirror the wire envelopes the survey API wraps payloads in.
//!
//! # Invariants
//! - Survey content beyond `id`/`image_url` stays opaque to this crate.
//!
//! # See also
//! - docs/architecture/state-model.md

pub mod survey;
pub mod user;
