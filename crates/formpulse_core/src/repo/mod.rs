//! Persistence contracts for the session key/value store.
//!
//! # Responsibility
//! - Define the key/value access contract the store depends on.
//! - Isolate SQLite query details from state/store orchestration.
//!
//! # Invariants
//! - Repository APIs never partially apply a write.
//!
//! # See also
//! - docs/architecture/session-persistence.md

pub mod session_repo;
