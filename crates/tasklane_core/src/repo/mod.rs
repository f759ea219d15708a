//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value slot contract the board store persists through.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - A slot that was never written reads as `Ok(None)`, not an error.
//! - Writes fully overwrite any prior slot value.

pub mod slot_repo;
