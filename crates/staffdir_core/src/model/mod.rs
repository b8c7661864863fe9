//! Domain model for the employee directory.
//!
//! # Responsibility
//! - Define the canonical employee record used by core business logic.
//! - Keep identity semantics (transient vs persisted) explicit in the type.
//!
//! # Invariants
//! - A persisted employee is identified by a positive store-generated id.
//! - Deletion is a hard delete; the model carries no tombstone state.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod employee;
