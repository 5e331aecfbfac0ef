//! Address-book domain model.
//!
//! # Responsibility
//! - Define the canonical contact record shared by store and callers.
//! - Offer opt-in validation; nothing in core enforces it implicitly.
//!
//! # Invariants
//! - Every contact carries all seven fields; none is optional.
//! - Id uniqueness is a caller concern.

pub mod contact;
