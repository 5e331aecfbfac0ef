//! In-memory contact state shared across the process.
//!
//! # Responsibility
//! - Own the live contact list and its change notifications.
//! - Stay storage-agnostic: nothing here persists or loads contacts.

pub mod contact_store;
