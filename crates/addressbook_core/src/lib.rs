//! Core domain logic for the address book.
//! This crate owns the contact shape and the observable contact list.

pub mod logging;
pub mod model;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::contact::{Contact, ContactId, ContactValidationError};
pub use store::contact_store::{ContactStore, SubscriptionId};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
