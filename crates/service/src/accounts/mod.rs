//! Accounts: registration, stateless login, profile edits and profile images.
//!
//! Split the same way as the rest of the service crate: plain domain types,
//! a repository trait with a sea-orm implementation, and a service that owns
//! the workflow rules.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repo;
pub mod repository;
pub mod service;
pub mod upload;

pub use service::{AccountConfig, AccountService};
