//! Service layer providing the store's business operations on top of models.
//! - Separates business rules from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Each area returns its own error type; HTTP mapping lives in `server`.

pub mod errors;
pub mod accounts;
pub mod catalog;
pub mod orders;
pub mod slots;
pub mod seed;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
