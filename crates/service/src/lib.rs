//! Service layer providing account operations on top of models.
//! - Separates request handling from data access.
//! - Reuses validation and entity definitions in `models` crate.

pub mod errors;
pub mod account;
#[cfg(test)]
pub mod test_support;
