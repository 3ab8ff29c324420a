//! Service layer for the favorites collection.
//! - Repository trait with MongoDB and in-memory implementations.
//! - `FavoriteService` holds the request rules (required fields, rating
//!   coercion, schema validation, id parsing).
//! - Every failure is a [`errors::ServiceError`] kind.

pub mod errors;
pub mod favorite;
#[cfg(test)]
pub mod test_support;
