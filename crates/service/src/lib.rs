//! Service layer providing the classroom business rules on top of models.
//! - Separates business logic from data access through repository traits.
//! - Reuses validation and entity definitions in `models` crate.
//! - SeaORM repositories for production, `mock::MockStore` for tests.

pub mod errors;
pub mod auth;
pub mod classroom;
pub mod assignment;
pub mod comment;
pub mod profile_picture;
pub mod mock;
#[cfg(test)]
pub mod test_support;
