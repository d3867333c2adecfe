//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row plus the create DTOs used by the repositories.

pub mod feedback;
pub mod location;
pub mod session;
pub mod user;
