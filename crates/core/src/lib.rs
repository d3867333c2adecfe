//! Domain logic for the bildir feedback platform.
//!
//! Pure types and rules only -- no I/O. The db and api crates build on the
//! error taxonomy, the issue catalog, the report/summary logic, and the
//! floor-scope authorization rules defined here.

pub mod catalog;
pub mod error;
pub mod report;
pub mod scope;
pub mod types;
