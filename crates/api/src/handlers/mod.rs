pub mod auth;
pub mod feedback;
pub mod location;
pub mod pages;
pub mod staff;
