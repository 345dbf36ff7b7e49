//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod articles;
pub mod auth;
pub mod health;
pub mod likes;
pub mod users;
