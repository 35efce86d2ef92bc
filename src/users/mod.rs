//! # Users Module
//!
//! Backend user records: creation on first registration, the admin
//! directory, and the promote/approve/suspend operations.

pub mod client;
pub mod models;

#[cfg(test)]
mod tests;

pub use client::UserClient;
pub use models::{NewUserRecord, UserRecord};
