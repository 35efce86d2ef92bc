//! # API Module
//!
//! The authenticated request client and the wire shapes shared by every
//! backend call. Domain modules (`loans`, `applications`, `users`,
//! `payments`) build their typed operations on top of `ApiClient`.

pub mod client;
pub mod models;


pub use client::ApiClient;
pub use models::{DeleteOutcome, InsertOutcome, UpdateOutcome};
