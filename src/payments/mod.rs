//! # Payments Module
//!
//! Application-fee checkout: session creation, confirmation after the
//! hosted redirect, and receipt lookup.

pub mod client;
pub mod models;


pub use client::PaymentClient;
pub use models::{CheckoutRequest, CheckoutSession, PaymentConfirmation, PaymentInfo};
