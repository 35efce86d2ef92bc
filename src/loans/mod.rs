//! # Loans Module
//!
//! Loan product catalog: models, the typed `/loans` client, and input
//! validation for manager-created products.

pub mod client;
pub mod models;
pub mod validators;

#[cfg(test)]
mod tests;

pub use client::LoanClient;
pub use models::{Loan, LoanListing, LoanPage, LoanUpdate, NewLoan};
pub use validators::NewLoanValidator;
