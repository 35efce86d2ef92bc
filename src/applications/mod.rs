//! # Applications Module
//!
//! Borrower loan applications: submission, listing with filters, the
//! manager approval pipeline, and the derived statistics the dashboards
//! chart.

pub mod client;
pub mod models;
pub mod stats;
pub mod validators;

#[cfg(test)]
mod tests;

pub use client::ApplicationClient;
pub use models::{
    ApplicationFilter, ApplicationForm, ApplicationStatus, LoanApplication, NewLoanApplication,
    PaymentState, APPLICATION_FEE,
};
pub use stats::{admin_stats, borrower_stats, manager_stats, AdminStats, BorrowerStats, ManagerStats};
pub use validators::ApplicationValidator;
