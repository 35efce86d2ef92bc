// Derived dashboard statistics
//
// Pure reductions over records already fetched from the backend; each
// dashboard recomputes on render from its own query results.

use std::collections::BTreeMap;

use super::models::{ApplicationStatus, LoanApplication};
use crate::loans::Loan;
use crate::roles::Role;
use crate::users::UserRecord;

/// Application counts by status, with empty buckets dropped for charting.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBreakdown {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusBreakdown {
    fn from_applications(applications: &[LoanApplication]) -> Self {
        let count = |status: ApplicationStatus| {
            applications.iter().filter(|a| a.status == status).count()
        };
        Self {
            pending: count(ApplicationStatus::Pending),
            approved: count(ApplicationStatus::Approved),
            rejected: count(ApplicationStatus::Rejected),
        }
    }

    /// Chart series with zero-valued buckets filtered out.
    pub fn distribution(&self) -> Vec<(&'static str, usize)> {
        [
            ("Pending", self.pending),
            ("Approved", self.approved),
            ("Rejected", self.rejected),
        ]
        .into_iter()
        .filter(|(_, value)| *value > 0)
        .collect()
    }
}

/// Borrower dashboard: the signed-in user's own applications.
#[derive(Debug, Clone, PartialEq)]
pub struct BorrowerStats {
    pub total_applications: usize,
    pub breakdown: StatusBreakdown,
    /// Sum of approved loan amounts.
    pub total_debt: f64,
}

pub fn borrower_stats(applications: &[LoanApplication]) -> BorrowerStats {
    let total_debt = applications
        .iter()
        .filter(|a| a.status == ApplicationStatus::Approved)
        .map(|a| a.loan_amount)
        .sum();
    BorrowerStats {
        total_applications: applications.len(),
        breakdown: StatusBreakdown::from_applications(applications),
        total_debt,
    }
}

/// Manager dashboard: the full application pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerStats {
    pub total_applications: usize,
    pub breakdown: StatusBreakdown,
    /// Sum of requested amounts across every application.
    pub total_requested: f64,
}

pub fn manager_stats(applications: &[LoanApplication]) -> ManagerStats {
    ManagerStats {
        total_applications: applications.len(),
        breakdown: StatusBreakdown::from_applications(applications),
        total_requested: applications.iter().map(|a| a.loan_amount).sum(),
    }
}

/// Admin dashboard: platform-wide rollups across users, products, and
/// applications.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminStats {
    pub total_users: usize,
    pub admins: usize,
    pub managers: usize,
    pub borrowers: usize,
    pub total_applications: usize,
    pub breakdown: StatusBreakdown,
    /// Sum of requested amounts across every application.
    pub total_funding: f64,
    /// Product counts per category; uncategorized products are bucketed.
    pub categories: Vec<(String, usize)>,
}

pub fn admin_stats(
    users: &[UserRecord],
    loans: &[Loan],
    applications: &[LoanApplication],
) -> AdminStats {
    let role_count = |role: Role| users.iter().filter(|u| u.role == role).count();

    let mut categories: BTreeMap<String, usize> = BTreeMap::new();
    for loan in loans {
        let category = loan
            .category
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "Uncategorized".to_string());
        *categories.entry(category).or_insert(0) += 1;
    }

    AdminStats {
        total_users: users.len(),
        admins: role_count(Role::Admin),
        managers: role_count(Role::Manager),
        borrowers: role_count(Role::User),
        total_applications: applications.len(),
        breakdown: StatusBreakdown::from_applications(applications),
        total_funding: applications.iter().map(|a| a.loan_amount).sum(),
        categories: categories.into_iter().collect(),
    }
}
