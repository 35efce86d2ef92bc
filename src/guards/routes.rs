// Route table: path pattern -> guard

use super::{decide, GuardKind, RouteDecision};
use crate::auth::Session;
use crate::roles::RoleState;

/// One navigable route. `:name` segments match any single path segment.
#[derive(Debug, Clone, Copy)]
pub struct RouteEntry {
    pub pattern: &'static str,
    pub guard: GuardKind,
}

/// Every route the application serves, in match order.
pub const ROUTES: &[RouteEntry] = &[
    // Marketing / catalog
    RouteEntry { pattern: "/", guard: GuardKind::Public },
    RouteEntry { pattern: "/all-loans", guard: GuardKind::Public },
    RouteEntry { pattern: "/about", guard: GuardKind::Public },
    RouteEntry { pattern: "/contact", guard: GuardKind::Public },
    // Auth entry points
    RouteEntry { pattern: "/login", guard: GuardKind::Guest },
    RouteEntry { pattern: "/register", guard: GuardKind::Guest },
    // Any signed-in user
    RouteEntry { pattern: "/loan-details/:id", guard: GuardKind::Private },
    RouteEntry { pattern: "/loan-form", guard: GuardKind::Private },
    RouteEntry { pattern: "/profile", guard: GuardKind::Private },
    RouteEntry { pattern: "/dashboard", guard: GuardKind::Private },
    RouteEntry { pattern: "/dashboard/my-loan", guard: GuardKind::Private },
    RouteEntry { pattern: "/dashboard/payment-success", guard: GuardKind::Private },
    RouteEntry { pattern: "/dashboard/payment-failed", guard: GuardKind::Private },
    // Admin
    RouteEntry { pattern: "/dashboard/manage-user", guard: GuardKind::Admin },
    RouteEntry { pattern: "/dashboard/all-loans", guard: GuardKind::Admin },
    RouteEntry { pattern: "/dashboard/loan-application", guard: GuardKind::Admin },
    RouteEntry { pattern: "/dashboard/edit-loan/:id", guard: GuardKind::Admin },
    RouteEntry { pattern: "/dashboard/update-user/:id", guard: GuardKind::Admin },
    // Manager
    RouteEntry { pattern: "/dashboard/add-loan", guard: GuardKind::Manager },
    RouteEntry { pattern: "/dashboard/approved-loan", guard: GuardKind::Manager },
    RouteEntry { pattern: "/dashboard/pending-loan", guard: GuardKind::Manager },
    RouteEntry { pattern: "/dashboard/manage-loan", guard: GuardKind::Manager },
];

/// Finds the route entry matching `path`, ignoring any query string.
pub fn match_route(path: &str) -> Option<&'static RouteEntry> {
    let path = path.split('?').next().unwrap_or(path);
    let segments: Vec<&str> = split_segments(path);
    ROUTES
        .iter()
        .find(|entry| pattern_matches(entry.pattern, &segments))
}

/// Evaluates the guard for `path`; unmatched paths are `NotFound`.
pub fn decide_path(path: &str, session: &Session, role: &RoleState) -> RouteDecision {
    match match_route(path) {
        Some(entry) => decide(entry.guard, session, role),
        None => RouteDecision::NotFound,
    }
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn pattern_matches(pattern: &str, segments: &[&str]) -> bool {
    let pattern_segments = split_segments(pattern);
    pattern_segments.len() == segments.len()
        && pattern_segments
            .iter()
            .zip(segments.iter())
            .all(|(p, s)| p.starts_with(':') || p == s)
}
