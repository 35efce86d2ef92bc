//! # Guards Module
//!
//! Route access control as a pure decision table:
//! - `GuardKind`: the guard attached to a route (public/private/guest/admin/manager)
//! - `RouteDecision`: what the shell should do for a navigation attempt
//! - `decide`: combinational function over {session, role state}, re-evaluated
//!   on every navigation; holds no state of its own
//!
//! Loading checks strictly precede identity and role checks so a stale or
//! incomplete load can never produce a redirect or a forbidden page.

pub mod routes;


use crate::auth::Session;
use crate::roles::{Role, RoleState};

pub use routes::{decide_path, match_route, RouteEntry, ROUTES};

/// Guard variant attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    /// No gating; renders for everyone, even during the initial load.
    Public,
    /// Requires any authenticated identity.
    Private,
    /// Only for signed-out visitors (login/register pages).
    Guest,
    /// Requires the admin role.
    Admin,
    /// Requires the manager role.
    Manager,
}

/// Outcome of evaluating a guard. Pure data: the shell performs the actual
/// navigation or rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    Loading,
    RedirectToLogin,
    RedirectHome,
    Forbidden,
    NotFound,
}

/// Evaluates `kind` against the current session and role state.
///
/// Check order is fixed: session-loading, role-loading, identity presence,
/// role match. Guards never fail; unresolved state degrades to `Loading` or
/// a redirect, favoring denial over false-positive access.
pub fn decide(kind: GuardKind, session: &Session, role: &RoleState) -> RouteDecision {
    match kind {
        GuardKind::Public => RouteDecision::Render,
        GuardKind::Private => {
            if session.loading {
                RouteDecision::Loading
            } else if session.identity.is_none() {
                RouteDecision::RedirectToLogin
            } else {
                RouteDecision::Render
            }
        }
        GuardKind::Guest => {
            if session.loading {
                RouteDecision::Loading
            } else if session.identity.is_some() {
                RouteDecision::RedirectHome
            } else {
                RouteDecision::Render
            }
        }
        GuardKind::Admin => decide_with_role(session, role, Role::Admin),
        GuardKind::Manager => decide_with_role(session, role, Role::Manager),
    }
}

fn decide_with_role(session: &Session, role: &RoleState, required: Role) -> RouteDecision {
    if session.loading || role.is_loading() {
        return RouteDecision::Loading;
    }
    if session.identity.is_none() {
        return RouteDecision::RedirectToLogin;
    }
    // A failed lookup denies: it is neither a grant nor a silent `user`.
    match role {
        RoleState::Resolved(resolved) if *resolved == required => RouteDecision::Render,
        _ => RouteDecision::Forbidden,
    }
}
