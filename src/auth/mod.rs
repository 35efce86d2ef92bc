//! # Auth Module
//!
//! Client-side authentication state:
//! - `SessionStore`: single writer of the session projection
//! - `IdentityProvider` trait: seam to the hosted identity provider
//! - Identity / session models shared by guards and the request client

pub mod models;
pub mod provider;
pub mod session;

#[cfg(test)]
mod tests;

pub use models::{AuthedIdentity, FederatedProvider, Identity, ProfileUpdate, Session, TokenPair};
pub use provider::{IdentityProvider, ProviderError};
pub use session::SessionStore;
