//! Identity-provider collaborator.
//!
//! Authentication itself is external to this service; the search core only
//! reads current-user-or-none so callers can cross-reference a signed-in
//! user's liked / studied-with sets (computed elsewhere, merely consumed
//! here).

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Role attached to a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    Student,
    Guardian,
    Teacher,
    Admin,
}

/// A signed-in user as the search surface sees one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

/// The identity collaborator interface.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The current session's user, or none.
    async fn current_user(&self) -> Option<UserProfile>;

    /// Begin a session for a known user.
    async fn sign_in(&self, email: &str) -> Result<UserProfile>;

    /// End the current session.
    async fn sign_out(&self);

    /// Role lookup by user id.
    async fn role_of(&self, user_id: &Uuid) -> Result<Option<Role>>;
}

/// In-memory identity provider for tests and the standalone server.
#[derive(Clone, Default)]
pub struct StaticIdentity {
    users: Arc<DashMap<Uuid, UserProfile>>,
    current: Arc<RwLock<Option<Uuid>>>,
}

impl StaticIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user (seeding only).
    pub fn add_user(&self, email: &str, display_name: &str, role: Role) -> UserProfile {
        let profile = UserProfile {
            id: Uuid::new_v4(),
            email: email.to_string(),
            display_name: display_name.to_string(),
            role,
        };
        self.users.insert(profile.id, profile.clone());
        profile
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_user(&self) -> Option<UserProfile> {
        let current = *self.current.read();
        current.and_then(|id| self.users.get(&id).map(|entry| entry.clone()))
    }

    async fn sign_in(&self, email: &str) -> Result<UserProfile> {
        let profile = self
            .users
            .iter()
            .find(|entry| entry.email == email)
            .map(|entry| entry.clone())
            .ok_or_else(|| AppError::Authentication(format!("unknown user: {}", email)))?;

        *self.current.write() = Some(profile.id);
        tracing::debug!(user_id = %profile.id, "User signed in");
        Ok(profile)
    }

    async fn sign_out(&self) {
        *self.current.write() = None;
    }

    async fn role_of(&self, user_id: &Uuid) -> Result<Option<Role>> {
        Ok(self.users.get(user_id).map(|entry| entry.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_in_and_current_user() {
        let identity = StaticIdentity::new();
        identity.add_user("guardian@example.com", "G. Sen", Role::Guardian);

        assert!(identity.current_user().await.is_none());

        let profile = identity.sign_in("guardian@example.com").await.unwrap();
        assert_eq!(profile.role, Role::Guardian);

        let current = identity.current_user().await.unwrap();
        assert_eq!(current.id, profile.id);

        identity.sign_out().await;
        assert!(identity.current_user().await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_user_rejected() {
        let identity = StaticIdentity::new();
        assert!(identity.sign_in("nobody@example.com").await.is_err());
    }

    #[tokio::test]
    async fn test_role_lookup() {
        let identity = StaticIdentity::new();
        let profile = identity.add_user("admin@example.com", "Admin", Role::Admin);

        let role = identity.role_of(&profile.id).await.unwrap();
        assert_eq!(role, Some(Role::Admin));
        assert_eq!(identity.role_of(&Uuid::new_v4()).await.unwrap(), None);
    }
}
