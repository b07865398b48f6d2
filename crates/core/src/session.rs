//! Session context
//!
//! Holds the authenticated identity whose subject id partitions every
//! remote store path. Repository operations receive the session explicitly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::{Error, Result};

/// Stable subject identifier supplied by the identity provider
pub type UserId = String;

/// Profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub subject_id: UserId,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
}

impl UserProfile {
    /// Create a profile with only a subject id
    pub fn new(subject_id: impl Into<UserId>) -> Self {
        Self {
            subject_id: subject_id.into(),
            display_name: None,
            picture_url: None,
            given_name: None,
        }
    }

    /// Set the given name
    pub fn with_given_name(mut self, given_name: impl Into<String>) -> Self {
        self.given_name = Some(given_name.into());
        self
    }

    /// Set the display name
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Set the picture URL
    pub fn with_picture_url(mut self, picture_url: impl Into<String>) -> Self {
        self.picture_url = Some(picture_url.into());
        self
    }
}

/// Snapshot of the authentication state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<UserProfile>,
}

impl Session {
    /// A session with no resolved identity
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session confirmed for the given user
    pub fn authenticated(user: UserProfile) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user_id().is_some()
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Subject id of the user, if one is present and not blank
    pub fn current_user_id(&self) -> Option<&UserId> {
        self.user
            .as_ref()
            .map(|user| &user.subject_id)
            .filter(|id| !id.trim().is_empty())
    }

    /// The partition key, or `NotAuthenticated`
    pub fn require_user(&self) -> Result<&UserId> {
        self.current_user_id().ok_or(Error::NotAuthenticated)
    }
}

/// Source of the current authentication state
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Current session snapshot
    async fn session(&self) -> Session;

    /// Confirm a session for the given user
    async fn login(&self, user: UserProfile) -> Result<Session>;

    /// End the current session
    async fn logout(&self) -> Result<()>;
}

/// In-process identity provider
///
/// Holds whatever profile the embedding application resolved.
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    session: RwLock<Session>,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already confirmed user
    pub fn signed_in(user: UserProfile) -> Self {
        Self {
            session: RwLock::new(Session::authenticated(user)),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    async fn login(&self, user: UserProfile) -> Result<Session> {
        if user.subject_id.trim().is_empty() {
            return Err(Error::Validation("subject id cannot be empty".into()));
        }

        info!("User signed in: {}", user.subject_id);
        let session = Session::authenticated(user);
        *self.session.write().await = session.clone();
        Ok(session)
    }

    async fn logout(&self) -> Result<()> {
        let mut session = self.session.write().await;
        if let Some(user) = session.current_user() {
            info!("User signed out: {}", user.subject_id);
        }
        *session = Session::anonymous();
        Ok(())
    }
}
