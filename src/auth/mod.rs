//! Login gate and the local-mode fallback.
//!
//! A remote identity provider is tried first. When it fails for the
//! configured administrator, the session falls back to a built-in admin user
//! and the local-mode flag is persisted, which routes all storage to the
//! local mirror from then on.

pub mod mock;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::config::{AuthConfig, StorageMode};
use crate::storage::local::LocalCollections;
use crate::storage::StorageError;

/// Id of the built-in administrator used in local mode.
pub const LOCAL_ADMIN_UID: &str = "admin-rochedo";

/// Result type for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Provider error codes the login flow distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthErrorCode {
    UserNotFound,
    InvalidCredential,
    WrongPassword,
    InvalidEmail,
    NetworkRequestFailed,
    TooManyRequests,
    Other(String),
}

impl AuthErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            AuthErrorCode::UserNotFound => "auth/user-not-found",
            AuthErrorCode::InvalidCredential => "auth/invalid-credential",
            AuthErrorCode::WrongPassword => "auth/wrong-password",
            AuthErrorCode::InvalidEmail => "auth/invalid-email",
            AuthErrorCode::NetworkRequestFailed => "auth/network-request-failed",
            AuthErrorCode::TooManyRequests => "auth/too-many-requests",
            AuthErrorCode::Other(code) => code,
        }
    }

    /// Parse a provider code string. Unknown codes are kept verbatim.
    pub fn from_code(code: &str) -> Self {
        match code {
            "auth/user-not-found" => AuthErrorCode::UserNotFound,
            "auth/invalid-credential" => AuthErrorCode::InvalidCredential,
            "auth/wrong-password" => AuthErrorCode::WrongPassword,
            "auth/invalid-email" => AuthErrorCode::InvalidEmail,
            "auth/network-request-failed" => AuthErrorCode::NetworkRequestFailed,
            "auth/too-many-requests" => AuthErrorCode::TooManyRequests,
            other => AuthErrorCode::Other(other.to_string()),
        }
    }

    /// Codes meaning the account may simply not exist yet.
    fn is_unknown_account(&self) -> bool {
        matches!(
            self,
            AuthErrorCode::UserNotFound | AuthErrorCode::InvalidCredential
        )
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during login or logout.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Identity provider error {code}: {message}")]
    Provider {
        code: AuthErrorCode,
        message: String,
    },

    #[error("Local session storage error: {0}")]
    LocalStorage(#[from] StorageError),
}

impl AuthError {
    pub fn provider(code: AuthErrorCode, message: impl Into<String>) -> Self {
        AuthError::Provider {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<&AuthErrorCode> {
        match self {
            AuthError::Provider { code, .. } => Some(code),
            AuthError::LocalStorage(_) => None,
        }
    }

    /// Text safe to show on the login screen.
    pub fn user_message(&self) -> &'static str {
        match self.code() {
            Some(AuthErrorCode::UserNotFound) | Some(AuthErrorCode::InvalidCredential) => {
                "User not found or invalid credentials."
            }
            Some(AuthErrorCode::WrongPassword) => "Wrong password.",
            Some(AuthErrorCode::InvalidEmail) => "Invalid e-mail format.",
            Some(AuthErrorCode::NetworkRequestFailed) => {
                "Connection error. Check your internet connection."
            }
            Some(AuthErrorCode::TooManyRequests) => "Too many attempts. Try again later.",
            _ => "Access error. Check your credentials.",
        }
    }
}

/// Remote identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User>;

    async fn create_user(&self, email: &str, password: &str) -> Result<User>;

    async fn sign_out(&self) -> Result<()>;

    /// User currently signed in with the provider, if any.
    async fn current_user(&self) -> Option<User>;
}

/// Login, logout and session lookup with the local-mode fallback.
pub struct AuthService {
    provider: Arc<dyn IdentityProvider>,
    local: LocalCollections,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(provider: Arc<dyn IdentityProvider>, local: LocalCollections, config: AuthConfig) -> Self {
        Self {
            provider,
            local,
            config,
        }
    }

    /// The built-in administrator returned in local mode.
    pub fn local_admin(&self) -> User {
        User {
            uid: LOCAL_ADMIN_UID.to_string(),
            email: self.config.admin_email.clone(),
            display_name: Some("Rochedo Administrator".to_string()),
        }
    }

    /// Sign in, falling back to local mode for the configured administrator.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let err = match self.provider.sign_in(email, password).await {
            Ok(user) => return Ok(user),
            Err(e) => e,
        };
        warn!(error = %err, "Sign-in failed");

        if !self.config.is_admin(email, password) {
            return Err(err);
        }

        if err.code().is_some_and(AuthErrorCode::is_unknown_account) {
            match self.provider.create_user(email, password).await {
                Ok(user) => return Ok(user),
                Err(create_err) => {
                    error!(error = %create_err, "Could not create administrator account");
                }
            }
        }

        self.activate_local_mode()
    }

    fn activate_local_mode(&self) -> Result<User> {
        info!("Using local fallback mode for the administrator");
        self.local.set_mode_flag(true)?;
        Ok(self.local_admin())
    }

    /// Clear the local-mode flag, then sign out of the provider.
    ///
    /// A provider sign-out failure is logged and not returned.
    pub async fn logout(&self) -> Result<()> {
        self.local.set_mode_flag(false)?;
        if let Err(e) = self.provider.sign_out().await {
            error!(error = %e, "Provider sign-out failed");
        }
        Ok(())
    }

    /// Provider user, else the built-in admin when local mode is on, else none.
    pub async fn current_session(&self) -> Result<Option<User>> {
        if let Some(user) = self.provider.current_user().await {
            return Ok(Some(user));
        }
        if self.local.mode_flag()? {
            return Ok(Some(self.local_admin()));
        }
        Ok(None)
    }

    /// Storage mode implied by the persisted flag.
    pub fn storage_mode(&self) -> Result<StorageMode> {
        if self.local.mode_flag()? {
            Ok(StorageMode::Local)
        } else {
            Ok(StorageMode::Primary)
        }
    }
}
