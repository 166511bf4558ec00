//! In-memory identity provider for testing.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AuthError, AuthErrorCode, IdentityProvider, Result, User};

/// Identity provider backed by a map of accounts.
#[derive(Default)]
pub struct MockIdentityProvider {
    accounts: RwLock<HashMap<String, String>>,
    current: RwLock<Option<User>>,
    sign_in_failure: RwLock<Option<AuthErrorCode>>,
    create_failure: RwLock<Option<AuthErrorCode>>,
    fail_sign_out: RwLock<bool>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_account(&self, email: &str, password: &str) {
        self.accounts
            .write()
            .await
            .insert(email.to_string(), password.to_string());
    }

    /// Make every sign-in fail with `code`, regardless of accounts.
    pub async fn fail_sign_in_with(&self, code: Option<AuthErrorCode>) {
        *self.sign_in_failure.write().await = code;
    }

    pub async fn fail_create_with(&self, code: Option<AuthErrorCode>) {
        *self.create_failure.write().await = code;
    }

    pub async fn set_fail_sign_out(&self, fail: bool) {
        *self.fail_sign_out.write().await = fail;
    }

    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }

    fn user_for(email: &str) -> User {
        User {
            uid: format!("uid-{}", email),
            email: email.to_string(),
            display_name: None,
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        if let Some(code) = self.sign_in_failure.read().await.clone() {
            return Err(AuthError::provider(code, "mock sign-in failure"));
        }
        match self.accounts.read().await.get(email) {
            None => Err(AuthError::provider(
                AuthErrorCode::UserNotFound,
                "no such account",
            )),
            Some(expected) if expected != password => Err(AuthError::provider(
                AuthErrorCode::InvalidCredential,
                "bad password",
            )),
            Some(_) => {
                let user = Self::user_for(email);
                *self.current.write().await = Some(user.clone());
                Ok(user)
            }
        }
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<User> {
        if let Some(code) = self.create_failure.read().await.clone() {
            return Err(AuthError::provider(code, "mock create failure"));
        }
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(email) {
            return Err(AuthError::provider(
                AuthErrorCode::Other("auth/email-already-in-use".to_string()),
                "account exists",
            ));
        }
        accounts.insert(email.to_string(), password.to_string());
        let user = Self::user_for(email);
        *self.current.write().await = Some(user.clone());
        Ok(user)
    }

    async fn sign_out(&self) -> Result<()> {
        *self.current.write().await = None;
        if *self.fail_sign_out.read().await {
            return Err(AuthError::provider(
                AuthErrorCode::NetworkRequestFailed,
                "mock sign-out failure",
            ));
        }
        Ok(())
    }

    async fn current_user(&self) -> Option<User> {
        self.current.read().await.clone()
    }
}
