//! Authentication configuration.

use serde::Deserialize;

/// Local administrator allowed to fall back to local mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Administrator login.
    pub admin_email: String,
    /// Administrator password. Without one, the local fallback is disabled.
    pub admin_password: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_email: "admin@rochedo.com".to_string(),
            admin_password: None,
        }
    }
}

impl AuthConfig {
    /// Whether the pair names the configured administrator.
    pub fn is_admin(&self, email: &str, password: &str) -> bool {
        match &self.admin_password {
            Some(expected) => email == self.admin_email && password == expected,
            None => false,
        }
    }
}
