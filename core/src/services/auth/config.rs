//! Auth service configuration

/// Settings the auth flows need beyond their collaborators' own config
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Base URL of the frontend, used to build password-reset links
    pub frontend_url: String,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
        }
    }
}

impl AuthServiceConfig {
    /// Reset-page URL embedding the raw token
    pub fn reset_url(&self, token: &str) -> String {
        format!(
            "{}/reset-password/{token}",
            self.frontend_url.trim_end_matches('/')
        )
    }
}
