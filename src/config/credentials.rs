//! AWS credentials read from the process environment
//!
//! Credentials are read once at startup. Missing values are not an error
//! here; the transport reports them as an authentication failure on the
//! first call.

use super::secret::{secret_string, SecretString};
use secrecy::ExposeSecret;

pub const ACCESS_KEY_ENV: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_KEY_ENV: &str = "AWS_SECRET_ACCESS_KEY";
pub const SESSION_TOKEN_ENV: &str = "AWS_SESSION_TOKEN";

/// Access key pair used to sign inference requests
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<SecretString>,
    pub session_token: Option<SecretString>,
}

impl Credentials {
    /// Build credentials from explicit values
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: Some(access_key_id.into()),
            secret_access_key: Some(secret_string(secret_access_key.into())),
            session_token: None,
        }
    }

    /// Attach a temporary session token
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(secret_string(token.into()));
        self
    }

    /// Read credentials from `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`
    /// and `AWS_SESSION_TOKEN`; empty values count as unset
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        Self {
            access_key_id: read(ACCESS_KEY_ENV),
            secret_access_key: read(SECRET_KEY_ENV).map(secret_string),
            session_token: read(SESSION_TOKEN_ENV).map(secret_string),
        }
    }

    /// Both halves of the key pair are present and non-empty
    pub fn is_complete(&self) -> bool {
        let has_access = self
            .access_key_id
            .as_ref()
            .is_some_and(|id| !id.is_empty());
        let has_secret = self
            .secret_access_key
            .as_ref()
            .is_some_and(|s| !s.expose_secret().is_empty());
        has_access && has_secret
    }

    /// Names of the missing environment variables, for error messages
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.access_key_id.as_ref().map_or(true, |id| id.is_empty()) {
            missing.push(ACCESS_KEY_ENV);
        }
        if self
            .secret_access_key
            .as_ref()
            .map_or(true, |s| s.expose_secret().is_empty())
        {
            missing.push(SECRET_KEY_ENV);
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_credentials() {
        let creds = Credentials::new("AKIDEXAMPLE", "secret");
        assert!(creds.is_complete());
        assert!(creds.missing().is_empty());
    }

    #[test]
    fn test_default_credentials_are_incomplete() {
        let creds = Credentials::default();
        assert!(!creds.is_complete());
        assert_eq!(creds.missing(), vec![ACCESS_KEY_ENV, SECRET_KEY_ENV]);
    }

    #[test]
    fn test_empty_secret_is_missing() {
        let creds = Credentials::new("AKIDEXAMPLE", "");
        assert!(!creds.is_complete());
        assert_eq!(creds.missing(), vec![SECRET_KEY_ENV]);
    }

    #[test]
    fn test_debug_hides_secret() {
        let creds = Credentials::new("AKIDEXAMPLE", "very-secret-value").with_session_token("tok");
        let debug = format!("{creds:?}");
        assert!(debug.contains("AKIDEXAMPLE"));
        assert!(!debug.contains("very-secret-value"));
    }
}
