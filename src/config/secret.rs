//! Secure credential handling using the secrecy crate
//!
//! Secret values are zeroed when dropped and redacted from `Debug` output.
//! Call `expose_secret()` only at the point where the raw value is needed
//! (request signing).
//!
//! # Example
//!
//! ```rust
//! use piiguard::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let key = secret_string("wJalrXUtnFEMI/K7MDENG".to_string());
//! assert_eq!(key.expose_secret().as_ref(), "wJalrXUtnFEMI/K7MDENG");
//! assert!(!format!("{key:?}").contains("wJalr"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Type alias for a secret string
pub type SecretString = Secret<SecretValue>;

/// Helper function to create a SecretString from a String
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}
