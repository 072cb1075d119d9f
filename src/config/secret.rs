//! Secure credential handling using the secrecy crate
//!
//! The Firestore access token travels from the configuration file (or
//! environment) to exactly one place: the `Authorization` header. This
//! module keeps it protected everywhere in between. The backing memory is
//! zeroed when the secret is dropped, `Debug` output is redacted, and the
//! raw value is only reachable through an explicit `expose_secret()` call
//! at the header construction site.
//!
//! # Example
//!
//! ```rust
//! use quarry::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let token = secret_string("ya29.token");
//!
//! // Debug output is redacted
//! assert!(!format!("{token:?}").contains("ya29"));
//!
//! // The raw value requires an explicit expose
//! assert_eq!(token.expose_secret().as_ref(), "ya29.token");
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String newtype carrying the marker traits `Secret` requires
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl SecretValue {
    /// True when the protected string is empty
    ///
    /// An empty token means "send no Authorization header", the same as an
    /// absent one.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// A protected string: zeroed on drop, redacted in Debug output
pub type SecretString = Secret<SecretValue>;

/// Wraps a string value in a [`SecretString`]
///
/// # Example
///
/// ```rust
/// use quarry::config::secret_string;
///
/// let token = secret_string("ya29.token");
/// ```
#[inline]
pub fn secret_string(value: impl Into<String>) -> SecretString {
    Secret::new(SecretValue::from(value.into()))
}
