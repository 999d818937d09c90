//! Credential verification
//!
//! The session never compares credentials itself; it asks an
//! [`Authenticator`]. Production wires a [`StaticAuthenticator`] holding the
//! pair from configuration.

use std::fmt;
use thiserror::Error;

/// A submitted username/password pair
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Submitted username
    pub username: String,
    /// Submitted password
    pub password: String,
}

impl Credentials {
    /// Create a credential pair
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Who a successful login authenticated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    username: String,
}

impl Identity {
    /// Identity for `username`
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// The authenticated username
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Credentials were not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid username or password")]
pub struct Rejected;

/// Capability to check credentials
pub trait Authenticator: Send + Sync {
    /// Verify `credentials`, returning the identity they authenticate
    ///
    /// # Errors
    ///
    /// Returns [`Rejected`] when the credentials are not accepted.
    fn verify(&self, credentials: &Credentials) -> Result<Identity, Rejected>;
}

/// Accepts exactly one configured username/password pair
#[derive(Clone)]
pub struct StaticAuthenticator {
    username: String,
    password: String,
}

impl StaticAuthenticator {
    /// Accept only `username` with `password`
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for StaticAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticAuthenticator")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Authenticator for StaticAuthenticator {
    fn verify(&self, credentials: &Credentials) -> Result<Identity, Rejected> {
        if credentials.username == self.username && credentials.password == self.password {
            Ok(Identity::new(credentials.username.clone()))
        } else {
            Err(Rejected)
        }
    }
}
