//! Session state machine: anonymous or authenticated

use crate::auth::{Authenticator, Credentials, Identity};

/// Client-local session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    /// Nobody is logged in
    #[default]
    Anonymous,
    /// Logged in as the given identity
    Authenticated(Identity),
}

impl Session {
    /// Attempt a login
    ///
    /// On success the session becomes [`Session::Authenticated`] and `true` is
    /// returned. On rejection the session is left exactly as it was.
    pub fn login(&mut self, authenticator: &dyn Authenticator, credentials: Credentials) -> bool {
        match authenticator.verify(&credentials) {
            Ok(identity) => {
                *self = Self::Authenticated(identity);
                true
            },
            Err(_) => false,
        }
    }

    /// Return to [`Session::Anonymous`], discarding the identity
    pub fn logout(&mut self) {
        *self = Self::Anonymous;
    }

    /// Whether someone is logged in
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The logged-in identity, if any
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Anonymous => None,
        }
    }
}
