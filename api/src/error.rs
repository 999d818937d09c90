//! Error types for the remote data clients

use std::fmt;
use thiserror::Error;

/// What a failed request was trying to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// The full user list
    Users,
    /// A single user
    User,
    /// Posts (all, or one user's)
    Posts,
    /// One user's todos
    Todos,
    /// Current weather for a city
    Weather,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Users => write!(f, "users"),
            Self::User => write!(f, "user"),
            Self::Posts => write!(f, "posts"),
            Self::Todos => write!(f, "todos"),
            Self::Weather => write!(f, "weather data"),
        }
    }
}

/// Errors that can occur when fetching from a remote service
///
/// Callers distinguish "not found" from other failures by variant, never by
/// inspecting the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The service answered 404 (for weather: the city is unknown)
    #[error("Failed to fetch {resource}: not found")]
    NotFound {
        /// What was being fetched
        resource: Resource,
    },

    /// The service answered with another non-success status
    #[error("Failed to fetch {resource} (HTTP {status})")]
    Status {
        /// What was being fetched
        resource: Resource,
        /// HTTP status code
        status: u16,
    },

    /// The request never produced a response (connection, DNS, timeout)
    #[error("Failed to fetch {resource}: {message}")]
    Network {
        /// What was being fetched
        resource: Resource,
        /// Transport error description
        message: String,
    },

    /// The response body was not the expected JSON
    #[error("Failed to decode {resource}: {message}")]
    Decode {
        /// What was being fetched
        resource: Resource,
        /// Parser error description
        message: String,
    },
}

impl FetchError {
    /// The resource the failed request was fetching
    #[must_use]
    pub const fn resource(&self) -> Resource {
        match self {
            Self::NotFound { resource }
            | Self::Status { resource, .. }
            | Self::Network { resource, .. }
            | Self::Decode { resource, .. } => *resource,
        }
    }

    /// Whether the upstream service reported the resource as missing
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_resource() {
        let err = FetchError::Status {
            resource: Resource::Users,
            status: 500,
        };
        assert_eq!(err.to_string(), "Failed to fetch users (HTTP 500)");

        let err = FetchError::NotFound {
            resource: Resource::Weather,
        };
        assert_eq!(err.to_string(), "Failed to fetch weather data: not found");
    }

    #[test]
    fn test_not_found_is_typed() {
        let missing = FetchError::NotFound {
            resource: Resource::User,
        };
        let broken = FetchError::Network {
            resource: Resource::User,
            message: "connection refused".to_string(),
        };

        assert!(missing.is_not_found());
        assert!(!broken.is_not_found());
        assert_eq!(broken.resource(), Resource::User);
    }
}
