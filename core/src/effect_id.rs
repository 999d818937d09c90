//! Identifiers for cancellable effects.
//!
//! An [`EffectId`] names a cancellation group. The runtime tracks every task
//! started under [`Effect::Cancellable`](crate::effect::Effect::Cancellable)
//! by its id so that a later [`Effect::Cancel`](crate::effect::Effect::Cancel)
//! (or a newer cancellable effect with the same id) can abort it.

use std::fmt;

/// Name of a cancellation group.
///
/// # Examples
///
/// ```
/// use dashboard_core::effect_id::EffectId;
///
/// let id = EffectId::new("screen-fetch");
/// assert_eq!(id.as_str(), "screen-fetch");
///
/// let from_str: EffectId = "weather-fetch".into();
/// assert_eq!(from_str, EffectId::new(String::from("weather-fetch")));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EffectId(String);

impl EffectId {
    /// Create a new `EffectId` from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the effect ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EffectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EffectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_inner() {
        let id = EffectId::from("screen-fetch");
        assert_eq!(id.to_string(), "screen-fetch");
    }
}
