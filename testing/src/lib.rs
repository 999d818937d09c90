//! # Dashboard Testing
//!
//! Testing utilities and helpers for the dashboard.
//!
//! This crate provides:
//! - Deterministic clocks
//! - In-memory directory and weather clients with scripted failures and latency
//! - Fixture records shaped like the real directory service
//! - proptest strategies for directory records
//! - A Given-When-Then harness and assertion helpers for reducers
//!
//! ## Example
//!
//! ```ignore
//! use dashboard_testing::{StaticDirectory, StaticWeather, fixtures, test_clock};
//!
//! #[tokio::test]
//! async fn test_dashboard_loads() {
//!     let directory = StaticDirectory::new(fixtures::users(), fixtures::posts(), fixtures::todos());
//!     let store = Store::new(AppState::default(), AppReducer::new(), env(directory));
//!
//!     store.send(AppAction::Navigate { path: "/dashboard".into() }).await?.wait().await;
//!
//!     let users = store.state(|s| s.screen.dashboard().map(|d| d.users.clone())).await;
//!     assert!(users.is_some());
//! }
//! ```

use chrono::{DateTime, Utc};
use dashboard_core::environment::Clock;

pub mod directory;
pub mod fixtures;
pub mod properties;
pub mod weather;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::{Mutex, PoisonError};
    use std::time::Duration;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use dashboard_testing::mocks::FixedClock;
    /// use dashboard_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that only moves when told to
    #[derive(Debug)]
    pub struct ManualClock {
        time: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        /// Create a clock starting at `time`
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self {
                time: Mutex::new(time),
            }
        }

        /// Move the clock forward
        ///
        /// # Panics
        ///
        /// Panics if `by` does not fit in a `chrono::Duration`.
        #[allow(clippy::expect_used)] // Test helper
        pub fn advance(&self, by: Duration) {
            let by = chrono::Duration::from_std(by).expect("advance step should fit");
            let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
            *time += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(test_epoch())
    }

    /// The instant [`test_clock`] is frozen at
    ///
    /// # Panics
    ///
    /// Never in practice; the timestamp is hardcoded.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_epoch() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc)
    }
}

/// Install a test-friendly tracing subscriber
///
/// Respects `RUST_LOG`; safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use directory::StaticDirectory;
pub use mocks::{FixedClock, ManualClock, test_clock, test_epoch};
pub use reducer_test::{ReducerTest, assertions};
pub use weather::StaticWeather;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(test_epoch());
        clock.advance(Duration::from_millis(1500));
        assert_eq!((clock.now() - test_epoch()).num_milliseconds(), 1500);
    }
}
