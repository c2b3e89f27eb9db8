//! # Conference Alert Testing
//!
//! Testing utilities shared by the Conference Alert crates.
//!
//! This crate provides:
//! - Deterministic implementations of environment traits
//! - JSON fixtures shaped like backend records
//! - A fake backend built on `wiremock`
//!
//! ## Example
//!
//! ```ignore
//! use conference_alert_testing::{FakeBackend, fixtures, test_clock};
//!
//! #[tokio::test]
//! async fn test_login() {
//!     let backend = FakeBackend::start().await;
//!     let user = fixtures::user_json("usr123", "ada@example.com");
//!     backend.accept_login("users", &fixtures::valid_token(), &user).await;
//!
//!     let client = PocketBaseClient::builder(ClientConfig::new(backend.uri()))
//!         .clock(Arc::new(test_clock()))
//!         .build()
//!         .unwrap();
//!     client.login("ada@example.com", "correct horse").await.unwrap();
//! }
//! ```

pub mod backend;
pub mod fixtures;

use chrono::{DateTime, Utc};
use conference_alert_core::environment::Clock;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use chrono::Duration;
    use std::sync::{Arc, Mutex, PoisonError};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making token expiry and date-relative
    /// queries reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use conference_alert_testing::mocks::FixedClock;
    /// use conference_alert_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
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

    /// Clock that only moves when told to.
    ///
    /// Clones share the same time, so a test can keep one handle and give
    /// another to the code under test.
    ///
    /// # Example
    ///
    /// ```
    /// use conference_alert_testing::mocks::{ManualClock, TEST_EPOCH};
    /// use conference_alert_core::environment::Clock;
    /// use chrono::Duration;
    ///
    /// let clock = ManualClock::at_test_epoch();
    /// let handle = clock.clone();
    /// handle.advance(Duration::hours(2));
    /// assert_eq!(clock.now().timestamp(), TEST_EPOCH + 7200);
    /// ```
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        time: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        /// Create a clock stopped at `time`.
        #[must_use]
        pub fn new(time: DateTime<Utc>) -> Self {
            Self {
                time: Arc::new(Mutex::new(time)),
            }
        }

        /// Create a clock stopped at [`TEST_EPOCH`].
        #[must_use]
        pub fn at_test_epoch() -> Self {
            Self::new(test_clock().now())
        }

        /// Move the clock forward by `by`.
        pub fn advance(&self, by: Duration) {
            let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
            *time += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Fixed clock at 2025-01-01 00:00:00 UTC.
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::from_timestamp(TEST_EPOCH, 0).unwrap_or_default())
    }

    /// Unix time of [`test_clock`].
    pub const TEST_EPOCH: i64 = 1_735_689_600;
}

/// Install a `tracing` subscriber that writes to the test harness.
///
/// Honors `RUST_LOG`. Safe to call from every test; only the first call
/// installs the subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use backend::FakeBackend;
pub use mocks::{FixedClock, ManualClock, TEST_EPOCH, test_clock};
