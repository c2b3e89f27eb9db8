//! # Conference Alert Client
//!
//! Typed access to the Conference Alert backend: event listing, search and
//! submission, the blog, and account sessions.
//!
//! Lookups that find nothing return `Ok(None)`. Every other failure is a
//! [`ClientError`] and is logged through `tracing` before it is returned.
//!
//! ## Example
//!
//! ```no_run
//! use conference_alert_client::{ClientConfig, PocketBaseClient};
//! use conference_alert_core::filter::SearchType;
//! use conference_alert_core::{PageRequest, SearchCriteria};
//!
//! # async fn demo() -> Result<(), conference_alert_client::ClientError> {
//! let client = PocketBaseClient::new(ClientConfig::default())?;
//!
//! let criteria = SearchCriteria::new()
//!     .country("India")
//!     .term("Mumbai", SearchType::City);
//! let page = client.find_events(&criteria, PageRequest::new(1, 20)).await?;
//!
//! for event in &page.items {
//!     println!("{} -> /event/{}", event.name, PocketBaseClient::event_slug(event));
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod blogs;
pub mod client;
pub mod config;
pub mod error;
mod events;
pub mod persistence;
pub mod session;
mod wire;

// Re-export main types for convenience
pub use client::{PocketBaseClient, PocketBaseClientBuilder};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use persistence::{FilePersistence, MemoryPersistence, SessionPersistence};
pub use session::{AuthSession, SessionStore, SessionSubscription};
pub use wire::{SORT_BY_START_DATE, SORT_NEWEST, SORT_SOONEST};
