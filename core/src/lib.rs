//! # Conference Alert Core
//!
//! Pure domain layer for the Conference Alert listing site: typed records
//! for events, blog posts and users, the slug codec used by detail pages,
//! the search filter builder, and the pagination contract every listing
//! shares.
//!
//! Nothing in this crate performs I/O. The HTTP client lives in
//! `conference-alert-client`; session-driven routing lives in
//! `conference-alert-auth`.
//!
//! ## Example
//!
//! ```
//! use conference_alert_core::filter::{build_search_filter, SearchType};
//! use conference_alert_core::{slug, RecordId};
//!
//! let filter = build_search_filter("India", "Engineering and Technology", SearchType::Category);
//! assert_eq!(
//!     filter,
//!     r#"status = "accepted" && country ~ "India" && event_category = "Engineering and Technology""#,
//! );
//!
//! let id = RecordId::parse("k3m9x2q7w1p8z4r").unwrap();
//! let link = slug::encode("Global AI Summit", &id);
//! assert_eq!(slug::decode(&link), Some(id));
//! ```

pub mod assets;
pub mod calendar;
pub mod catalog;
pub mod environment;
pub mod error;
pub mod filter;
pub mod id;
pub mod models;
pub mod pagination;
pub mod route;
pub mod slug;
pub mod validation;

// Re-export main types for convenience
pub use error::{CoreError, Result};
pub use filter::{BlogQuery, Filter, SearchCriteria, SearchType};
pub use id::RecordId;
pub use models::{
    Attachment, BlogCategory, BlogPost, BlogPostUpdate, BlogStatus, Event, EventCategory,
    EventStats, EventStatus, EventType, NewBlogPost, NewEvent, StoredRecord, User,
};
pub use pagination::{Page, PageRequest};
pub use validation::Registration;
