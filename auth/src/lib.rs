//! # Conference Alert Auth
//!
//! Application-level authentication state and the route guard built on it.
//!
//! ## States
//!
//! ```text
//! Uninitialized ──initialize()──▶ Authenticated(user) ◀──sign_in()──┐
//!                         └─────▶ Unauthenticated ────sign_out()────┘
//! ```
//!
//! Guard decisions are [`RouteDecision::Loading`] until the coordinator is
//! initialized, so a page never flashes a redirect while the persisted
//! session is still being read.
//!
//! ## Example
//!
//! ```rust,ignore
//! use conference_alert_auth::{AuthCoordinator, RouteDecision, RoutePolicy};
//!
//! let auth = AuthCoordinator::new(client, RoutePolicy::default());
//! auth.initialize();
//! let _sync = auth.spawn_sync();
//!
//! match auth.guard("/dashboard") {
//!     RouteDecision::Redirect(target) => navigate(&target),
//!     RouteDecision::Loading => show_spinner(),
//!     RouteDecision::Forbidden => navigate(&auth.policy().landing_path),
//!     RouteDecision::Allow => render(),
//! }
//! ```

pub mod config;
pub mod coordinator;
pub mod router;
pub mod state;

// Re-export main types for convenience
pub use config::RoutePolicy;
pub use coordinator::{AuthCoordinator, SyncHandle};
pub use router::{RouteDecision, guard};
pub use state::AuthStatus;
