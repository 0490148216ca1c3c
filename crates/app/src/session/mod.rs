//! Client-side session state and the dashboard role-resolution flow.
//!
//! [`SessionHub`] holds the current session and notifies subscribers, the
//! [`DashboardSelector`] reduces session and role events into a
//! [`DashboardState`], [`resolver::resolve_role`] performs the single role lookup,
//! and [`ViewLease`] drops lookup results that outlive their view.
//! [`SessionBackend`] is the seam between a mount and the server functions.

pub mod backend;
pub mod hub;
pub mod lease;
pub mod resolver;
pub mod selector;
pub mod watch;

pub use backend::SessionBackend;
pub use hub::{SessionHub, SessionSubscription};
pub use lease::ViewLease;
pub use resolver::complete_lookup;
pub use selector::{DashboardSelector, DashboardState, SelectorEffect, SessionEvent};
pub use watch::use_session_watch;
