#[cfg(feature = "server")]
pub(crate) mod auth;

mod session;
pub use session::*;

mod admin;
pub use admin::*;

mod deliveries;
pub use deliveries::*;

mod customer;
pub use customer::*;
