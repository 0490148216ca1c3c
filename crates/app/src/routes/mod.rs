pub mod auth;
pub mod dashboard;
pub mod home;
pub mod not_found;

use dioxus::prelude::*;

use auth::Auth;
use dashboard::Dashboard;
use home::Home;
use not_found::NotFound;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/auth")]
    Auth {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}
