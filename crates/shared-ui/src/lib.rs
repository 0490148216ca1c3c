//! Presentational components for The Fruit Union dashboards. Each component
//! links its own stylesheet; colours come from the CSS variables the app
//! defines on `:root`.

pub mod components;

pub use components::*;
