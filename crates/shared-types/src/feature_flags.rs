use serde::{Deserialize, Serialize};

/// Feature flags controlling optional behavior.
///
/// Loaded from `config.toml` at server startup and handed to the UI through
/// a server function. Every flag defaults to `false`, so a missing file or a
/// missing key turns the feature off.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    /// Export traces and logs over OTLP.
    #[serde(default)]
    pub telemetry: bool,
    /// Allow visitors to create their own account from the sign-in page.
    /// Admins can always add customers from the admin dashboard.
    #[serde(default)]
    pub self_signup: bool,
}

/// Top-level structure of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
}
