use shared_types::{AppConfig, FeatureFlags};
use std::sync::OnceLock;

static FLAGS: OnceLock<FeatureFlags> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Default domain appended to bare usernames at sign-in and sign-up.
const DEFAULT_LOGIN_EMAIL_DOMAIN: &str = "fruitunion.local";

/// Parse the contents of `config.toml`. Invalid TOML turns every flag off.
pub fn parse_feature_flags(contents: &str) -> FeatureFlags {
    match toml::from_str::<AppConfig>(contents) {
        Ok(config) => config.features,
        Err(e) => {
            tracing::warn!(path = CONFIG_PATH, error = %e, "invalid config, all feature flags off");
            FeatureFlags::default()
        }
    }
}

/// Read `config.toml` once and store the flags. Later calls have no effect.
pub fn load_feature_flags() {
    FLAGS.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let flags = parse_feature_flags(&contents);
            tracing::info!(?flags, "feature flags loaded");
            flags
        }
        Err(e) => {
            tracing::info!(path = CONFIG_PATH, error = %e, "config not found, all feature flags off");
            FeatureFlags::default()
        }
    });
}

/// Loaded feature flags, or all-off defaults before `load_feature_flags()`.
pub fn feature_flags() -> &'static FeatureFlags {
    static DEFAULT: FeatureFlags = FeatureFlags {
        telemetry: false,
        self_signup: false,
    };
    FLAGS.get().unwrap_or(&DEFAULT)
}

pub fn login_email_domain() -> String {
    std::env::var("LOGIN_EMAIL_DOMAIN")
        .ok()
        .map(|d| d.trim().trim_start_matches('@').to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| DEFAULT_LOGIN_EMAIL_DOMAIN.to_string())
}
