//! Server configuration loaded via OrthoConfig.
//!
//! Every value can come from the environment (`PORTAL_` prefix), a config
//! file, or CLI flags; the environment is how deployments supply secrets.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration for the lead portal server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTAL")]
pub struct ServerSettings {
    /// Socket address the HTTP server binds.
    pub bind_addr: Option<String>,
    /// Base URL of the hosted lead store's row API. When absent the server
    /// falls back to an in-memory store for local development.
    pub store_url: Option<Url>,
    /// API credential for the hosted lead store.
    pub store_api_key: Option<String>,
    /// Email delivery credential. Absence disables email and notifications
    /// degrade to logged skips.
    pub resend_api_key: Option<String>,
    /// Override for the notification recipient.
    pub admin_email: Option<String>,
}

impl ServerSettings {
    /// Bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server configuration parsing.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_configured() {
        let _guard = lock_env([
            ("PORTAL_BIND_ADDR", None::<String>),
            ("PORTAL_STORE_URL", None::<String>),
            ("PORTAL_STORE_API_KEY", None::<String>),
            ("PORTAL_RESEND_API_KEY", None::<String>),
            ("PORTAL_ADMIN_EMAIL", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), DEFAULT_BIND_ADDR);
        assert!(settings.store_url.is_none());
        assert!(settings.resend_api_key.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("PORTAL_BIND_ADDR", Some("127.0.0.1:9999".to_owned())),
            (
                "PORTAL_STORE_URL",
                Some("https://store.example.com/".to_owned()),
            ),
            ("PORTAL_STORE_API_KEY", Some("store-key".to_owned())),
            ("PORTAL_RESEND_API_KEY", Some("resend-key".to_owned())),
            ("PORTAL_ADMIN_EMAIL", Some("ops@example.com".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "127.0.0.1:9999");
        assert_eq!(
            settings.store_url.as_ref().map(Url::as_str),
            Some("https://store.example.com/")
        );
        assert_eq!(settings.store_api_key.as_deref(), Some("store-key"));
        assert_eq!(settings.resend_api_key.as_deref(), Some("resend-key"));
        assert_eq!(settings.admin_email.as_deref(), Some("ops@example.com"));
    }
}
