//! Configuration management
//!
//! Two layers: [`ClientConfig`] is baked in at compile time (it ships inside
//! the WASM bundle), [`ServerConfig`] is read at startup by the SSR server.

/// Build-time settings for the browser client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, `SURVEX_API_URL`
    pub api_url: Option<String>,
    /// reCAPTCHA v2 site key, `SURVEX_RECAPTCHA_SITE_KEY`
    pub recaptcha_site_key: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl ClientConfig {
    pub fn new(api_url: Option<&str>, recaptcha_site_key: Option<&str>) -> Self {
        Self {
            api_url: non_blank(api_url),
            recaptcha_site_key: non_blank(recaptcha_site_key),
        }
    }

    /// Values captured from the environment of the compiling process.
    pub fn from_build_env() -> Self {
        Self::new(
            option_env!("SURVEX_API_URL"),
            option_env!("SURVEX_RECAPTCHA_SITE_KEY"),
        )
    }

    /// Signup requires a bot-check token only when a site key is configured.
    pub fn bot_check_enabled(&self) -> bool {
        self.recaptcha_site_key.is_some()
    }
}

#[cfg(feature = "server")]
pub use server::{load_config, load_config_from, ServerConfig};

#[cfg(feature = "server")]
mod server {
    use std::net::{IpAddr, SocketAddr};
    use std::path::Path;

    use anyhow::Result;
    use serde::Deserialize;

    #[derive(Debug, Clone, Deserialize)]
    pub struct ServerConfig {
        #[serde(default = "default_port")]
        pub port: u16,

        #[serde(default = "default_bind")]
        pub bind: IpAddr,
    }

    fn default_port() -> u16 {
        3000
    }

    fn default_bind() -> IpAddr {
        IpAddr::from([0, 0, 0, 0])
    }

    impl ServerConfig {
        pub fn socket_addr(&self) -> SocketAddr {
            SocketAddr::new(self.bind, self.port)
        }
    }

    /// Load from `./survex.toml` (optional) and `SURVEX_*` environment.
    pub fn load_config() -> Result<ServerConfig> {
        load_config_from(Path::new("survex"))
    }

    /// Load with an explicit config file stem, e.g. `/etc/survex/survex`.
    pub fn load_config_from(path: &Path) -> Result<ServerConfig> {
        let config = ::config::Config::builder()
            // Start with defaults
            .set_default("port", 3000)?
            .set_default("bind", "0.0.0.0")?
            // Load from config file if it exists
            .add_source(::config::File::with_name(&path.to_string_lossy()).required(false))
            // Override with environment variables (SURVEX_PORT, SURVEX_BIND)
            .add_source(
                ::config::Environment::with_prefix("SURVEX")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_client_values_are_absent() {
        let config = ClientConfig::new(Some("  "), Some(""));
        assert_eq!(config, ClientConfig::default());
        assert!(!config.bot_check_enabled());
    }

    #[test]
    fn test_client_values_are_trimmed() {
        let config = ClientConfig::new(Some(" https://api.survex.app "), Some("site-key"));
        assert_eq!(config.api_url.as_deref(), Some("https://api.survex.app"));
        assert!(config.bot_check_enabled());
    }

    #[cfg(feature = "server")]
    mod server_config {
        use super::super::*;
        use serial_test::serial;
        use std::io::Write;

        #[test]
        #[serial]
        fn test_defaults_without_file() {
            let dir = tempfile::tempdir().unwrap();
            let config = load_config_from(&dir.path().join("missing")).unwrap();
            assert_eq!(config.port, 3000);
            assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
        }

        #[test]
        #[serial]
        fn test_file_overrides_defaults() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("survex.toml");
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "port = 8080\nbind = \"127.0.0.1\"").unwrap();

            let config = load_config_from(&dir.path().join("survex")).unwrap();
            assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        }

        #[test]
        #[serial]
        fn test_env_overrides_file() {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("survex.toml"), "port = 8080\n").unwrap();

            std::env::set_var("SURVEX_PORT", "9090");
            let result = load_config_from(&dir.path().join("survex"));
            std::env::remove_var("SURVEX_PORT");

            assert_eq!(result.unwrap().port, 9090);
        }

        #[test]
        #[serial]
        fn test_env_bind_single_underscore() {
            let dir = tempfile::tempdir().unwrap();

            std::env::set_var("SURVEX_BIND", "127.0.0.1");
            let result = load_config_from(&dir.path().join("missing"));
            std::env::remove_var("SURVEX_BIND");

            assert_eq!(result.unwrap().socket_addr().to_string(), "127.0.0.1:3000");
        }
    }
}
