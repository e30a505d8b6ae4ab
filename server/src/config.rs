use std::env;
use std::path::PathBuf;

/// Runtime configuration, resolved once at startup and shared through
/// `web::Data`. Replaces the process-wide settings the service used to
/// rely on.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Root under which each request gets its own export directory.
    pub download_root: PathBuf,
    /// Upper bound for JSON request bodies, in bytes.
    pub max_payload_bytes: usize,
    pub tricount_api_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            download_root: PathBuf::from("downloads"),
            max_payload_bytes: 16 * 1024 * 1024,
            tricount_api_url: "https://api.tricount.bunq.com".to_string(),
        }
    }
}

impl AppConfig {
    /// Builds the configuration from environment variables, falling back
    /// to the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.port),
            download_root: env::var("DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.download_root),
            max_payload_bytes: defaults.max_payload_bytes,
            tricount_api_url: env::var("TRICOUNT_API_URL").unwrap_or(defaults.tricount_api_url),
        }
    }
}
