use serde::Deserialize;

use drivenest_store::StoreConfig;

/// Top-level configuration, loaded from `drivenest.toml`. Every section
/// and field has a default, so a missing file yields a runnable config.
#[derive(Debug, Default, Deserialize)]
pub struct DriveNestConfig {
    /// HTTP server bind settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Cross-origin request settings.
    #[serde(default)]
    pub cors: CorsConfig,

    /// Metadata store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Media storage settings.
    #[serde(default)]
    pub media: MediaConfig,

    /// Upload limits.
    #[serde(default)]
    pub upload: UploadConfig,
}

impl DriveNestConfig {
    /// Apply environment overrides: `DRIVENEST_PUBLIC_URL` (base public
    /// URL) and `DRIVENEST_ALLOWED_ORIGINS` (comma-separated CORS
    /// origins).
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var("DRIVENEST_PUBLIC_URL").ok(),
            std::env::var("DRIVENEST_ALLOWED_ORIGINS").ok(),
        );
    }

    fn apply_overrides(&mut self, public_url: Option<String>, origins: Option<String>) {
        if let Some(url) = public_url {
            self.server.public_url = Some(url);
        }
        if let Some(raw) = origins {
            let parsed: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect();
            if !parsed.is_empty() {
                self.cors.allowed_origins = parsed;
            }
        }
    }

    /// Base public URL returned links are built from. Falls back to
    /// `http://{host}:{port}` when not configured.
    pub fn public_url(&self) -> String {
        self.server.public_url.clone().unwrap_or_else(|| {
            format!("http://{}:{}", self.server.host, self.server.port)
        })
    }
}

/// HTTP server bind configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// External URL for building media links
    /// (e.g. `https://drivenest.example.com`).
    ///
    /// If not set, defaults to `http://{host}:{port}`.
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_url: None,
        }
    }
}

/// Cross-origin request configuration.
#[derive(Debug, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to make cross-origin requests.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// Media storage configuration.
#[derive(Debug, Deserialize)]
pub struct MediaConfig {
    /// Directory uploaded blobs are written to and served from.
    #[serde(default = "default_media_root")]
    pub root: String,

    /// URL path prefix the media directory is served under.
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: default_media_root(),
            url_prefix: default_url_prefix(),
        }
    }
}

/// Upload limit configuration.
#[derive(Debug, Deserialize)]
pub struct UploadConfig {
    /// Maximum accepted upload body size in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://127.0.0.1:3000".to_owned(),
        "http://localhost:3000".to_owned(),
    ]
}

fn default_media_root() -> String {
    "media".to_owned()
}

fn default_url_prefix() -> String {
    "/media".to_owned()
}

fn default_max_bytes() -> usize {
    50 * 1024 * 1024
}
