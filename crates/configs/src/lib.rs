use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub geo: GeoConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub registration: RegistrationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            worker_threads: Some(4),
            frontend_dir: default_frontend_dir(),
        }
    }
}

/// The REST backend every admin screen is bound to.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self { base_url: String::new(), timeout_secs: default_timeout() }
    }
}

/// Third-party administrative-division lookup (province → district).
#[derive(Debug, Clone, Deserialize)]
pub struct GeoConfig {
    #[serde(default = "default_provinces_url")]
    pub provinces_url: String,
    /// `{code}` is replaced with the province code.
    #[serde(default = "default_districts_url")]
    pub districts_url: String,
    #[serde(default = "default_geo_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            provinces_url: default_provinces_url(),
            districts_url: default_districts_url(),
            cache_ttl_secs: default_geo_ttl(),
        }
    }
}

/// Third-party image hosting used by service/staff forms.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub upload_preset: Option<String>,
    #[serde(default = "default_max_upload")]
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self { endpoint: String::new(), upload_preset: None, max_bytes: default_max_upload() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { cookie_name: default_cookie_name(), secure_cookie: false }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationConfig {
    #[serde(default = "default_draft_ttl")]
    pub draft_ttl_secs: u64,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self { draft_ttl_secs: default_draft_ttl() }
    }
}

fn default_frontend_dir() -> String { "frontend".into() }
fn default_timeout() -> u64 { 30 }
fn default_provinces_url() -> String { "https://provinces.open-api.vn/api/p/".into() }
fn default_districts_url() -> String { "https://provinces.open-api.vn/api/p/{code}?depth=2".into() }
fn default_geo_ttl() -> u64 { 24 * 3600 }
const MAX_GEO_TTL_SECS: u64 = 30 * 24 * 3600;
const MAX_DRAFT_TTL_SECS: u64 = 24 * 3600;
fn default_max_upload() -> usize { 5 * 1024 * 1024 }
fn default_cookie_name() -> String { "auth_token".into() }
fn default_draft_ttl() -> u64 { 30 * 60 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults when the
    /// file is absent, then apply env overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.apply_env();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Environment variables take precedence over the file.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("BACKEND_BASE_URL") {
            self.backend.base_url = url;
        }
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Ok(endpoint) = std::env::var("UPLOAD_ENDPOINT") {
            self.upload.endpoint = endpoint;
        }
        if let Ok(preset) = std::env::var("UPLOAD_PRESET") {
            self.upload.upload_preset = Some(preset);
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.backend.normalize_and_validate()?;
        self.geo.validate()?;
        self.upload.validate()?;
        if self.session.cookie_name.trim().is_empty() {
            return Err(anyhow!("session.cookie_name must not be empty"));
        }
        if !(1..=MAX_DRAFT_TTL_SECS).contains(&self.registration.draft_ttl_secs) {
            return Err(anyhow!("registration.draft_ttl_secs must be in 1..={MAX_DRAFT_TTL_SECS}"));
        }
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        if self.frontend_dir.trim().is_empty() {
            self.frontend_dir = default_frontend_dir();
        }
        Ok(())
    }
}

impl BackendConfig {
    pub fn normalize_and_validate(&mut self) -> Result<()> {
        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            return Err(anyhow!("backend.base_url is empty; set it in config.toml or BACKEND_BASE_URL"));
        }
        if !is_http_url(&trimmed) {
            return Err(anyhow!("backend.base_url must start with http:// or https://"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("backend.timeout_secs must be a positive number of seconds"));
        }
        self.base_url = trimmed;
        Ok(())
    }
}

impl GeoConfig {
    pub fn validate(&self) -> Result<()> {
        if !is_http_url(&self.provinces_url) || !is_http_url(&self.districts_url) {
            return Err(anyhow!("geo urls must start with http:// or https://"));
        }
        if !self.districts_url.contains("{code}") {
            return Err(anyhow!("geo.districts_url must contain a {{code}} placeholder"));
        }
        if !(1..=MAX_GEO_TTL_SECS).contains(&self.cache_ttl_secs) {
            return Err(anyhow!("geo.cache_ttl_secs must be in 1..={MAX_GEO_TTL_SECS}"));
        }
        Ok(())
    }

    pub fn districts_url_for(&self, province_code: &str) -> String {
        self.districts_url.replace("{code}", province_code)
    }
}

impl UploadConfig {
    fn validate(&self) -> Result<()> {
        if !self.endpoint.is_empty() && !is_http_url(&self.endpoint) {
            return Err(anyhow!("upload.endpoint must start with http:// or https://"));
        }
        if self.max_bytes == 0 {
            return Err(anyhow!("upload.max_bytes must be > 0"));
        }
        Ok(())
    }

    pub fn enabled(&self) -> bool {
        !self.endpoint.is_empty()
    }
}

fn is_http_url(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
