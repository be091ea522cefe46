use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// A configuration variable that is set but cannot be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{name} must be a valid {expected}, got {value:?}")]
pub struct ConfigError {
    name: &'static str,
    value: String,
    expected: &'static str,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// The JSON file holding the site document.
    pub data_file: PathBuf,
    /// Directory served as static files (the public site and admin panel).
    pub public_dir: PathBuf,
    /// Where uploaded images are written.
    pub image_dir: PathBuf,
    /// URL prefix, relative to the public directory, of uploaded images.
    pub image_url_prefix: String,
    /// Shared bearer secret accepted for whole-document saves and uploads.
    pub admin_password: String,
    /// Signing secret for per-user session tokens.
    pub jwt_secret: String,
    /// Lifetime of per-user session tokens.
    pub token_ttl_hours: u64,
    /// Largest accepted upload body.
    pub max_upload_bytes: usize,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let text = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
        let public_dir = PathBuf::from(text("PUBLIC_DIR", "public"));

        Ok(Self {
            host: text("HOST", "0.0.0.0"),
            port: parse(&lookup, "PORT", 4000, "port number")?,
            data_file: PathBuf::from(text("DATA_FILE", "data/data.json")),
            image_dir: lookup("IMAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| public_dir.join("img")),
            public_dir,
            image_url_prefix: text("IMAGE_URL_PREFIX", "img"),
            admin_password: text("ADMIN_PASSWORD", "admin123"),
            jwt_secret: text("JWT_SECRET", "dev-secret-change-me-in-production"),
            token_ttl_hours: parse(&lookup, "TOKEN_TTL_HOURS", 12, "number of hours")?,
            max_upload_bytes: parse(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024, "byte count")?,
            log_level: text("LOG_LEVEL", "info"),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError {
            name,
            value,
            expected,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:4000");
        assert_eq!(config.admin_password, "admin123");
        assert_eq!(config.image_dir, PathBuf::from("public/img"));
        assert_eq!(config.token_ttl_hours, 12);
    }

    #[test]
    fn overrides() {
        let config = from_pairs(&[
            ("PORT", "8080"),
            ("PUBLIC_DIR", "/srv/site"),
            ("DATA_FILE", "/srv/data.json"),
            ("ADMIN_PASSWORD", "s3cret"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.image_dir, PathBuf::from("/srv/site/img"));
        assert_eq!(config.data_file, PathBuf::from("/srv/data.json"));
        assert_eq!(config.admin_password, "s3cret");
    }

    #[test]
    fn bad_number_is_an_error() {
        let err = from_pairs(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
