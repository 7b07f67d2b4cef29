//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use blog_core::service::ImagePolicy;
use blog_infra::database::DatabaseConfig;

/// Where uploaded images are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStoreConfig {
    Filesystem(PathBuf),
    Memory,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub images: ImageStoreConfig,
    pub image_policy: ImagePolicy,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(default)
        };

        let database = Self::database_url(&lookup).map(|url| DatabaseConfig {
            url,
            max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(10),
            min_connections: parse_var(&lookup, "DB_MIN_CONNECTIONS").unwrap_or(1),
        });

        let images = match lookup("IMAGE_STORE").as_deref().map(str::trim) {
            Some("memory") => ImageStoreConfig::Memory,
            _ => ImageStoreConfig::Filesystem(
                lookup("IMAGES_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("imagenes")),
            ),
        };

        let image_policy = if flag("REQUIRE_IMAGE", true) {
            ImagePolicy::Required
        } else {
            ImagePolicy::Optional
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_var(&lookup, "PORT").unwrap_or(3001),
            database,
            images,
            image_policy,
            max_upload_bytes: parse_var(&lookup, "MAX_UPLOAD_BYTES").unwrap_or(10 * 1024 * 1024),
        }
    }

    /// `DATABASE_URL` wins; otherwise the URL is assembled from `DB_HOST`, `DB_USER`,
    /// `DB_PASSWORD`, `DB_NAME` and `DB_PORT`.
    fn database_url(lookup: &impl Fn(&str) -> Option<String>) -> Option<String> {
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.is_empty()) {
            return Some(url);
        }

        let host = lookup("DB_HOST")?;
        let name = lookup("DB_NAME")?;
        let user = lookup("DB_USER").unwrap_or_else(|| "root".to_string());
        let password = lookup("DB_PASSWORD").unwrap_or_default();
        let port = parse_var(lookup, "DB_PORT").unwrap_or(3306);

        Some(DatabaseConfig::mysql_url(&host, &user, &password, &name, port))
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert!(config.database.is_none());
        assert_eq!(
            config.images,
            ImageStoreConfig::Filesystem(PathBuf::from("imagenes"))
        );
        assert_eq!(config.image_policy, ImagePolicy::Required);
    }

    #[test]
    fn test_database_from_discrete_settings() {
        let config = config(&[
            ("DB_HOST", "db"),
            ("DB_USER", "blog"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "posts"),
            ("DB_PORT", "3307"),
        ]);
        let db = config.database.unwrap();
        assert_eq!(db.url, "mysql://blog:secret@db:3307/posts");
        assert_eq!(db.max_connections, 10);
    }

    #[test]
    fn test_database_url_takes_precedence() {
        let config = config(&[
            ("DATABASE_URL", "mysql://u:p@h:1/d"),
            ("DB_HOST", "ignored"),
            ("DB_NAME", "ignored"),
        ]);
        assert_eq!(config.database.unwrap().url, "mysql://u:p@h:1/d");
    }

    #[test]
    fn test_lenient_memory_mode() {
        let config = config(&[("IMAGE_STORE", "memory"), ("REQUIRE_IMAGE", "false")]);
        assert_eq!(config.images, ImageStoreConfig::Memory);
        assert_eq!(config.image_policy, ImagePolicy::Optional);
    }
}
