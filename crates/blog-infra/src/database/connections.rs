#[cfg(feature = "mysql")]
use std::time::Duration;

#[cfg(feature = "mysql")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the posts database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Build a `mysql://` URL from discrete connection settings.
    pub fn mysql_url(host: &str, user: &str, password: &str, database: &str, port: u16) -> String {
        if password.is_empty() {
            format!("mysql://{user}@{host}:{port}/{database}")
        } else {
            format!("mysql://{user}:{password}@{host}:{port}/{database}")
        }
    }

    /// The URL with any password replaced, for logging.
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        match rest.rsplit_once('@') {
            Some((credentials, host)) => {
                let user = credentials.split(':').next().unwrap_or_default();
                format!("{scheme}://{user}:***@{host}")
            }
            None => self.url.clone(),
        }
    }
}

/// Connection pool shared by every request.
#[cfg(feature = "mysql")]
pub struct DatabaseConnections {
    pub main: DbConn,
}

#[cfg(feature = "mysql")]
impl DatabaseConnections {
    /// Open the connection pool from configuration.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!(url = %config.redacted_url(), "Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!("Database connected (pool: {})", config.max_connections);

        Ok(Self { main })
    }
}
