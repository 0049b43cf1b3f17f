//! HTTP server command
//!
//! Connects to PostgreSQL first and only then binds the listener, so an
//! unreachable database fails the process before any port is opened.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use bookings_server::db::{create_pool, DbConfig, PgStore};
use bookings_server::http::{run_server, CorsConfig, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, env = "BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// HTTP port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "postgres")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "root")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", default_value = "root", hide_env_values = true)]
    pub db_password: String,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "postgres")]
    pub db_name: String,

    /// Full database URL (overrides the individual --db-* settings)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Seconds to keep retrying the initial database connection
    #[arg(long, env = "DB_CONNECT_TIMEOUT", default_value_t = 5)]
    pub connect_timeout_secs: u64,

    /// Allowed CORS origin (repeatable; comma-separated in the env var)
    #[arg(long = "cors-origin", env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Seconds to wait for each database statement before answering 504
    #[arg(long, env = "STORE_TIMEOUT_SECS", default_value_t = 10)]
    pub store_timeout_secs: u64,
}

impl ServeArgs {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            database: self.db_name.clone(),
            url: self.database_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }

    pub fn server_config(&self) -> ServerConfig {
        let mut cors = CorsConfig {
            permissive: self.cors_permissive,
            ..CorsConfig::default()
        };
        if !self.cors_origins.is_empty() {
            cors.allowed_origins = self.cors_origins.clone();
        }

        ServerConfig {
            bind_addr: SocketAddr::new(self.bind, self.port),
            cors,
            store_timeout: Duration::from_secs(self.store_timeout_secs),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db_config = args.db_config();
    let config = args.server_config();

    tracing::info!(?db_config, "Starting bookings server on {}", config.bind_addr);

    let pool = create_pool(&db_config)
        .await
        .context("failed to connect to database")?;
    tracing::info!("Database connection established");

    // Run server (blocks until shutdown)
    run_server(Arc::new(PgStore::new(pool)), config)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ServeArgs {
        let argv = std::iter::once("serve").chain(args.iter().copied());
        ServeArgs::try_parse_from(argv).expect("args should parse")
    }

    #[test]
    fn flags_map_to_db_config() {
        let args = parse(&[
            "--db-host", "db.local",
            "--db-port", "6543",
            "--db-user", "app",
            "--db-password", "pw",
            "--db-name", "hotel",
            "--database-url", "postgres://u:p@h/d",
            "--connect-timeout-secs", "2",
        ]);
        let config = args.db_config();
        assert_eq!(config.host, "db.local");
        assert_eq!(config.port, 6543);
        assert_eq!(config.user, "app");
        assert_eq!(config.password, "pw");
        assert_eq!(config.database, "hotel");
        assert_eq!(config.url.as_deref(), Some("postgres://u:p@h/d"));
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
    }

    #[test]
    fn flags_map_to_server_config() {
        let args = parse(&[
            "--bind", "127.0.0.1",
            "--port", "8080",
            "--cors-origin", "http://a.example",
            "--cors-origin", "http://b.example",
            "--store-timeout-secs", "3",
        ]);
        let config = args.server_config();
        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://a.example".to_string(), "http://b.example".to_string()]
        );
        assert!(!config.cors.permissive);
        assert_eq!(config.store_timeout, Duration::from_secs(3));
    }

    #[test]
    fn no_origins_keeps_default_allow_list() {
        let args = parse(&["--cors-origin", "http://x.example"]);
        assert_eq!(args.server_config().cors.allowed_origins.len(), 1);

        let args = ServeArgs {
            cors_origins: Vec::new(),
            ..args
        };
        assert_eq!(
            args.server_config().cors.allowed_origins,
            CorsConfig::default().allowed_origins
        );
    }

    #[test]
    fn rejects_non_numeric_port() {
        let argv = ["serve", "--port", "http"];
        assert!(ServeArgs::try_parse_from(argv).is_err());
    }
}
