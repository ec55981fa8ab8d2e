//! Application configuration loaded from environment variables.

use store::CategorySet;

use crate::sessions::DEFAULT_MAX_OPEN_ORDERS;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `DATABASE_URL`: SQLite database (default: `"sqlite://menu.db"`)
/// - `MENU_CATEGORIES`: comma-separated menu sections
///   (default: `"Entrees,Sides,Beverages,Desserts"`)
/// - `MAX_OPEN_ORDERS`: orders kept open before the oldest is dropped
///   (default: `1024`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub database_url: String,
    pub categories: CategorySet,
    pub max_open_orders: usize,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            categories: lookup("MENU_CATEGORIES")
                .map(|list| CategorySet::parse(&list))
                .filter(|set| !set.is_empty())
                .unwrap_or(defaults.categories),
            max_open_orders: lookup("MAX_OPEN_ORDERS")
                .and_then(|n| n.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.max_open_orders),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            database_url: "sqlite://menu.db".to_string(),
            categories: CategorySet::default(),
            max_open_orders: DEFAULT_MAX_OPEN_ORDERS,
        }
    }
}
