//! Runtime configuration, read from the environment with local-use defaults.

use std::env;
use std::path::PathBuf;

/// Which record store backend serves this process.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StoreBackend {
    #[default]
    Sqlite,
    /// Legacy flat-file backend. Its history is independent of the sqlite
    /// one; the two are never synchronized.
    Csv,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Admin credentials. Compared with exact string equality; no hashing
    /// or lockout, matching the documented behavior.
    pub admin_username: String,
    pub admin_password: String,
    pub store_backend: StoreBackend,
    pub database_url: String,
    pub data_file: PathBuf,
    pub counter_file: PathBuf,
    pub upload_dir: PathBuf,
}

impl Config {
    /// Env: HOST, PORT, ADMIN_USERNAME, ADMIN_PASSWORD, STORE (sqlite|csv),
    /// DATABASE_URL, DATA_FILE, COUNTER_FILE, UPLOAD_DIR.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "123".to_string()),
            store_backend: match env::var("STORE").as_deref() {
                Ok("csv") => StoreBackend::Csv,
                _ => StoreBackend::Sqlite,
            },
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:players.db?mode=rwc".to_string()),
            data_file: env::var("DATA_FILE")
                .unwrap_or_else(|_| "data.csv".to_string())
                .into(),
            counter_file: env::var("COUNTER_FILE")
                .unwrap_or_else(|_| "id_counter.txt".to_string())
                .into(),
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
        }
    }
}
