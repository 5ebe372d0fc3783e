use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
    /// Connection string for the note store (a SQLite file path).
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Comma-separated colors offered by the rendered page.
    pub const NOTE_COLORS: &str = "NOTE_COLORS";
    pub const DB_POOL_SIZE: &str = "DB_POOL_SIZE";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 3000;
    pub const BIND_ADDRESS: &str = "0.0.0.0";
    pub const DATABASE_URL: &str = "./.db/notes.db";
    pub const NOTE_COLORS: &[&str] = &["#ffcc00", "#ff7eb9", "#7afcff", "#feff9c", "#ff65a3"];
    pub const DB_POOL_SIZE: u32 = 8;
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub database_url: String,
    pub note_colors: Vec<String>,
    pub db_pool_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: defaults::PORT,
            bind_address: defaults::BIND_ADDRESS.to_string(),
            database_url: defaults::DATABASE_URL.to_string(),
            note_colors: defaults::NOTE_COLORS.iter().map(|c| c.to_string()).collect(),
            db_pool_size: defaults::DB_POOL_SIZE,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let fallback = Self::default();

        let note_colors = env::var(env_vars::NOTE_COLORS)
            .ok()
            .map(|raw| parse_colors(&raw))
            .filter(|colors| !colors.is_empty())
            .unwrap_or(fallback.note_colors);

        Self {
            port: parse_or_default(env_vars::PORT, fallback.port),
            bind_address: env::var(env_vars::BIND_ADDRESS).unwrap_or(fallback.bind_address),
            database_url: env::var(env_vars::DATABASE_URL).unwrap_or(fallback.database_url),
            note_colors,
            db_pool_size: parse_or_default(env_vars::DB_POOL_SIZE, fallback.db_pool_size).max(1),
        }
    }

    /// Directory holding the database file, if the URL has one
    pub fn database_dir(&self) -> Option<PathBuf> {
        PathBuf::from(&self.database_url)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
    }
}

fn parse_or_default<T: std::str::FromStr + std::fmt::Display>(var: &str, default: T) -> T {
    match env::var(var) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Invalid {} value '{}', using default {}", var, raw, default);
            default
        }),
        Err(_) => default,
    }
}

fn parse_colors(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colors_skips_blanks() {
        assert_eq!(
            parse_colors(" #fff, ,red,"),
            vec!["#fff".to_string(), "red".to_string()]
        );
    }

    #[test]
    fn test_database_dir() {
        let config = Config::default();
        assert_eq!(config.database_dir(), Some(PathBuf::from("./.db")));

        let bare = Config {
            database_url: "notes.db".to_string(),
            ..Config::default()
        };
        assert_eq!(bare.database_dir(), None);
    }
}
