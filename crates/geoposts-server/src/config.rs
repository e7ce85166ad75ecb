use anyhow::{Context, Result, anyhow};
use axum_extra::extract::cookie::Key;
use tracing::warn;

use geoposts_db::SeedMode;

const MAPS_KEY_PLACEHOLDER: &str = "GOOGLE_MAPS_API_KEY_WAS_NOT_SET?!";

pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub maps_key: String,
    pub cookie_key: Key,
    pub seed_mode: SeedMode,
    pub proximity_limit: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let or = |name: &str, default: &str| var(name).unwrap_or_else(|| default.into());

        let port: u16 = or("PORT", "5000").parse().context("PORT")?;
        let seed_mode: SeedMode = or("SEED_MODE", "if-empty").parse()?;
        let proximity_limit: u32 = or("PROXIMITY_LIMIT", "100")
            .parse()
            .context("PROXIMITY_LIMIT")?;
        if proximity_limit == 0 {
            return Err(anyhow!("PROXIMITY_LIMIT must be at least 1"));
        }

        let cookie_key = match var("SECRET_KEY").filter(|s| !s.is_empty()) {
            Some(hex_key) => parse_secret_key(&hex_key)?,
            None => {
                warn!("SECRET_KEY is not set; generated a random one, cookies will not survive a restart");
                Key::generate()
            }
        };

        Ok(Self {
            host: or("HOST", "127.0.0.1"),
            port,
            mongodb_uri: or("MONGODB_URI", "mongodb://127.0.0.1:27017"),
            mongodb_db: or("MONGODB_DB", "mydatabase"),
            maps_key: or("GOOGLE_MAPS_API_KEY", MAPS_KEY_PLACEHOLDER),
            cookie_key,
            seed_mode,
            proximity_limit,
        })
    }
}

/// Hex-encoded key material, at least 64 bytes once decoded.
fn parse_secret_key(hex_key: &str) -> Result<Key> {
    let bytes = hex::decode(hex_key.trim()).context("SECRET_KEY must be hex")?;
    Key::try_from(bytes.as_slice()).map_err(|e| anyhow!("SECRET_KEY: {}", e))
}
