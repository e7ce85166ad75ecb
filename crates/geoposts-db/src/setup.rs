use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use bson::doc;
use mongodb::IndexModel;
use tracing::info;

use crate::Database;

/// Sample locations inserted by [`seed`].
pub const SAMPLE_LOCATIONS: &[(&str, f64, f64)] = &[
    ("Brandenburger Tor", 52.516247, 13.377711),
    ("Schloss Charlottenburg", 52.520608, 13.295581),
    ("Tempelhofer Feld", 52.473580, 13.405252),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Drop the whole database, then seed.
    Reset,
    /// Seed only when the location collection is empty.
    IfEmpty,
    Off,
}

impl FromStr for SeedMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset" => Ok(Self::Reset),
            "if-empty" => Ok(Self::IfEmpty),
            "off" => Ok(Self::Off),
            other => Err(anyhow!("unknown seed mode '{}' (expected reset, if-empty or off)", other)),
        }
    }
}

pub(crate) async fn run(db: &Database, mode: SeedMode) -> Result<()> {
    if mode == SeedMode::Reset {
        db.raw().drop().await.context("drop database")?;
        info!("Database {} dropped", db.name());
    }

    ensure_indexes(db).await?;

    let should_seed = match mode {
        SeedMode::Reset => true,
        SeedMode::IfEmpty => db
            .locations()
            .count_documents(doc! {})
            .await
            .context("count locations")?
            == 0,
        SeedMode::Off => false,
    };

    if should_seed {
        seed(db).await?;
    }

    info!("Database setup complete (seed mode {:?})", mode);
    Ok(())
}

async fn ensure_indexes(db: &Database) -> Result<()> {
    let geo_index = IndexModel::builder()
        .keys(doc! { "geom": "2dsphere" })
        .build();

    db.locations()
        .create_index(geo_index)
        .await
        .context("create 2dsphere index on location.geom")?;
    Ok(())
}

async fn seed(db: &Database) -> Result<()> {
    for (description, latitude, longitude) in SAMPLE_LOCATIONS {
        db.create_location(Some((*description).to_string()), *latitude, *longitude)
            .await?;
    }

    info!("Seeded {} sample locations", SAMPLE_LOCATIONS.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seed_modes() {
        assert_eq!("reset".parse::<SeedMode>().unwrap(), SeedMode::Reset);
        assert_eq!(" If-Empty ".parse::<SeedMode>().unwrap(), SeedMode::IfEmpty);
        assert_eq!("off".parse::<SeedMode>().unwrap(), SeedMode::Off);
        assert!("sometimes".parse::<SeedMode>().is_err());
    }
}
