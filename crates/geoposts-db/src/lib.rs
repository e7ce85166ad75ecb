pub mod models;
pub mod queries;
pub mod setup;

use anyhow::{Context, Result};
use mongodb::{Client, Collection};
use tracing::info;

use crate::models::{Location, Post};

pub use crate::setup::SeedMode;

pub const LOCATIONS: &str = "location";
pub const POSTS: &str = "post";

/// Handle to the application database. Clones share the driver's
/// connection pool.
#[derive(Clone)]
pub struct Database {
    db: mongodb::Database,
}

impl Database {
    /// Parse the connection string and build a client. The driver connects
    /// lazily, so this succeeds even if the server is not reachable yet.
    pub async fn connect(uri: &str, name: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .with_context(|| format!("invalid MongoDB URI {uri}"))?;

        info!("Database handle ready for {}", name);
        Ok(Self {
            db: client.database(name),
        })
    }

    pub fn name(&self) -> &str {
        self.db.name()
    }

    /// Ensure indexes and seed sample data according to `mode`.
    pub async fn init(&self, mode: SeedMode) -> Result<()> {
        setup::run(self, mode).await
    }

    pub(crate) fn raw(&self) -> &mongodb::Database {
        &self.db
    }

    pub(crate) fn locations(&self) -> Collection<Location> {
        self.db.collection(LOCATIONS)
    }

    pub(crate) fn posts(&self) -> Collection<Post> {
        self.db.collection(POSTS)
    }
}
