mod complaints;
mod conversions;
pub mod entity;
mod stats;
mod users;

use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Default location for the on-disk database when `DATABASE_URL` is unset.
const DEFAULT_DATABASE_URL: &str = "sqlite://soapbox.db?mode=rwc";

#[derive(Clone, Debug)]
pub struct SoapboxDb {
    db: DatabaseConnection,
}

impl SoapboxDb {
    /// Connects using `DATABASE_URL`, falling back to a local sqlite file.
    /// Pending migrations run before the connection is handed out.
    pub async fn connect() -> Result<Self> {
        let url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        Self::connect_to(&url).await
    }

    pub async fn connect_to(url: &str) -> Result<Self> {
        let mut opt = ConnectOptions::new(url.to_string());
        opt.max_connections(16).sqlx_logging(false);
        let db: DatabaseConnection = Database::connect(opt).await?;
        Migrator::up(&db, None).await?;

        Ok(Self { db })
    }
}
