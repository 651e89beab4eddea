mod rows;
mod seed;
mod stores;

#[cfg(test)]
mod tests;

pub use seed::SeedReport;
pub use stores::fixtures::FixtureFields;
pub use stores::lineups::LineupFields;
pub use stores::orgs::{ClubFields, FederationFields, HeadFederationFields};
pub use stores::sbo::NewSboEvent;
pub use stores::teams::TeamFields;
pub use stores::trainings::{EventFields, SeriesFields};
pub use stores::users::{NewProfileDates, NewUser};
pub use stores::venues::VenueFields;

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const SCHEMA: &str = include_str!("schema.sql");

pub use sqlx::Error as StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

/// SQLite-backed store. Cheap to clone, all stores hang off the shared
/// pool.
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Opens (and creates, for file URLs) the database at `url`.
    ///
    /// In-memory databases are pinned to a single connection: every
    /// pooled connection would otherwise see its own empty database.
    pub async fn connect(url: &str) -> StoreResult<Storage> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let max_connections = if url.contains(":memory:") { 1 } else { 8 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Storage { pool })
    }

    /// Applies the embedded schema. Every statement is `IF NOT EXISTS`,
    /// so running against an existing database is harmless.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        info!("schema applied");
        Ok(())
    }

    /// Inserts the embedded sport / age-group taxonomies, skipping rows
    /// that already exist.
    pub async fn seed(&self) -> StoreResult<SeedReport> {
        seed::apply(self).await
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
