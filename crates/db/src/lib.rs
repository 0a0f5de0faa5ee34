use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

pub mod entities;
pub mod models;

pub use sea_orm::{DbErr, TransactionTrait};

#[derive(Clone)]
pub struct DBService {
    pub pool: DatabaseConnection,
}

impl DBService {
    /// Connects to `database_url` and applies any pending migrations.
    pub async fn new(database_url: &str) -> Result<DBService, DbErr> {
        let mut options = ConnectOptions::new(database_url.to_owned());
        options.sqlx_logging(false);

        let pool = Database::connect(options).await?;
        let pending = db_migration::Migrator::get_pending_migrations(&pool).await?;
        if !pending.is_empty() {
            tracing::info!(count = pending.len(), "Applying database migrations");
        }
        db_migration::Migrator::up(&pool, None).await?;
        Ok(DBService { pool })
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        self.pool.ping().await
    }
}

#[cfg(test)]
pub(crate) async fn test_db() -> DatabaseConnection {
    DBService::new("sqlite::memory:").await.unwrap().pool
}
