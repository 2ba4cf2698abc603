//! Postgres connection and schema bootstrap.

use core_config::database::DatabaseConfig;
use domain_learning::PostgresLearningRepository;
use domain_notifications::{InboxService, PostgresNotificationRepository};
use domain_scores::PostgresScoreRepository;
use domain_skills::PostgresSkillRepository;
use domain_users::PostgresUserRepository;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::state::Stores;

pub type PostgresStores = Stores<
    PostgresUserRepository,
    PostgresSkillRepository,
    PostgresScoreRepository,
    PostgresLearningRepository,
>;

/// Open the pool and apply pending migrations when enabled.
pub async fn connect(config: &DatabaseConfig) -> eyre::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;
    info!("Connected to PostgreSQL");

    if config.run_migrations {
        info!("Running database migrations");
        Migrator::up(&db, None).await?;
        info!("Migrations completed");
    }

    Ok(db)
}

impl PostgresStores {
    pub fn postgres(db: &DatabaseConnection) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            skills: Arc::new(PostgresSkillRepository::new(db.clone())),
            scores: Arc::new(PostgresScoreRepository::new(db.clone())),
            learning: Arc::new(PostgresLearningRepository::new(db.clone())),
            inbox: InboxService::new(PostgresNotificationRepository::new(db.clone())),
        }
    }
}
