pub use sea_orm_migration::prelude::*;

mod m20260101_000000_create_users;
mod m20260101_000001_create_skills;
mod m20260101_000002_create_scores;
mod m20260101_000003_create_notifications;
mod m20260101_000004_create_learning_paths;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000000_create_users::Migration),
            Box::new(m20260101_000001_create_skills::Migration),
            Box::new(m20260101_000002_create_scores::Migration),
            Box::new(m20260101_000003_create_notifications::Migration),
            Box::new(m20260101_000004_create_learning_paths::Migration),
        ]
    }
}
