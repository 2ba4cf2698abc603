use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Plain uuid references, no foreign keys: deleting a user or skill
        // leaves its scores in place.
        manager
            .create_table(
                Table::create()
                    .table(Scores::Table)
                    .if_not_exists()
                    .col(pk_uuid(Scores::Id))
                    .col(uuid(Scores::EmployeeId))
                    .col(uuid(Scores::SkillId))
                    .col(uuid(Scores::TrainerId))
                    .col(double(Scores::Score))
                    .col(text_null(Scores::Feedback))
                    .col(timestamp_with_time_zone(Scores::Date).default(Expr::current_timestamp()))
                    .col(
                        timestamp_with_time_zone(Scores::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Scores::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scores_employee_id")
                    .table(Scores::Table)
                    .col(Scores::EmployeeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scores_date")
                    .table(Scores::Table)
                    .col(Scores::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Scores::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Scores {
    Table,
    Id,
    EmployeeId,
    SkillId,
    TrainerId,
    Score,
    Feedback,
    Date,
    CreatedAt,
    UpdatedAt,
}
