use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LearningPaths::Table)
                    .if_not_exists()
                    .col(pk_uuid(LearningPaths::Id))
                    .col(string(LearningPaths::Title))
                    .col(uuid(LearningPaths::EmployeeId))
                    .col(uuid(LearningPaths::AssignedBy))
                    .col(
                        timestamp_with_time_zone(LearningPaths::AssignedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(LearningPaths::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(LearningPaths::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_learning_paths_employee_id")
                    .table(LearningPaths::Table)
                    .col(LearningPaths::EmployeeId)
                    .to_owned(),
            )
            .await?;

        // Steps go with their path
        manager
            .create_table(
                Table::create()
                    .table(LearningSteps::Table)
                    .if_not_exists()
                    .col(pk_uuid(LearningSteps::Id))
                    .col(uuid(LearningSteps::LearningPathId))
                    .col(string(LearningSteps::Title))
                    .col(text_null(LearningSteps::Description))
                    .col(string_len(LearningSteps::SkillType, 100))
                    .col(boolean(LearningSteps::Completed).default(false))
                    .col(timestamp_with_time_zone_null(LearningSteps::CompletedDate))
                    .col(
                        timestamp_with_time_zone(LearningSteps::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(LearningSteps::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_learning_steps_path")
                            .from(LearningSteps::Table, LearningSteps::LearningPathId)
                            .to(LearningPaths::Table, LearningPaths::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_learning_steps_path_id")
                    .table(LearningSteps::Table)
                    .col(LearningSteps::LearningPathId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LearningSteps::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LearningPaths::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LearningPaths {
    Table,
    Id,
    Title,
    EmployeeId,
    AssignedBy,
    AssignedDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LearningSteps {
    Table,
    Id,
    LearningPathId,
    Title,
    Description,
    SkillType,
    Completed,
    CompletedDate,
    CreatedAt,
    UpdatedAt,
}
