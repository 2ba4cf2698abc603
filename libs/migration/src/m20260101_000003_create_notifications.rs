use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(pk_uuid(Notifications::Id))
                    .col(uuid(Notifications::UserId))
                    .col(string_len(Notifications::Kind, 32))
                    .col(string(Notifications::Title))
                    .col(text(Notifications::Message))
                    .col(boolean(Notifications::Read).default(false))
                    .col(
                        timestamp_with_time_zone(Notifications::Date)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Notifications::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Notifications::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Recipient inbox, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_user_id_date")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .col(Notifications::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    UserId,
    Kind,
    Title,
    Message,
    Read,
    Date,
    CreatedAt,
    UpdatedAt,
}
