use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Meetings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Meetings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Meetings::MentorshipId).uuid().not_null())
                    .col(ColumnDef::new(Meetings::Title).string().not_null())
                    .col(
                        ColumnDef::new(Meetings::ScheduledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Meetings::Status)
                            .string_len(16)
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(ColumnDef::new(Meetings::CurrentToken).string_len(64))
                    .col(ColumnDef::new(Meetings::TokenExpiresAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Meetings::ManualCode).string_len(16))
                    .col(
                        ColumnDef::new(Meetings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Meetings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Meetings::Table, Meetings::MentorshipId)
                            .to(Mentorships::Table, Mentorships::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Meetings::Table)
                    .col(Meetings::MentorshipId)
                    .name("idx_meetings_mentorship_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Meetings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Meetings {
    Table,
    Id,
    MentorshipId,
    Title,
    ScheduledAt,
    Status,
    CurrentToken,
    TokenExpiresAt,
    ManualCode,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Mentorships {
    Table,
    Id,
}
