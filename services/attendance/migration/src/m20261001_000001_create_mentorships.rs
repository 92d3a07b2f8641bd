use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Mentorships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Mentorships::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Mentorships::MentorId).uuid().not_null())
                    .col(
                        ColumnDef::new(Mentorships::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MentorshipMentees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MentorshipMentees::MentorshipId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MentorshipMentees::MenteeId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(MentorshipMentees::MentorshipId)
                            .col(MentorshipMentees::MenteeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MentorshipMentees::Table, MentorshipMentees::MentorshipId)
                            .to(Mentorships::Table, Mentorships::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(MentorshipMentees::Table)
                    .col(MentorshipMentees::MenteeId)
                    .name("idx_mentorship_mentees_mentee_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MentorshipMentees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Mentorships::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Mentorships {
    Table,
    Id,
    MentorId,
    CreatedAt,
}

#[derive(Iden)]
enum MentorshipMentees {
    Table,
    MentorshipId,
    MenteeId,
}
