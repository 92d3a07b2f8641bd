use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AttendanceRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceRecords::MeetingId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendanceRecords::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(AttendanceRecords::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendanceRecords::CheckInTime).timestamp_with_time_zone())
                    .col(ColumnDef::new(AttendanceRecords::CheckOutTime).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(AttendanceRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    // One record per (meeting, user); check-in upserts conflict on this key.
                    .primary_key(
                        Index::create()
                            .col(AttendanceRecords::MeetingId)
                            .col(AttendanceRecords::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceRecords::Table, AttendanceRecords::MeetingId)
                            .to(Meetings::Table, Meetings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(AttendanceRecords::Table)
                    .col(AttendanceRecords::UserId)
                    .name("idx_attendance_records_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AttendanceRecords::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AttendanceRecords {
    Table,
    MeetingId,
    UserId,
    Status,
    CheckInTime,
    CheckOutTime,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Meetings {
    Table,
    Id,
}
