use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(mentorly_attendance_migration::Migrator).await;
}
