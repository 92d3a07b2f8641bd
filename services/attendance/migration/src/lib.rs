pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_mentorships;
mod m20261001_000002_create_meetings;
mod m20261001_000003_create_attendance_records;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_mentorships::Migration),
            Box::new(m20261001_000002_create_meetings::Migration),
            Box::new(m20261001_000003_create_attendance_records::Migration),
        ]
    }
}
