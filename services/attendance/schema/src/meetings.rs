use sea_orm::entity::prelude::*;

/// A mentorship meeting and its check-in credentials.
///
/// `status` holds the snake_case wire name of `MeetingStatus`.
/// `current_token`, `token_expires_at` and `manual_code` are only ever
/// non-null while the meeting is `scheduled` or `in_progress`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "meetings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub mentorship_id: Uuid,
    pub title: String,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub status: String,
    pub current_token: Option<String>,
    pub token_expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub manual_code: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mentorships::Entity",
        from = "Column::MentorshipId",
        to = "super::mentorships::Column::Id"
    )]
    Mentorship,
    #[sea_orm(has_many = "super::attendance_records::Entity")]
    AttendanceRecords,
}

impl Related<super::mentorships::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mentorship.def()
    }
}

impl Related<super::attendance_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
