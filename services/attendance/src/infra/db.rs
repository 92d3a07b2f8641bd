use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use mentorly_attendance_schema::{attendance_records, meetings, mentorship_mentees, mentorships};
use mentorly_domain::attendance::AttendanceStatus;
use mentorly_domain::meeting::MeetingStatus;

use crate::domain::repository::{AttendanceRepository, MeetingRepository, MentorshipRepository};
use crate::domain::types::{AttendanceRecord, Meeting, Mentorship, TransitionOutcome};
use crate::error::AttendanceServiceError;

fn open_statuses() -> [&'static str; 2] {
    MeetingStatus::OPEN.map(MeetingStatus::as_str)
}

// ── Mentorship repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMentorshipRepository {
    pub db: DatabaseConnection,
}

impl MentorshipRepository for DbMentorshipRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mentorship>, AttendanceServiceError> {
        let Some(model) = mentorships::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find mentorship by id")?
        else {
            return Ok(None);
        };
        let mentees = mentorship_mentees::Entity::find()
            .filter(mentorship_mentees::Column::MentorshipId.eq(id))
            .all(&self.db)
            .await
            .context("list mentorship mentees")?;
        Ok(Some(Mentorship {
            id: model.id,
            mentor_id: model.mentor_id,
            mentee_ids: mentees.into_iter().map(|m| m.mentee_id).collect(),
        }))
    }
}

// ── Meeting repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMeetingRepository {
    pub db: DatabaseConnection,
}

impl MeetingRepository for DbMeetingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Meeting>, AttendanceServiceError> {
        let model = meetings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find meeting by id")?;
        model.map(meeting_from_model).transpose()
    }

    async fn rotate_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<bool, AttendanceServiceError> {
        let result = meetings::Entity::update_many()
            .col_expr(meetings::Column::CurrentToken, Expr::value(token))
            .col_expr(meetings::Column::TokenExpiresAt, Expr::value(expires_at))
            .col_expr(meetings::Column::UpdatedAt, Expr::value(now))
            .filter(meetings::Column::Id.eq(id))
            .filter(meetings::Column::Status.is_in(open_statuses()))
            .exec(&self.db)
            .await
            .context("rotate meeting token")?;
        Ok(result.rows_affected > 0)
    }

    async fn set_manual_code_if_absent(
        &self,
        id: Uuid,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Meeting>, AttendanceServiceError> {
        meetings::Entity::update_many()
            .col_expr(meetings::Column::ManualCode, Expr::value(code))
            .col_expr(meetings::Column::UpdatedAt, Expr::value(now))
            .filter(meetings::Column::Id.eq(id))
            .filter(meetings::Column::ManualCode.is_null())
            .filter(meetings::Column::Status.is_in(open_statuses()))
            .exec(&self.db)
            .await
            .context("set meeting manual code")?;
        self.find_by_id(id).await
    }

    async fn transition(
        &self,
        id: Uuid,
        to: MeetingStatus,
        now: DateTime<Utc>,
        close_open_sessions: bool,
    ) -> Result<Option<TransitionOutcome>, AttendanceServiceError> {
        let outcome = self
            .db
            .transaction::<_, Option<(meetings::Model, u64)>, DbErr>(move |txn| {
                Box::pin(async move {
                    let from: Vec<&'static str> = to
                        .allowed_predecessors()
                        .iter()
                        .map(|s| s.as_str())
                        .collect();
                    let mut update = meetings::Entity::update_many()
                        .col_expr(meetings::Column::Status, Expr::value(to.as_str()))
                        .col_expr(meetings::Column::UpdatedAt, Expr::value(now))
                        .filter(meetings::Column::Id.eq(id))
                        .filter(meetings::Column::Status.is_in(from));
                    if to.is_terminal() {
                        update = update
                            .col_expr(
                                meetings::Column::CurrentToken,
                                Expr::value(Option::<String>::None),
                            )
                            .col_expr(
                                meetings::Column::TokenExpiresAt,
                                Expr::value(Option::<DateTime<Utc>>::None),
                            )
                            .col_expr(
                                meetings::Column::ManualCode,
                                Expr::value(Option::<String>::None),
                            );
                    }
                    if update.exec(txn).await?.rows_affected == 0 {
                        return Ok(None);
                    }

                    let forced = if close_open_sessions {
                        checkout_open_sessions(txn, id, now).await?
                    } else {
                        0
                    };

                    let model = meetings::Entity::find_by_id(id).one(txn).await?;
                    Ok(model.map(|m| (m, forced)))
                })
            })
            .await
            .context("transition meeting")?;

        outcome
            .map(|(model, forced_checkouts)| {
                Ok(TransitionOutcome {
                    meeting: meeting_from_model(model)?,
                    forced_checkouts,
                })
            })
            .transpose()
    }
}

async fn checkout_open_sessions<C: ConnectionTrait>(
    conn: &C,
    meeting_id: Uuid,
    now: DateTime<Utc>,
) -> Result<u64, DbErr> {
    let result = attendance_records::Entity::update_many()
        .col_expr(attendance_records::Column::CheckOutTime, Expr::value(now))
        .col_expr(attendance_records::Column::UpdatedAt, Expr::value(now))
        .filter(attendance_records::Column::MeetingId.eq(meeting_id))
        .filter(attendance_records::Column::CheckInTime.is_not_null())
        .filter(attendance_records::Column::CheckOutTime.is_null())
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

fn meeting_from_model(model: meetings::Model) -> Result<Meeting, AttendanceServiceError> {
    let status = model
        .status
        .parse::<MeetingStatus>()
        .context("decode meeting status")?;
    Ok(Meeting {
        id: model.id,
        mentorship_id: model.mentorship_id,
        title: model.title,
        scheduled_at: model.scheduled_at,
        status,
        current_token: model.current_token,
        token_expires_at: model.token_expires_at,
        manual_code: model.manual_code,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Attendance repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAttendanceRepository {
    pub db: DatabaseConnection,
}

impl AttendanceRepository for DbAttendanceRepository {
    async fn find(
        &self,
        meeting_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<AttendanceRecord>, AttendanceServiceError> {
        let model = attendance_records::Entity::find_by_id((meeting_id, user_id))
            .one(&self.db)
            .await
            .context("find attendance record")?;
        model.map(attendance_from_model).transpose()
    }

    async fn list_by_meeting(
        &self,
        meeting_id: Uuid,
    ) -> Result<Vec<AttendanceRecord>, AttendanceServiceError> {
        // Postgres sorts NULLs last in ascending order.
        let models = attendance_records::Entity::find()
            .filter(attendance_records::Column::MeetingId.eq(meeting_id))
            .order_by_asc(attendance_records::Column::CheckInTime)
            .order_by_asc(attendance_records::Column::UserId)
            .all(&self.db)
            .await
            .context("list attendance by meeting")?;
        models.into_iter().map(attendance_from_model).collect()
    }

    async fn check_in(
        &self,
        meeting_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<AttendanceRecord, AttendanceServiceError> {
        let record = attendance_records::ActiveModel {
            meeting_id: Set(meeting_id),
            user_id: Set(user_id),
            status: Set(AttendanceStatus::Present.as_str().to_owned()),
            check_in_time: Set(Some(now)),
            check_out_time: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        // Every SET expression sees the pre-update row, so the status CASE
        // and the COALESCE both test the original check_in_time.
        let on_conflict = OnConflict::columns([
            attendance_records::Column::MeetingId,
            attendance_records::Column::UserId,
        ])
        .update_columns([
            attendance_records::Column::CheckOutTime,
            attendance_records::Column::UpdatedAt,
        ])
        .value(
            attendance_records::Column::CheckInTime,
            Expr::cust(
                "COALESCE(attendance_records.check_in_time, EXCLUDED.check_in_time)",
            ),
        )
        .value(
            attendance_records::Column::Status,
            Expr::cust(
                "CASE WHEN attendance_records.check_in_time IS NULL \
                 THEN EXCLUDED.status ELSE attendance_records.status END",
            ),
        )
        .to_owned();

        let model = attendance_records::Entity::insert(record)
            .on_conflict(on_conflict)
            .exec_with_returning(&self.db)
            .await
            .context("upsert attendance check-in")?;
        attendance_from_model(model)
    }

    async fn check_out(
        &self,
        meeting_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<AttendanceRecord>, AttendanceServiceError> {
        let result = attendance_records::Entity::update_many()
            .col_expr(attendance_records::Column::CheckOutTime, Expr::value(now))
            .col_expr(attendance_records::Column::UpdatedAt, Expr::value(now))
            .filter(attendance_records::Column::MeetingId.eq(meeting_id))
            .filter(attendance_records::Column::UserId.eq(user_id))
            .filter(attendance_records::Column::CheckInTime.is_not_null())
            .filter(attendance_records::Column::CheckOutTime.is_null())
            .exec(&self.db)
            .await
            .context("check out attendance")?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find(meeting_id, user_id).await
    }

    async fn set_status(
        &self,
        meeting_id: Uuid,
        user_id: Uuid,
        status: AttendanceStatus,
        now: DateTime<Utc>,
    ) -> Result<AttendanceRecord, AttendanceServiceError> {
        let record = attendance_records::ActiveModel {
            meeting_id: Set(meeting_id),
            user_id: Set(user_id),
            status: Set(status.as_str().to_owned()),
            check_in_time: Set(None),
            check_out_time: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = attendance_records::Entity::insert(record)
            .on_conflict(
                OnConflict::columns([
                    attendance_records::Column::MeetingId,
                    attendance_records::Column::UserId,
                ])
                .update_columns([
                    attendance_records::Column::Status,
                    attendance_records::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .context("upsert attendance status")?;
        attendance_from_model(model)
    }
}

fn attendance_from_model(
    model: attendance_records::Model,
) -> Result<AttendanceRecord, AttendanceServiceError> {
    let status = model
        .status
        .parse::<AttendanceStatus>()
        .context("decode attendance status")?;
    Ok(AttendanceRecord {
        meeting_id: model.meeting_id,
        user_id: model.user_id,
        status,
        check_in_time: model.check_in_time,
        check_out_time: model.check_out_time,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
