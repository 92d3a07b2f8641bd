//! sea-orm entities for the tables read and written by the attendance service.

pub mod attendance_records;
pub mod meetings;
pub mod mentorship_mentees;
pub mod mentorships;
