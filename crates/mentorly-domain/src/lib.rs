//! Domain types shared across all Mentorly services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod attendance;
pub mod meeting;
pub mod user;

/// Error returned when a wire string does not name a known status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseStatusError {
    pub kind: &'static str,
    pub value: String,
}
