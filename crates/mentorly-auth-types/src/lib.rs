//! Identity types shared across Mentorly services.
//!
//! Authentication itself happens at the gateway; services only consume the
//! identity it injects.

pub mod identity;
