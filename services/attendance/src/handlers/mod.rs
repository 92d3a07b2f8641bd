pub mod attendance;
pub mod check_in;
pub mod health;
pub mod meeting;
pub mod token;
