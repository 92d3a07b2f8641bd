pub mod clock;
pub mod credential;
pub mod payload;
pub mod repository;
pub mod types;
