pub mod access;
pub mod check_in;
pub mod lifecycle;
pub mod manual_code;
pub mod roster;
pub mod token;
