pub mod shift;
pub mod user;
