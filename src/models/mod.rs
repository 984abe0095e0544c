pub mod shift;
pub mod user;

pub use shift::Shift;
pub use user::{Role, UnknownRole, User, derive_full_name};
