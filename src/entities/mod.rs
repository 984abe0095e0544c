pub mod prelude;

pub mod shifts;
pub mod users;
