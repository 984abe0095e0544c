mod create;
mod shifts;
mod users;

pub use create::cmd_create_user;
pub use shifts::cmd_list_shifts;
pub use users::cmd_list_users;
