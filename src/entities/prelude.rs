pub use super::shifts::Entity as Shifts;
pub use super::users::Entity as Users;
