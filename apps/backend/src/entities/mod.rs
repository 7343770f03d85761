pub mod users;

pub use users::Entity as Users;
pub use users::Model as User;
