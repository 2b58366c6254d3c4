pub use super::movies::Entity as Movies;
pub use super::users::Entity as Users;
