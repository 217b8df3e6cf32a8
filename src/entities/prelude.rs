pub use super::comments::Entity as Comments;
pub use super::episodes::Entity as Episodes;
pub use super::programs::Entity as Programs;
pub use super::seasons::Entity as Seasons;
pub use super::user_programs::Entity as UserPrograms;
pub use super::users::Entity as Users;
