pub mod prelude;

pub mod comments;
pub mod episodes;
pub mod programs;
pub mod seasons;
pub mod user_programs;
pub mod users;
