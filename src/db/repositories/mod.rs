pub mod comment;
pub mod episode;
pub mod program;
pub mod season;
pub mod user;
