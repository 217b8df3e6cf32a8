pub mod episode;
pub mod program;
pub mod user;
