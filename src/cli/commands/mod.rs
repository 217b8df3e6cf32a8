mod migrate;
mod seed;
mod serve;
mod user;

pub use migrate::cmd_migrate;
pub use seed::cmd_seed;
pub use serve::cmd_serve;
pub use user::cmd_create_user;
