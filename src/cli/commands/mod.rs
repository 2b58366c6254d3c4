mod admin;
mod forge;
mod init_db;

pub use admin::cmd_admin;
pub use forge::cmd_forge;
pub use init_db::cmd_init_db;
