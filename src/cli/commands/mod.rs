//! One module per subcommand; each exposes an `execute` function.

pub mod add;
pub mod change_password;
pub mod delete;
pub mod get;
pub mod init;
pub mod list;
pub mod remove;
