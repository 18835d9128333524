//! Command implementations for the `cuecard` binary

pub mod import;
pub mod init;
pub mod list;
pub mod manage;
pub mod new;
pub mod render;
pub mod show;
pub mod validate;
pub mod watch;
