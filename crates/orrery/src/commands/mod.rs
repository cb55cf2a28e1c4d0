//! Commands that run without a loaded session.

pub mod init;
