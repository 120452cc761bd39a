//! solex-cli
//!
//! Shared plumbing for the `account_logger` and `user_registry` binaries.

pub mod args;
pub mod cmd;
pub mod logging;
pub mod output;
