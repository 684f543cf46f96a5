//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations (`logmask filter`,
//! `logmask check`).

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod filter;
pub mod shared;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
