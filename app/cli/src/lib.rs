//! Gravity CLI application: runs the gateway and talks to it from the
//! terminal.

pub use cmd::{Cli, Command};

pub mod cmd;
pub mod config;
pub mod repl;
pub mod terminal;
