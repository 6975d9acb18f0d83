//! Command-line interface module.

mod args;
pub mod common;
pub mod path;
pub mod resolve;
pub mod transition;
pub mod tree;

pub use args::{Cli, Commands, ViewArgs};
