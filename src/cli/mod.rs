//! Command-line interface module.

mod args;
pub mod common;
pub mod export;
pub mod generate;
pub mod path;
pub mod register;
pub mod status;

pub use args::{Cli, Commands};
