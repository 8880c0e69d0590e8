//! Tally CLI library.
//!
//! This crate provides the command-line front end for the tally event counter.

mod cli;
pub mod commands;
mod config;
pub mod notify;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use notify::{Notification, Outcome};
