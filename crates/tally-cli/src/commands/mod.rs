//! CLI subcommand implementations.

pub mod add;
pub mod remove;
pub mod show;
pub mod status;
