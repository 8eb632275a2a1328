//! Shared utilities

pub mod config;
pub mod fs;
pub mod hash;
pub mod shell;

pub use config::Config;
pub use shell::{ColorChoice, Shell, Status};
