//! Command implementations for the Prism CLI.

pub mod batch;
pub mod config;
pub mod info;
pub mod publish;
