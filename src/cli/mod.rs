//! CLI module for the dataplat deployment tool.
//!
//! This module provides the command-line interface for plan summarization
//! and deployment orchestration.

mod commands;

pub use commands::{Cli, Commands, TargetArgs};
