//! CLI module for Cypherflow
//!
//! Provides the `serve` subcommand that runs the workflow service.

pub mod serve;

use clap::{Parser, Subcommand};

/// Cypherflow - query-validation and Cypher-generation workflow service
#[derive(Parser)]
#[command(name = "cypherflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the workflow HTTP server
    Serve,
}
