//! CLI module for BasicApi
//!
//! - `serve`: run the HTTP API server

pub mod serve;

use clap::{Parser, Subcommand};

/// BasicApi - user authentication and product catalog over HTTP
#[derive(Parser)]
#[command(name = "basic-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),
}
