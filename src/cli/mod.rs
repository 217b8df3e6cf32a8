//! CLI module - operator commands for Wild Séries
//!
//! Parsed with clap; every command runs against the configured database.

mod commands;

use clap::{Parser, Subcommand};

/// Wild Séries - TV programs, episodes and comments
#[derive(Parser)]
#[command(name = "wildseries")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply migrations and start the web server (default)
    Serve,

    /// Apply pending migrations and exit
    Migrate,

    /// Create a user account
    CreateUser {
        /// Login email
        email: String,
        /// Plain-text password, hashed before it is stored
        password: String,
    },

    /// Load demo users, programs, seasons and episodes
    Seed {
        /// Number of programs to create
        #[arg(long)]
        programs: Option<usize>,
        /// Seasons per program
        #[arg(long)]
        seasons: Option<usize>,
        /// Episodes per season
        #[arg(long)]
        episodes: Option<usize>,
    },
}

pub use commands::*;
