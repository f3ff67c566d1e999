//! # Gradebook CLI Module
//!
//! This module implements the CLI interface for the gradebook.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `status` - Show student and grade counts
//! - `students` - List students
//! - `add-student` - Create a student
//! - `add-grade` - Add a grade to a student
//! - `remove-grade` - Remove a grade from a student
//! - `grades` - List a student's grades
//! - `report` - Average, max and promotion per discipline
//! - `init` - Initialize a new database
//! - `compact` - Compact the database file

mod commands;

use crate::config::{AppConfig, BackendKind};
use clap::{Parser, Subcommand};
use gradebook_core::{Discipline, GradebookError};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Gradebook - students, grades and per-discipline reports
#[derive(Parser, Debug)]
#[command(name = "gradebook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file (default: ./gradebook.toml if present)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the gradebook database (overrides the config file)
    #[arg(short = 'D', long, global = true)]
    pub database: Option<PathBuf>,

    /// Storage backend: "redb" (ACID database) or "memory" (volatile)
    #[arg(short = 'B', long, global = true)]
    pub backend: Option<BackendKind>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides the config file)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show student and grade counts
    Status,

    /// List students with their grades
    Students,

    /// Create a student
    AddStudent {
        /// First name
        first_name: String,
        /// Last name
        last_name: String,
        /// Group label
        group: String,
    },

    /// Add a grade to a student
    AddGrade {
        /// Student ID
        #[arg(short, long)]
        student: u64,
        /// Grade value
        value: f64,
        /// Discipline (e.g. algebra, web-development)
        discipline: Discipline,
    },

    /// Remove a grade from a student
    RemoveGrade {
        /// Student ID
        #[arg(short, long)]
        student: u64,
        /// Grade ID
        #[arg(short, long)]
        grade: u64,
    },

    /// List a student's grades
    Grades {
        /// Student ID
        #[arg(short, long)]
        student: u64,
    },

    /// Show average, max and promotion per discipline
    Report {
        /// Student ID
        #[arg(short, long)]
        student: u64,
    },

    /// Initialize a new empty database
    Init {
        /// Force initialization even if database exists
        #[arg(short, long)]
        force: bool,
    },

    /// Compact the database file
    Compact,
}

// =============================================================================
// LOGGING
// =============================================================================

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "gradebook=debug,tower_http=debug"
    } else {
        "gradebook=info,tower_http=debug"
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), GradebookError> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(database) = cli.database {
        config.storage.database = database;
    }
    if let Some(backend) = cli.backend {
        config.storage.backend = backend;
    }
    tracing::debug!(
        backend = %config.storage.backend,
        database = %config.storage.database.display(),
        "Configuration resolved"
    );

    let storage = &config.storage;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_server(&config).await
        }
        Some(Commands::Status) => cmd_status(storage, json_mode),
        Some(Commands::Students) => cmd_students(storage, json_mode),
        Some(Commands::AddStudent {
            first_name,
            last_name,
            group,
        }) => cmd_add_student(storage, json_mode, &first_name, &last_name, &group),
        Some(Commands::AddGrade {
            student,
            value,
            discipline,
        }) => cmd_add_grade(storage, json_mode, student, value, discipline),
        Some(Commands::RemoveGrade { student, grade }) => {
            cmd_remove_grade(storage, json_mode, student, grade)
        }
        Some(Commands::Grades { student }) => cmd_grades(storage, json_mode, student),
        Some(Commands::Report { student }) => cmd_report(storage, json_mode, student),
        Some(Commands::Init { force }) => cmd_init(storage, force),
        Some(Commands::Compact) => cmd_compact(storage),
        None => {
            // No subcommand - show status by default
            cmd_status(storage, json_mode)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
