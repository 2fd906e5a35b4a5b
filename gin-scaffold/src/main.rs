//! gin-scaffold CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;

use gin_scaffold::commands::{
    CommandContext, ControllerCommand, InitCommand, ModelCommand, ScaffoldCommand,
};
use gin_scaffold::observability;
use gin_scaffold::scaffold::ConsoleReporter;

#[derive(Parser)]
#[command(name = "gin-scaffold")]
#[command(version)]
#[command(about = "Scaffolding generator for gin web applications", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new gin application
    Init {
        /// Application path (e.g., `blog`)
        path: PathBuf,
    },
    /// Generate a model and its database session
    Model {
        /// Model name (e.g., `post`, `user_profile`)
        name: String,
        /// Field definitions (e.g., `title:text`, `views:integer`)
        #[arg(required = true)]
        fields: Vec<String>,
    },
    /// Generate a controller and register its routes
    Controller {
        /// Resource name, singular or plural
        name: String,
        /// Field definitions (e.g., `title:text`)
        fields: Vec<String>,
    },
    /// Generate a model and its controller
    Scaffold {
        /// Model name
        name: String,
        /// Field definitions (e.g., `title:text`, `published_at:datetime`)
        #[arg(required = true)]
        fields: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init()?;

    let ctx = CommandContext::load()?;
    let sink = ConsoleReporter;

    match cli.command {
        Commands::Init { path } => {
            InitCommand::new(path.clone()).execute(&ctx, &sink)?;

            println!("\n{}", style("Next steps:").cyan().bold());
            println!("  cd {}", style(path.display()).yellow());
            println!("  {}", style("go run .").yellow());
        }
        Commands::Model { name, fields } => {
            ModelCommand::new(name, fields).execute(&ctx, &sink)?;
        }
        Commands::Controller { name, fields } => {
            ControllerCommand::new(name, fields).execute(&ctx, &sink)?;
        }
        Commands::Scaffold { name, fields } => {
            ScaffoldCommand::new(name, fields).execute(&ctx, &sink)?;
        }
    }

    Ok(())
}
