//! CLI entry point for postpress

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "postpress")]
#[command(version)]
#[command(about = "A minimal static blog generator", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the static site
    #[command(aliases = ["g", "generate"])]
    Build {
        /// Remove the public directory before building
        #[arg(long)]
        clean: bool,
    },

    /// List content identifiers
    List {
        /// Print the index page data as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve one content file and print its title and HTML
    Show {
        /// Content identifier (file name without extension)
        id: String,

        /// Print the page data as JSON
        #[arg(long)]
        json: bool,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postpress=debug,info"
    } else {
        "postpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    match cli.command {
        Commands::Build { clean } => {
            let blog = postpress::Blog::new(&base_dir)?;
            tracing::info!("Building site from {:?}", blog.content_dir);

            let report = postpress::commands::build::run_with_options(&blog, clean)?;
            postpress::commands::build::ensure_success(&report)?;
            println!("Generated successfully!");
        }

        Commands::List { json } => {
            let blog = postpress::Blog::new(&base_dir)?;
            postpress::commands::list::run(&blog, json)?;
        }

        Commands::Show { id, json } => {
            let blog = postpress::Blog::new(&base_dir)?;
            postpress::commands::show::run(&blog, &id, json)?;
        }

        Commands::Clean => {
            let blog = postpress::Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("postpress version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
