//! CLI entry point for notes-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notes_rs::commands::render::RenderOptions;

#[derive(Parser)]
#[command(name = "notes-rs")]
#[command(version)]
#[command(about = "A static site generator for personal markdown notes", long_about = None)]
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
    /// Initialize a new notes site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new note and add it to the index
    New {
        /// Title of the new note
        title: String,

        /// Comma separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Add markdown files missing from the index
    Index,

    /// Render a markdown file to stdout
    Render {
        /// Markdown file to render
        file: PathBuf,

        /// Only extract title and summary
        #[arg(short, long)]
        summary: bool,

        /// Print the result as JSON
        #[arg(short, long)]
        json: bool,

        /// Highlight code blocks
        #[arg(long)]
        highlight: bool,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Clean the public folder
    Clean,

    /// List indexed notes
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "notes_rs=debug,info"
    } else {
        "notes_rs=info"
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
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing notes site in {:?}", target_dir);
            notes_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized notes site in {:?}", target_dir);
        }

        Commands::New { title, tags } => {
            let notes = notes_rs::Notes::new(&base_dir)?;
            tracing::info!("Creating new note with title: {}", title);
            notes.new_note(&title, &tags)?;
        }

        Commands::Index => {
            let notes = notes_rs::Notes::new(&base_dir)?;
            let added = notes_rs::commands::index::run(&notes)?;
            println!("Added {} notes to the index", added);
        }

        Commands::Render {
            file,
            summary,
            json,
            highlight,
        } => {
            let notes = notes_rs::Notes::new(&base_dir)?;
            let file = if file.is_absolute() {
                file
            } else {
                base_dir.join(file)
            };
            let options = RenderOptions {
                summary_only: summary,
                json,
                highlight,
            };
            println!("{}", notes_rs::commands::render::run(&notes, &file, options)?);
        }

        Commands::Generate { watch } => {
            let notes = notes_rs::Notes::new(&base_dir)?;
            tracing::info!("Generating static files...");

            notes.generate()?;
            println!("Generated successfully!");

            if watch {
                tracing::info!("Watching for file changes...");
                notes_rs::commands::generate::watch(&notes).await?;
            }
        }

        Commands::Clean => {
            let notes = notes_rs::Notes::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            notes.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List => {
            let notes = notes_rs::Notes::new(&base_dir)?;
            notes_rs::commands::list::run(&notes)?;
        }
    }

    Ok(())
}
