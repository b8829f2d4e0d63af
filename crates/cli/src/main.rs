//! Tales CLI - content file and story management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create a content file with three empty categories
//! tales seed -c Horror -c Romance -c "Sci Fi"
//!
//! # Report reference problems in a content file
//! tales check --path data/stories.json
//!
//! # Download the document from a running server
//! tales backup -o stories.json
//!
//! # Edit stories on a running server
//! tales stories list
//! tales stories add -t "My Tale" -c Horror -i https://example.com/a.jpg --content-file tale.txt
//! tales stories delete -c Horror --id horror-my-tale
//! ```
//!
//! # Commands
//!
//! - `seed` - Write a new content file
//! - `check` - Validate category references in a content file
//! - `backup` - Save the server's document to a file
//! - `stories` - List, add and delete stories through the content API

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

/// Server address used when neither `--api-url` nor `TALES_API_URL` is set.
const DEFAULT_API_URL: &str = "http://localhost:3001";

#[derive(Parser)]
#[command(name = "tales")]
#[command(author, version, about = "Tales CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a new content file with the given categories
    Seed {
        /// Content file to create
        #[arg(short, long, default_value = "data/stories.json")]
        path: PathBuf,

        /// Category name (repeatable, in display order)
        #[arg(short, long = "category", required = true)]
        categories: Vec<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Report category/story reference problems in a content file
    Check {
        /// Content file to check
        #[arg(short, long, default_value = "data/stories.json")]
        path: PathBuf,
    },
    /// Download the server's document to a file
    Backup {
        #[command(flatten)]
        server: ServerArgs,

        /// Output file (default: stories-backup-<timestamp>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Manage stories on a running server
    Stories {
        #[command(flatten)]
        server: ServerArgs,

        #[command(subcommand)]
        action: StoriesAction,
    },
}

#[derive(clap::Args)]
struct ServerArgs {
    /// Base URL of the Tales server
    #[arg(long, env = "TALES_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[derive(Subcommand)]
enum StoriesAction {
    /// List stories, optionally in one category
    List {
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Add a new story
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        category: String,

        /// Image URL or site path
        #[arg(short, long)]
        image: String,

        /// Story text
        #[arg(long, conflicts_with = "content_file", required_unless_present = "content_file")]
        content: Option<String>,

        /// Read the story text from a file
        #[arg(long)]
        content_file: Option<PathBuf>,
    },
    /// Delete a story from one category
    Delete {
        #[arg(short, long)]
        category: String,

        #[arg(long)]
        id: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed {
            path,
            categories,
            force,
        } => commands::seed::run(&path, categories, force).await?,
        Commands::Check { path } => commands::check::run(&path).await?,
        Commands::Backup { server, output } => {
            commands::backup::run(&server.api_url, output).await?;
        }
        Commands::Stories { server, action } => match action {
            StoriesAction::List { category } => {
                commands::stories::list(&server.api_url, category.as_deref()).await?;
            }
            StoriesAction::Add {
                title,
                category,
                image,
                content,
                content_file,
            } => {
                let content = match (content, content_file) {
                    (Some(content), _) => content,
                    (None, Some(file)) => tokio::fs::read_to_string(&file).await?,
                    (None, None) => String::new(),
                };
                commands::stories::add(&server.api_url, title, category, image, content).await?;
            }
            StoriesAction::Delete { category, id } => {
                commands::stories::delete(&server.api_url, &category, &id).await?;
            }
        },
    }
    Ok(())
}
