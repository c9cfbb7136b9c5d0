//! CLI entry point for thoughts-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use thoughts_rs::content::{ContentError, Mode, Order};

#[derive(Parser)]
#[command(name = "thoughts-rs")]
#[command(version)]
#[command(about = "Content index for an MDX-backed blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Show drafts, as in development mode (otherwise read from SITE_ENV)
    #[arg(long, global = true)]
    dev: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List articles as the listing page shows them
    #[command(alias = "ls")]
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Oldest articles first
        #[arg(long)]
        oldest_first: bool,
    },

    /// Show one article by slug
    Show {
        slug: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print every slug, e.g. to enumerate static routes
    Slugs,

    /// List the most recent articles, as the home page shows them
    Latest {
        /// Number of articles (defaults to `latest_posts` from the config)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Write sitemap.xml
    Sitemap {
        /// Output file, `-` for stdout (defaults to <public_dir>/sitemap.xml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "thoughts_rs=debug,info"
    } else {
        "thoughts_rs=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<ContentError>() {
            Some(ContentError::NotFound { slug }) => {
                eprintln!("Not found: {}", slug);
                ExitCode::from(2)
            }
            _ => {
                eprintln!("Error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let mode = if cli.dev {
        Mode::Development
    } else {
        Mode::from_env()
    };

    match cli.command {
        Commands::List { json, oldest_first } => {
            let site = thoughts_rs::Site::new(&base_dir)?;
            let order = if oldest_first {
                Order::OldestFirst
            } else {
                Order::NewestFirst
            };
            thoughts_rs::commands::list::run(&site, mode, order, json)?;
        }

        Commands::Show { slug, json } => {
            let site = thoughts_rs::Site::new(&base_dir)?;
            thoughts_rs::commands::show::run(&site, &slug, json)?;
        }

        Commands::Slugs => {
            let site = thoughts_rs::Site::new(&base_dir)?;
            thoughts_rs::commands::list::slugs(&site)?;
        }

        Commands::Latest { count, json } => {
            let site = thoughts_rs::Site::new(&base_dir)?;
            thoughts_rs::commands::list::latest(&site, mode, count, json)?;
        }

        Commands::Sitemap { output } => {
            let site = thoughts_rs::Site::new(&base_dir)?;
            if let Some(path) =
                thoughts_rs::commands::sitemap::run(&site, mode, output.as_deref())?
            {
                println!("Generated {:?}", path);
            }
        }

        Commands::Version => {
            println!("thoughts-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
