//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::{commands, server, Folio};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "A static generator for a personal blog and portfolio site", long_about = None)]
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
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name for the new post, without extension
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Serve only, without watching or live reload
        #[arg(long)]
        r#static: bool,
    },

    /// Delete the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Search posts by title, summary and tags
    Search {
        /// Case-insensitive search text
        query: String,
    },

    /// Display version information
    Version,
}

fn init_logging(debug: bool) {
    let filter = if debug { "folio=debug,info" } else { "folio=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    let command = match cli.command {
        Commands::Init { folder } => {
            let target_dir = base_dir.join(folder);
            tracing::info!("Initializing site in {:?}", target_dir);
            commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
            return Ok(());
        }
        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        command => command,
    };

    let folio = Folio::new(&base_dir)?;
    match command {
        Commands::New { title, path } => {
            let created = commands::new::create_post(&folio, &title, path.as_deref())?;
            println!("Created: {:?}", created);
        }
        Commands::Generate { watch } => {
            folio.generate()?;
            println!("Generated successfully!");
            if watch {
                commands::generate::watch(&folio).await?;
            }
        }
        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            folio.generate()?;
            server::start(&folio, &ip, port, !r#static, open).await?;
        }
        Commands::Clean => {
            folio.clean()?;
            println!("Cleaned successfully!");
        }
        Commands::List { r#type } => commands::list::run(&folio, &r#type)?,
        Commands::Search { query } => commands::search::run(&folio, &query)?,
        // Handled before loading the site
        Commands::Init { .. } | Commands::Version => {}
    }

    Ok(())
}
