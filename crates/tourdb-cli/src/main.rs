mod scrape;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tourdb-cli")]
#[command(about = "Tour catalogue extractor command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Discover tour pages, extract them and write the cleaned catalogue
    Scrape {
        /// Site config YAML; defaults to `TOURDB_SITE_PATH`
        #[arg(long)]
        site: Option<PathBuf>,
        /// Output JSON file; defaults to `TOURDB_OUTPUT_PATH`
        #[arg(long)]
        output: Option<PathBuf>,
        /// Skip the rendered discovery tier even if a browser is available
        #[arg(long)]
        no_browser: bool,
        /// Extract at most this many tour pages
        #[arg(long)]
        limit: Option<usize>,
        /// Run discovery only and print the candidate URLs
        #[arg(long)]
        dry_run: bool,
        /// Also write the uncleaned records, error records included
        #[arg(long)]
        raw_output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = tourdb_core::load_app_config_from_env()?;
    init_tracing(&config.log_level);

    match cli.command {
        Some(Commands::Scrape {
            site,
            output,
            no_browser,
            limit,
            dry_run,
            raw_output,
        }) => {
            let args = scrape::ScrapeArgs {
                site,
                output,
                no_browser,
                limit,
                dry_run,
                raw_output,
            };
            scrape::run_scrape(&config, args).await?;
        }
        None => println!("tourdb-cli ready; run `tourdb-cli scrape --help` to start"),
    }

    Ok(())
}

/// `RUST_LOG` wins when set; otherwise `TOURDB_LOG_LEVEL`.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
