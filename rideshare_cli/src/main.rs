use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::quote::QuoteArgs;

mod quote;
mod rides;
mod route;
mod store;
mod table;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolves two addresses into a route segment
    Route {
        #[arg(short, long)]
        start: String,

        #[arg(short, long)]
        end: String,
    },
    /// Prices a ride and its passengers from a JSON file
    #[command(visible_alias = "q")]
    Quote {
        #[command(flatten)]
        args: QuoteArgs,
    },
    /// Lists the stored rides, most recent first
    Rides {
        /// Folder holding the rides (default: $RIDESHARE_STORE_FOLDER or ./rides)
        #[arg(short, long)]
        store: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Route { start, end }) => route::run(&start, &end).await?,
        Some(Commands::Quote { args }) => quote::run(args).await?,
        Some(Commands::Rides { store }) => rides::run(store)?,
        None => {}
    }

    Ok(())
}
