use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use countries_cli::output::{render_detail, render_route, render_search, OutputFormat};
use countries_lib::{CountryService, SourceConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "World countries search, detail, and land-border routes")]
struct Cli {
    /// Read the dataset from a local JSON file instead of the upstream API.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find countries by name, code, or currency code.
    Search {
        query: String,
    },
    /// Show details for one country code.
    Detail {
        code: String,
    },
    /// Shortest land route between two country codes.
    Route {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = SourceConfig::from_env();
    if let Some(path) = cli.dataset {
        config.local_override = Some(path);
    }
    let source = config
        .into_source()
        .context("failed to configure the dataset source")?;
    let service = CountryService::new(source);

    let rendered = match cli.command {
        Command::Search { query } => {
            let countries = service
                .search(&query)
                .await
                .context("country search failed")?;
            render_search(&query, &countries, cli.format)?
        }
        Command::Detail { code } => {
            let country = service
                .country(&code)
                .await
                .context("country lookup failed")?;
            render_detail(&country, cli.format)?
        }
        Command::Route { from, to } => {
            let outcome = service
                .route(&from, &to)
                .await
                .with_context(|| format!("failed to plan a route from {from} to {to}"))?;
            render_route(&outcome, cli.format)?
        }
    };

    println!("{rendered}");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
