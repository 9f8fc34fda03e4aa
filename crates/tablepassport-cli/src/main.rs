mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tablepassport")]
#[command(about = "TablePassport command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find restaurants within walking distance and print them as JSON
    Nearby {
        /// Latitude of the search center
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude of the search center
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
        /// Postal code to geocode when no coordinates are given
        #[arg(long)]
        zipcode: Option<String>,
        /// City to geocode when no coordinates are given
        #[arg(long)]
        city: Option<String>,
        /// Search radius in meters (defaults to 400)
        #[arg(long)]
        radius: Option<f64>,
        /// Extra search keyword, e.g. a cuisine
        #[arg(long)]
        keyword: Option<String>,
    },
    /// Reverse geocode a coordinate into city, state and neighborhood
    Reverse {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = tablepassport_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Nearby {
            lat,
            lng,
            zipcode,
            city,
            radius,
            keyword,
        } => {
            let query = tablepassport_nearby::LocationQuery {
                lat,
                lng,
                zipcode,
                city,
                radius_meters: radius,
                keyword,
            };
            commands::run_nearby(&config, &query).await?;
        }
        Commands::Reverse { lat, lng } => commands::run_reverse(&config, lat, lng).await?,
    }

    Ok(())
}
