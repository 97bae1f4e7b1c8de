use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_dashboard::{models::Coordinates, models::Units, render, Dashboard, DashboardConfig};

#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", about = "Weather forecasts with a per-user search history")]
struct Cli {
    /// Use these units for this invocation without saving them
    #[arg(long, global = true, value_enum)]
    units: Option<Units>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Forecast for a city; the search is recorded in the history
    City { name: String },
    /// Forecast for a position
    Location {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Show recorded searches
    History {
        /// Show every entry instead of the latest five
        #[arg(long)]
        full: bool,
    },
    /// Save the preferred unit system
    Units {
        #[arg(value_enum)]
        unit: Units,
    },
    /// Switch between light and dark mode
    Theme,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_dashboard=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = DashboardConfig::load().context("Failed to load configuration")?;
    let mut dashboard = Dashboard::new(&config).context("Failed to initialise dashboard")?;

    dashboard.load().await.context("Failed to load preferences")?;
    if let Some(unit) = cli.units {
        dashboard.override_unit(unit);
    }

    match cli.command {
        Command::City { name } => dashboard.search_city(&name).await,
        Command::Location { lat, lon } => {
            dashboard.search_location(Coordinates { lat, lon }).await
        }
        Command::History { full } => {
            dashboard.toggle_history();
            if full {
                dashboard.toggle_full_history();
            }
        }
        Command::Units { unit } => {
            dashboard.change_unit(unit).await?;
            info!("Saved unit preference: {}", unit);
        }
        Command::Theme => {
            dashboard.toggle_dark_mode()?;
        }
    }

    print!("{}", render::render(dashboard.state()));
    Ok(())
}
