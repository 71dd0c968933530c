use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use waqt::cli::args::{Cli, Commands, PlaceArgs};
use waqt::cli::handlers;
use waqt::config::AppConfig;
use waqt::prayer_times::{PrayerTimesService, SystemClock};
use waqt::provider::AladhanClient;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => AppConfig::config_path()?,
    };
    let config = AppConfig::load_from(&config_path)
        .with_context(|| format!("Loading config from {:?}", config_path))?;
    debug!("Using config at {:?}", config_path);

    // No subcommand → today's times for the configured location
    let command = cli.command.unwrap_or(Commands::Today {
        place: PlaceArgs::default(),
        date: None,
    });

    match command {
        Commands::Methods => handlers::handle_methods(&config, cli.json)?,
        Commands::Locations => handlers::handle_locations(&config, cli.json)?,
        Commands::Config { init } => {
            handlers::handle_config(&config, &config_path, init, cli.json)?
        }
        Commands::Today { place, date } => {
            let service = build_service(&config)?;
            handlers::handle_today(&service, &config, &place, date, cli.json).await?;
        }
        Commands::Month { month, year, place } => {
            let service = build_service(&config)?;
            handlers::handle_month(&service, &config, &place, month, year, cli.json).await?;
        }
    }

    Ok(())
}

fn build_service(config: &AppConfig) -> Result<PrayerTimesService<AladhanClient>> {
    let client = AladhanClient::new(&config.provider.base_url, config.provider.timeout())
        .context("Building HTTP client")?;
    Ok(PrayerTimesService::with_clock(
        client,
        SystemClock,
        config.cache.capacity,
    ))
}
