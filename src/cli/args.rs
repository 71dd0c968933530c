use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::models::{SavedLocation, School};

#[derive(Parser, Debug)]
#[command(name = "waqt", version, author, about = "Prayer times, countdowns and monthly timetables from the terminal")]
pub struct Cli {
    /// Read settings from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a day's prayer times and countdown to the next prayer
    Today {
        #[command(flatten)]
        place: PlaceArgs,
        /// Day to show (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show the timetable for a whole month
    Month {
        /// Month number (1-12), defaults to the current month
        #[arg(long)]
        month: Option<u32>,
        /// Year, defaults to the current year
        #[arg(long)]
        year: Option<i32>,
        #[command(flatten)]
        place: PlaceArgs,
    },
    /// List calculation methods
    Methods,
    /// List built-in locations usable with --place
    Locations,
    /// Show the config file path and effective settings
    Config {
        /// Write the default settings to the config file
        #[arg(long)]
        init: bool,
    },
}

/// Overrides for the configured location and calculation settings.
#[derive(Args, Debug, Default, Clone)]
pub struct PlaceArgs {
    /// Built-in location slug (see `waqt locations`), e.g. istanbul-turkey
    #[arg(long, value_parser = parse_place)]
    pub place: Option<SavedLocation>,
    /// Latitude in degrees (-90 to 90)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,
    /// Longitude in degrees (-180 to 180)
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,
    /// Calculation method id (see `waqt methods`)
    #[arg(long)]
    pub method: Option<u8>,
    /// Asr school: standard or hanafi
    #[arg(long)]
    pub school: Option<School>,
}

fn parse_place(value: &str) -> Result<SavedLocation, String> {
    SavedLocation::find_popular(value)
        .ok_or_else(|| format!("unknown location '{}', see `waqt locations`", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_with_overrides() {
        let cli = Cli::try_parse_from([
            "waqt", "--json", "today", "--lat", "-33.8688", "--lng", "151.2093", "--method", "3",
            "--school", "hanafi", "--date", "2024-06-01",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Some(Commands::Today { place, date }) => {
                assert_eq!(place.lat, Some(-33.8688));
                assert_eq!(place.method, Some(3));
                assert_eq!(place.school, Some(School::Hanafi));
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 1));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_month_defaults_are_empty() {
        let cli = Cli::try_parse_from(["waqt", "month", "--config", "/tmp/waqt.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/waqt.toml")));
        match cli.command {
            Some(Commands::Month { month, year, place }) => {
                assert!(month.is_none() && year.is_none());
                assert!(place.lat.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_place_slug() {
        let cli = Cli::try_parse_from(["waqt", "today", "--place", "cairo-egypt"]).unwrap();
        match cli.command {
            Some(Commands::Today { place, .. }) => {
                assert_eq!(place.place.unwrap().name, "Cairo");
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(Cli::try_parse_from(["waqt", "today", "--place", "atlantis"]).is_err());
        assert!(matches!(
            Cli::try_parse_from(["waqt", "locations"]).unwrap().command,
            Some(Commands::Locations)
        ));
    }

    #[test]
    fn test_rejects_bad_school() {
        assert!(Cli::try_parse_from(["waqt", "today", "--school", "jafari"]).is_err());
    }
}
