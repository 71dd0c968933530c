use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::path::Path;

use crate::cli::args::PlaceArgs;
use crate::config::AppConfig;
use crate::models::{CALC_METHODS, DaySchedule, MonthSchedule, ResolvedPrayer, SavedLocation, ScheduleQuery};
use crate::prayer_times::{Clock, PrayerTimesService};
use crate::provider::ProviderGateway;
use crate::utils::format::{format_duration_mins, format_time};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Command-line overrides on top of the configured location and method.
///
/// Explicit coordinates win over `--place`, which wins over the config file.
pub fn build_query(config: &AppConfig, place: &PlaceArgs) -> ScheduleQuery {
    let base = config.default_query();
    let (latitude, longitude) = match &place.place {
        Some(loc) => (loc.latitude, loc.longitude),
        None => (base.latitude, base.longitude),
    };
    ScheduleQuery {
        latitude: place.lat.unwrap_or(latitude),
        longitude: place.lng.unwrap_or(longitude),
        method: place.method.unwrap_or(base.method),
        school: place.school.unwrap_or(base.school),
    }
}

fn place_label(config: &AppConfig, place: &PlaceArgs) -> String {
    if place.lat.is_some() || place.lng.is_some() {
        let query = build_query(config, place);
        format!("{:.4}, {:.4}", query.latitude, query.longitude)
    } else if let Some(loc) = &place.place {
        format!("{}, {}", loc.name, loc.country)
    } else {
        format!("{}, {}", config.location.name, config.location.country)
    }
}

// ─── Today ───────────────────────────────────────────────────────────────────

pub async fn handle_today<P: ProviderGateway, C: Clock>(
    service: &PrayerTimesService<P, C>,
    config: &AppConfig,
    place: &PlaceArgs,
    date: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let query = build_query(config, place);
    let date = date.unwrap_or_else(|| service.clock().today());
    let schedule = service.resolve_daily(&query, date).await?;

    if json {
        return print_json(&schedule);
    }
    print_day(&schedule, &place_label(config, place), service.clock());
    Ok(())
}

fn print_day(schedule: &DaySchedule, label: &str, clock: &impl Clock) {
    println!();
    println_colored!(GOLD, "  Prayer Times for {} ({})", label, schedule.gregorian_date);
    let mut subtitle = schedule.weekday.clone();
    if let Some(hijri) = &schedule.hijri {
        subtitle.push_str(&format!(" · {}", hijri.formatted()));
    }
    println_colored!(DIM, "  {}", subtitle);
    println!();

    // Statuses are relative to the clock, so they only mean something for today.
    let is_today = schedule.date == clock.today();
    for prayer in &schedule.prayers {
        let (color, line) = prayer_row(prayer, is_today);
        println_colored!(color, "{}", line);
    }

    if !schedule.supplementary.is_empty() {
        println!();
        for extra in &schedule.supplementary {
            println_colored!(
                DIM,
                "  {:<10}  {}  {:>8}",
                extra.name.as_str(),
                extra.raw_time,
                extra.formatted_time
            );
        }
    }

    if is_today {
        if let Some(next) = schedule.upcoming_prayer() {
            println!();
            println_colored!(
                AMBER,
                "  Next: {} at {} in {} (now {})",
                next.name,
                next.formatted_time,
                format_duration_mins(next.remaining_minutes.unwrap_or(0)),
                format_time(clock.now().time())
            );
        }
    }
    println!();
}

fn prayer_row(prayer: &ResolvedPrayer, is_today: bool) -> (&'static str, String) {
    let line = format!(
        "  {:<10}  {}  {:>8}",
        prayer.name.as_str(),
        prayer.raw_time,
        prayer.formatted_time
    );
    match (is_today, prayer.is_current, prayer.is_upcoming) {
        (true, true, _) => (GREEN, format!("{}  ← now", line)),
        (true, _, true) => (BOLD, format!("{}  ← next", line)),
        (true, _, _) => (DIM, line),
        (false, _, _) => ("", line),
    }
}

// ─── Month ───────────────────────────────────────────────────────────────────

pub async fn handle_month<P: ProviderGateway, C: Clock>(
    service: &PrayerTimesService<P, C>,
    config: &AppConfig,
    place: &PlaceArgs,
    month: Option<u32>,
    year: Option<i32>,
    json: bool,
) -> Result<()> {
    let today = service.clock().today();
    let month = month.unwrap_or_else(|| today.month());
    let year = year.unwrap_or_else(|| today.year());
    let query = build_query(config, place);
    let schedule = service.resolve_monthly(&query, month, year).await?;

    if json {
        return print_json(&schedule);
    }
    print_month(&schedule, &place_label(config, place), today);
    Ok(())
}

fn print_month(schedule: &MonthSchedule, label: &str, today: NaiveDate) {
    println!();
    let hijri = match (&schedule.hijri_month, schedule.hijri_year) {
        (Some(name), Some(year)) => format!(" · {} {} AH", name, year),
        _ => String::new(),
    };
    println_colored!(
        GOLD,
        "  {} {}{} for {}",
        schedule.gregorian_month,
        schedule.gregorian_year,
        hijri,
        label
    );
    println!();
    println_colored!(
        BOLD,
        "  {:<4} {:<4} {:<6}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}",
        "Day",
        "Wkd",
        "Hijri",
        "Fajr",
        "Sunrise",
        "Dhuhr",
        "Asr",
        "Maghrib",
        "Isha"
    );

    for day in &schedule.days {
        let hijri = match (day.hijri_day, day.hijri_month) {
            (Some(d), Some(m)) => format!("{}/{}", d, m),
            _ => "-".to_string(),
        };
        let weekday: String = day.weekday.chars().take(3).collect();
        let line = format!(
            "  {:<4} {:<4} {:<6}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}",
            day.gregorian_day,
            weekday,
            hijri,
            day.fajr,
            day.sunrise,
            day.dhuhr,
            day.asr,
            day.maghrib,
            day.isha
        );
        if day.gregorian_date == today {
            println_colored!(AMBER, "{}", line);
        } else {
            println!("{}", line);
        }
    }
    println!();
}

// ─── Methods ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct MethodRow {
    id: u8,
    name: &'static str,
}

pub fn handle_methods(config: &AppConfig, json: bool) -> Result<()> {
    if json {
        let rows: Vec<_> = CALC_METHODS
            .iter()
            .map(|&(id, name)| MethodRow { id, name })
            .collect();
        return print_json(&rows);
    }

    println!();
    println_colored!(GOLD, "  Calculation methods");
    println!();
    for &(id, name) in CALC_METHODS {
        if id == config.provider.method {
            println_colored!(GREEN, "  {:>3}  {}  (configured)", id, name);
        } else {
            println!("  {:>3}  {}", id, name);
        }
    }
    println!();
    Ok(())
}

// ─── Locations ───────────────────────────────────────────────────────────────

pub fn handle_locations(config: &AppConfig, json: bool) -> Result<()> {
    let popular = SavedLocation::popular();
    if json {
        return print_json(&popular);
    }

    println!();
    println_colored!(GOLD, "  Locations");
    println!();
    for loc in &popular {
        let line = format!(
            "  {:<20}  {:<24}  {:>8.4}, {:>8.4}",
            loc.value,
            format!("{}, {}", loc.name, loc.country),
            loc.latitude,
            loc.longitude
        );
        if loc.latitude == config.location.latitude && loc.longitude == config.location.longitude {
            println_colored!(GREEN, "{}  (configured)", line);
        } else {
            println!("{}", line);
        }
    }
    println!();
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, path: &Path, init: bool, json: bool) -> Result<()> {
    if init {
        if path.exists() {
            println_colored!(AMBER, "  Config already exists at {}", path.display());
            return Ok(());
        }
        AppConfig::default()
            .save_to(path)
            .with_context(|| format!("Writing defaults to {:?}", path))?;
        println_colored!(GREEN, "  ✓ Wrote default config to {}", path.display());
        return Ok(());
    }

    if json {
        return print_json(config);
    }
    println_colored!(DIM, "  # {}", path.display());
    print!("{}", toml::to_string_pretty(config).context("Serializing config")?);
    Ok(())
}
