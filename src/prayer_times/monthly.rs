use chrono::Datelike;

use crate::error::{Result, ScheduleError};
use crate::models::{DayRecord, MonthSchedule};
use crate::prayer_times::daily::{hijri_day, weekday_name};
use crate::provider::payload::DayPayload;
use crate::utils::format::format_12h;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn gregorian_month_name(month: u32) -> Result<&'static str> {
    match month {
        1..=12 => Ok(MONTH_NAMES[month as usize - 1]),
        _ => Err(ScheduleError::InvalidMonth(month)),
    }
}

pub fn validate_month(month: u32, year: i32) -> Result<()> {
    gregorian_month_name(month)?;
    validate_year(year)
}

pub fn validate_year(year: i32) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(ScheduleError::invalid_input(format!(
            "Year {} must be between {} and {}",
            year, MIN_YEAR, MAX_YEAR
        )));
    }
    Ok(())
}

/// Turn a month of provider days into a month table.
///
/// Days keep the provider's order; the Hijri month and year of the whole
/// table come from the first day.
pub fn aggregate(days: &[DayPayload], month: u32, year: i32) -> Result<MonthSchedule> {
    validate_month(month, year)?;
    let gregorian_month = gregorian_month_name(month)?;
    if days.is_empty() {
        return Err(ScheduleError::EmptyMonth { month, year });
    }

    let mut records = Vec::with_capacity(days.len());
    let mut hijri_summary = None;
    for (idx, day) in days.iter().enumerate() {
        let gregorian = day.date.gregorian.as_ref().ok_or_else(|| {
            ScheduleError::malformed_payload(format!("day {} of {:02}/{} has no gregorian date", idx + 1, month, year))
        })?;
        let date = gregorian.parsed_date()?;
        let hijri = hijri_day(day.date.hijri.as_ref(), date);
        if idx == 0 {
            hijri_summary = hijri.as_ref().map(|h| (h.month_name.clone(), h.year));
        }

        let slot = |key: &str| day.timings.get(key).map(|raw| format_12h(raw)).unwrap_or_default();
        records.push(DayRecord {
            gregorian_date: date,
            hijri_date: day
                .date
                .hijri
                .as_ref()
                .and_then(|h| h.date.clone())
                .or_else(|| hijri.as_ref().map(|h| format!("{:02}-{:02}-{}", h.day, h.month, h.year))),
            gregorian_day: date.day(),
            gregorian_month: date.month(),
            hijri_day: hijri.as_ref().map(|h| h.day),
            hijri_month: hijri.as_ref().map(|h| h.month),
            weekday: weekday_name(Some(gregorian), date),
            fajr: slot("Fajr"),
            sunrise: slot("Sunrise"),
            dhuhr: slot("Dhuhr"),
            asr: slot("Asr"),
            maghrib: slot("Maghrib"),
            isha: slot("Isha"),
        });
    }

    let (hijri_month, hijri_year) = match hijri_summary {
        Some((name, year)) => (Some(name), Some(year)),
        None => (None, None),
    };
    Ok(MonthSchedule {
        month,
        gregorian_month: gregorian_month.to_string(),
        gregorian_year: year,
        hijri_month,
        hijri_year,
        days: records,
    })
}
