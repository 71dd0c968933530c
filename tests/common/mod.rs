#![allow(dead_code)]

use chrono::{Datelike, NaiveDate};
use serde_json::{Value, json};
use std::time::Duration;
use waqt::models::{ScheduleQuery, School};
use waqt::prayer_times::{FixedClock, PrayerTimesService};
use waqt::provider::AladhanClient;

pub fn mecca() -> ScheduleQuery {
    ScheduleQuery::new(21.4225, 39.8262, 4, School::Standard)
}

pub fn clock_at(date: NaiveDate, hour: u32, minute: u32) -> FixedClock {
    FixedClock(date.and_hms_opt(hour, minute, 0).unwrap())
}

pub fn service(
    base_url: &str,
    timeout: Duration,
    clock: FixedClock,
) -> PrayerTimesService<AladhanClient, FixedClock> {
    let client = AladhanClient::new(base_url, timeout).unwrap();
    PrayerTimesService::with_clock(client, clock, 16)
}

/// One provider day the way `/timings` and `/calendar` report it.
pub fn day_json(date: NaiveDate) -> Value {
    json!({
        "timings": {
            "Fajr": "04:12 (+03)",
            "Sunrise": "05:39 (+03)",
            "Dhuhr": "12:18 (+03)",
            "Asr": "15:38 (+03)",
            "Sunset": "18:57 (+03)",
            "Maghrib": "18:57 (+03)",
            "Isha": "20:27 (+03)",
            "Imsak": "04:02 (+03)",
            "Midnight": "00:18 (+03)"
        },
        "date": {
            "readable": date.format("%d %b %Y").to_string(),
            "gregorian": {
                "date": date.format("%d-%m-%Y").to_string(),
                "weekday": { "en": date.format("%A").to_string() },
                "month": { "number": date.month(), "en": date.format("%B").to_string() }
            },
            "hijri": {
                "date": "24-11-1445",
                "day": "24",
                "month": { "number": 11, "en": "Dhū al-Qaʿdah" },
                "year": "1445"
            }
        },
        "meta": {
            "latitude": 21.4225,
            "longitude": 39.8262,
            "timezone": "Asia/Riyadh",
            "method": { "id": 4, "name": "Umm Al-Qura University, Makkah" },
            "school": "STANDARD"
        }
    })
}

pub fn ok_envelope(data: Value) -> Value {
    json!({ "code": 200, "status": "OK", "data": data })
}
