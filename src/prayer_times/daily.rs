use chrono::NaiveDate;
use log::warn;

use crate::error::{Result, ScheduleError};
use crate::models::{
    DaySchedule, FormattedTiming, HijriDay, Location, PrayerName, PrayerTiming, ScheduleQuery,
};
use crate::prayer_times::resolver;
use crate::provider::payload::{DayPayload, GregorianPayload, HijriPayload};
use crate::utils::format::format_12h;
use crate::utils::hijri;

/// Build a day schedule from one provider day, resolved against `reference_minutes`.
///
/// `requested` is used when the payload carries no usable Gregorian date.
pub fn build_day_schedule(
    payload: &DayPayload,
    query: &ScheduleQuery,
    requested: NaiveDate,
    reference_minutes: u32,
) -> Result<DaySchedule> {
    let date = match payload.date.gregorian.as_ref().map(GregorianPayload::parsed_date) {
        Some(Ok(date)) => date,
        Some(Err(e)) => return Err(e),
        None => requested,
    };

    let timings: Vec<PrayerTiming> = PrayerName::canonical()
        .into_iter()
        .filter_map(|name| {
            let raw = payload.timings.get(name.as_str());
            if raw.is_none() {
                warn!("Provider omitted {} for {}", name, date);
            }
            raw.map(|raw| PrayerTiming::new(name, raw.clone()))
        })
        .collect();
    if timings.is_empty() {
        return Err(ScheduleError::MalformedTiming(format!(
            "no canonical prayer timings for {}",
            date
        )));
    }

    let supplementary = PrayerName::supplementary()
        .into_iter()
        .filter_map(|name| {
            payload.timings.get(name.as_str()).map(|raw| FormattedTiming {
                name,
                raw_time: raw.clone(),
                formatted_time: format_12h(raw),
            })
        })
        .collect();

    let meta = &payload.meta;
    Ok(DaySchedule {
        date,
        readable_date: payload.date.readable.clone(),
        gregorian_date: date.format("%-d %B %Y").to_string(),
        hijri: hijri_day(payload.date.hijri.as_ref(), date),
        weekday: weekday_name(payload.date.gregorian.as_ref(), date),
        location: Location {
            latitude: meta.latitude.unwrap_or(query.latitude),
            longitude: meta.longitude.unwrap_or(query.longitude),
            timezone: meta.timezone.clone(),
        },
        calculation_method: meta.method.as_ref().and_then(|m| m.name.clone()),
        school: meta.school.clone(),
        prayers: resolver::resolve(&timings, reference_minutes)?,
        supplementary,
    })
}

/// The provider's Hijri date when complete, otherwise a locally computed one.
pub(crate) fn hijri_day(payload: Option<&HijriPayload>, date: NaiveDate) -> Option<HijriDay> {
    let from_payload = payload.and_then(|h| {
        let month = h.month.as_ref()?;
        let number = month.number?;
        Some(HijriDay {
            day: h.day?,
            month: number,
            month_name: month
                .en
                .clone()
                .unwrap_or_else(|| hijri::hijri_month_name(number).to_string()),
            year: h.year?,
        })
    });
    if from_payload.is_some() {
        return from_payload;
    }

    warn!("Provider Hijri date missing for {}, computing locally", date);
    match hijri::to_hijri(date) {
        Ok(day) => Some(day),
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}

pub(crate) fn weekday_name(payload: Option<&GregorianPayload>, date: NaiveDate) -> String {
    payload
        .and_then(|g| g.weekday.as_ref())
        .and_then(|w| w.en.clone())
        .unwrap_or_else(|| date.format("%A").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::School;
    use crate::provider::payload::day_from_value;
    use serde_json::json;

    fn query() -> ScheduleQuery {
        ScheduleQuery::new(21.4225, 39.8262, 4, School::Standard)
    }

    fn requested() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn full_payload() -> DayPayload {
        day_from_value(json!({
            "timings": {
                "Fajr": "05:12", "Sunrise": "06:30", "Dhuhr": "12:05", "Asr": "15:20",
                "Sunset": "18:38", "Maghrib": "18:40", "Isha": "20:00",
                "Imsak": "05:02", "Midnight": "00:26", "Firstthird": "22:30"
            },
            "date": {
                "readable": "01 Jun 2024",
                "gregorian": { "date": "01-06-2024", "weekday": { "en": "Saturday" } },
                "hijri": { "date": "24-11-1445", "day": "24", "month": { "number": 11, "en": "Dhū al-Qaʿdah" }, "year": "1445" }
            },
            "meta": {
                "latitude": 21.4225, "longitude": 39.8262, "timezone": "Asia/Riyadh",
                "method": { "id": 4, "name": "Umm Al-Qura University, Makkah" },
                "school": "STANDARD"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_full_day() {
        let schedule = build_day_schedule(&full_payload(), &query(), requested(), 780).unwrap();

        assert_eq!(schedule.date, requested());
        assert_eq!(schedule.gregorian_date, "1 June 2024");
        assert_eq!(schedule.weekday, "Saturday");
        assert_eq!(schedule.hijri.as_ref().unwrap().formatted(), "24 Dhū al-Qaʿdah 1445");
        assert_eq!(schedule.location.timezone.as_deref(), Some("Asia/Riyadh"));
        assert_eq!(schedule.calculation_method.as_deref(), Some("Umm Al-Qura University, Makkah"));
        assert_eq!(schedule.prayers.len(), 6);
        assert_eq!(schedule.current_prayer().unwrap().name, PrayerName::Dhuhr);
        assert_eq!(schedule.upcoming_prayer().unwrap().name, PrayerName::Asr);

        let supplementary: Vec<_> = schedule.supplementary.iter().map(|t| t.name).collect();
        assert_eq!(supplementary, [PrayerName::Imsak, PrayerName::Sunset, PrayerName::Midnight]);
        assert_eq!(schedule.supplementary[2].formatted_time, "12:26 AM");
    }

    #[test]
    fn test_degrades_when_optional_parts_missing() {
        let payload = day_from_value(json!({
            "timings": { "Fajr": "05:12", "Dhuhr": "12:05", "Isha": "20:00" },
            "date": { "gregorian": { "date": "01-06-2024" } },
            "meta": {}
        }))
        .unwrap();

        let schedule = build_day_schedule(&payload, &query(), requested(), 600).unwrap();
        assert_eq!(schedule.prayers.len(), 3);
        assert_eq!(schedule.weekday, "Saturday");
        assert_eq!(schedule.location.latitude, 21.4225);
        assert!(schedule.hijri.is_some());
        assert!(schedule.calculation_method.is_none());
    }

    #[test]
    fn test_no_canonical_timings_fails() {
        let payload = day_from_value(json!({
            "timings": { "Imsak": "05:02" },
            "date": {},
            "meta": {}
        }))
        .unwrap();
        let result = build_day_schedule(&payload, &query(), requested(), 600);
        assert!(matches!(result, Err(ScheduleError::MalformedTiming(_))));
    }

    #[test]
    fn test_unreadable_gregorian_date_fails() {
        let payload = day_from_value(json!({
            "timings": { "Fajr": "05:12" },
            "date": { "gregorian": { "date": "2024/06/01" } },
            "meta": {}
        }))
        .unwrap();
        let result = build_day_schedule(&payload, &query(), requested(), 600);
        assert!(matches!(result, Err(ScheduleError::MalformedUpstreamPayload(_))));
    }

    #[test]
    fn test_refreshed_moves_statuses() {
        let schedule = build_day_schedule(&full_payload(), &query(), requested(), 780).unwrap();
        let evening = schedule.refreshed(21 * 60).unwrap();

        assert_eq!(evening.current_prayer().unwrap().name, PrayerName::Isha);
        assert_eq!(evening.upcoming_prayer().unwrap().name, PrayerName::Fajr);
        assert_eq!(evening.date, schedule.date);
    }
}
