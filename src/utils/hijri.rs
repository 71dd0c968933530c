use chrono::{Datelike, NaiveDate};
use hijri_date::HijriDate;

use crate::error::{Result, ScheduleError};
use crate::models::HijriDay;

/// Islamic month names in English (index 0 = Muharram = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

pub fn hijri_month_name(month: u32) -> &'static str {
    if (1..=12).contains(&month) {
        HIJRI_MONTH_NAMES[month as usize - 1]
    } else {
        "Unknown"
    }
}

/// Local Gregorian → Hijri conversion, used when the provider omits the Hijri block.
pub fn to_hijri(date: NaiveDate) -> Result<HijriDay> {
    let hd = HijriDate::from_gr(
        date.year() as usize,
        date.month() as usize,
        date.day() as usize,
    )
    .map_err(|e| ScheduleError::malformed_payload(format!("no Hijri date for {}: {}", date, e)))?;

    let month = hd.month() as u32;
    Ok(HijriDay {
        day: hd.day() as u32,
        month,
        month_name: hijri_month_name(month).to_string(),
        year: hd.year() as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_name_table() {
        assert_eq!(hijri_month_name(1), "Muharram");
        assert_eq!(hijri_month_name(9), "Ramadan");
        assert_eq!(hijri_month_name(12), "Dhu al-Hijjah");
        assert_eq!(hijri_month_name(0), "Unknown");
        assert_eq!(hijri_month_name(13), "Unknown");
    }

    #[test]
    fn test_to_hijri_known_date() {
        // 11 March 2024 was the first of Ramadan 1445 in the Umm al-Qura calendar.
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let hijri = to_hijri(date).unwrap();
        assert_eq!(hijri.year, 1445);
        assert!(hijri.month == 8 || hijri.month == 9);
        assert_eq!(hijri.month_name, hijri_month_name(hijri.month));
    }
}
