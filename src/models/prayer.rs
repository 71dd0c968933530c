use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Result, ScheduleError};
use crate::utils::format::{minutes_of_day, parse_clock};

/// Every timing the provider reports. Only the canonical six are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrayerName {
    Imsak,
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Sunset,
    Maghrib,
    Isha,
    Midnight,
}

impl PrayerName {
    /// The six entries of a day schedule, in day order.
    pub fn canonical() -> [PrayerName; 6] {
        [
            PrayerName::Fajr,
            PrayerName::Sunrise,
            PrayerName::Dhuhr,
            PrayerName::Asr,
            PrayerName::Maghrib,
            PrayerName::Isha,
        ]
    }

    pub fn supplementary() -> [PrayerName; 3] {
        [PrayerName::Imsak, PrayerName::Sunset, PrayerName::Midnight]
    }

    /// Key used in the provider's `timings` object.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerName::Imsak => "Imsak",
            PrayerName::Fajr => "Fajr",
            PrayerName::Sunrise => "Sunrise",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Sunset => "Sunset",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
            PrayerName::Midnight => "Midnight",
        }
    }
}

impl std::fmt::Display for PrayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PrayerName {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "imsak" => Ok(PrayerName::Imsak),
            "fajr" => Ok(PrayerName::Fajr),
            "sunrise" => Ok(PrayerName::Sunrise),
            "dhuhr" | "zuhr" | "dhuhur" => Ok(PrayerName::Dhuhr),
            "asr" => Ok(PrayerName::Asr),
            "sunset" => Ok(PrayerName::Sunset),
            "maghrib" => Ok(PrayerName::Maghrib),
            "isha" => Ok(PrayerName::Isha),
            "midnight" => Ok(PrayerName::Midnight),
            _ => Err(ScheduleError::invalid_input(format!("Unknown prayer: {}", s))),
        }
    }
}

/// A prayer name paired with the provider's raw 24-hour time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTiming {
    pub name: PrayerName,
    pub raw_time: String,
}

impl PrayerTiming {
    pub fn new(name: PrayerName, raw_time: impl Into<String>) -> Self {
        Self {
            name,
            raw_time: raw_time.into(),
        }
    }

    pub fn time(&self) -> Result<NaiveTime> {
        parse_clock(&self.raw_time).ok_or_else(|| {
            ScheduleError::MalformedTiming(format!("{} has unreadable time '{}'", self.name, self.raw_time))
        })
    }

    pub fn minutes(&self) -> Result<u32> {
        self.time().map(minutes_of_day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPrayer {
    pub name: PrayerName,
    pub raw_time: String,
    pub formatted_time: String,
    pub time_in_minutes: u32,
    pub is_current: bool,
    pub is_upcoming: bool,
    /// Set only on the upcoming entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_minutes: Option<u32>,
}

impl ResolvedPrayer {
    pub fn timing(&self) -> PrayerTiming {
        PrayerTiming::new(self.name, self.raw_time.clone())
    }
}

/// Supplementary timing that is formatted but takes no part in resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTiming {
    pub name: PrayerName,
    pub raw_time: String,
    pub formatted_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prayer_name_aliases() {
        assert_eq!("Dhuhr".parse::<PrayerName>().unwrap(), PrayerName::Dhuhr);
        assert_eq!("zuhr".parse::<PrayerName>().unwrap(), PrayerName::Dhuhr);
        assert_eq!("ISHA".parse::<PrayerName>().unwrap(), PrayerName::Isha);
        assert!("tahajjud".parse::<PrayerName>().is_err());
    }

    #[test]
    fn test_canonical_order() {
        let names: Vec<&str> = PrayerName::canonical().iter().map(|p| p.as_str()).collect();
        assert_eq!(names, ["Fajr", "Sunrise", "Dhuhr", "Asr", "Maghrib", "Isha"]);
    }

    #[test]
    fn test_timing_minutes() {
        let asr = PrayerTiming::new(PrayerName::Asr, "15:20 (+03)");
        assert_eq!(asr.minutes().unwrap(), 920);

        let broken = PrayerTiming::new(PrayerName::Asr, "3pm");
        assert!(matches!(broken.minutes(), Err(ScheduleError::MalformedTiming(_))));
    }

    #[test]
    fn test_resolved_prayer_serializes_camel_case() {
        let p = ResolvedPrayer {
            name: PrayerName::Asr,
            raw_time: "15:20".into(),
            formatted_time: "3:20 PM".into(),
            time_in_minutes: 920,
            is_current: false,
            is_upcoming: true,
            remaining_minutes: Some(140),
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["timeInMinutes"], 920);
        assert_eq!(json["isUpcoming"], true);
        assert_eq!(json["remainingMinutes"], 140);
    }
}
