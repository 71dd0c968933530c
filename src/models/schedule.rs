use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{FormattedTiming, ResolvedPrayer};
use crate::prayer_times::resolver;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HijriDay {
    pub day: u32,
    pub month: u32,
    pub month_name: String,
    pub year: u32,
}

impl HijriDay {
    pub fn formatted(&self) -> String {
        format!("{} {} {}", self.day, self.month_name, self.year)
    }
}

/// One resolved day. Statuses are relative to the reference time it was
/// resolved against; `refreshed` re-resolves for a later time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub readable_date: Option<String>,
    pub gregorian_date: String,
    pub hijri: Option<HijriDay>,
    pub weekday: String,
    pub location: Location,
    pub calculation_method: Option<String>,
    pub school: Option<String>,
    pub prayers: Vec<ResolvedPrayer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supplementary: Vec<FormattedTiming>,
}

impl DaySchedule {
    /// The most recently started prayer, if any has started today.
    pub fn current_prayer(&self) -> Option<&ResolvedPrayer> {
        self.prayers.iter().find(|p| p.is_current)
    }

    pub fn upcoming_prayer(&self) -> Option<&ResolvedPrayer> {
        self.prayers.iter().find(|p| p.is_upcoming)
    }

    pub fn refreshed(&self, reference_minutes: u32) -> Result<DaySchedule> {
        let timings: Vec<_> = self.prayers.iter().map(ResolvedPrayer::timing).collect();
        Ok(DaySchedule {
            prayers: resolver::resolve(&timings, reference_minutes)?,
            ..self.clone()
        })
    }
}

/// A day row in a month table: the date pair and six formatted times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub gregorian_date: NaiveDate,
    pub hijri_date: Option<String>,
    pub gregorian_day: u32,
    pub gregorian_month: u32,
    pub hijri_day: Option<u32>,
    pub hijri_month: Option<u32>,
    pub weekday: String,
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSchedule {
    pub month: u32,
    pub gregorian_month: String,
    pub gregorian_year: i32,
    pub hijri_month: Option<String>,
    pub hijri_year: Option<u32>,
    pub days: Vec<DayRecord>,
}
