//! Response shapes of the timings/calendar provider.
//!
//! Only `timings`, `date` and `meta` are structural. Everything below them is
//! optional so a partially filled day still produces a best-effort record.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

use crate::error::{Result, ScheduleError};

/// `{code, status, data}` wrapper around every response, errors included.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub code: u16,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Envelope {
    /// Human-readable reason for a rejected request.
    pub fn message(&self) -> String {
        match &self.data {
            serde_json::Value::String(s) => s.clone(),
            _ => self.status.clone().unwrap_or_else(|| "no reason given".to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DayPayload {
    pub timings: HashMap<String, String>,
    pub date: DatePayload,
    pub meta: MetaPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatePayload {
    #[serde(default)]
    pub readable: Option<String>,
    #[serde(default)]
    pub gregorian: Option<GregorianPayload>,
    #[serde(default)]
    pub hijri: Option<HijriPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GregorianPayload {
    /// `DD-MM-YYYY`
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub weekday: Option<NamePayload>,
    #[serde(default)]
    pub month: Option<MonthPayload>,
}

impl GregorianPayload {
    pub fn parsed_date(&self) -> Result<NaiveDate> {
        let raw = self
            .date
            .as_deref()
            .ok_or_else(|| ScheduleError::malformed_payload("gregorian date is missing"))?;
        NaiveDate::parse_from_str(raw, "%d-%m-%Y")
            .map_err(|e| ScheduleError::malformed_payload(format!("gregorian date '{}': {}", raw, e)))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HijriPayload {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub day: Option<u32>,
    #[serde(default)]
    pub month: Option<MonthPayload>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub year: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamePayload {
    #[serde(default)]
    pub en: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthPayload {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub number: Option<u32>,
    #[serde(default)]
    pub en: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetaPayload {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub method: Option<MethodPayload>,
    #[serde(default)]
    pub school: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MethodPayload {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
}

/// The provider sends some numbers as strings (`"01"`, `"1445"`).
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Int(u64),
    Float(f64),
    Text(String),
}

fn lenient_u32<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        Some(Lenient::Int(n)) => u32::try_from(n).ok(),
        Some(Lenient::Float(f)) if f.fract() == 0.0 && f >= 0.0 => Some(f as u32),
        Some(Lenient::Text(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        Some(Lenient::Int(n)) => Some(n as f64),
        Some(Lenient::Float(f)) => Some(f),
        Some(Lenient::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

pub fn day_from_value(data: serde_json::Value) -> Result<DayPayload> {
    serde_json::from_value(data).map_err(|e| ScheduleError::malformed_payload(e.to_string()))
}

pub fn days_from_value(data: serde_json::Value) -> Result<Vec<DayPayload>> {
    serde_json::from_value(data).map_err(|e| ScheduleError::malformed_payload(e.to_string()))
}
