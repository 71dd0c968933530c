use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Result, ScheduleError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ScheduleError::invalid_input(format!("Unknown theme: '{}'", s))),
        }
    }
}

/// Interface languages with translations available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
    Ar,
    Tr,
    Fr,
}

impl FromStr for Language {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ru" => Ok(Language::Ru),
            "ar" => Ok(Language::Ar),
            "tr" => Ok(Language::Tr),
            "fr" => Ok(Language::Fr),
            _ => Err(ScheduleError::invalid_input(format!("Unsupported language: '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLocation {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Stable slug, e.g. `mecca-saudi-arabia`.
    pub value: String,
}

/// `(name, country, latitude, longitude, value)` for the built-in picks.
const POPULAR_LOCATIONS: &[(&str, &str, f64, f64, &str)] = &[
    ("Mecca", "Saudi Arabia", 21.4225, 39.8262, "mecca-saudi-arabia"),
    ("Medina", "Saudi Arabia", 24.4672, 39.6150, "medina-saudi-arabia"),
    ("Moscow", "Russia", 55.7558, 37.6173, "moscow-russia"),
    ("Istanbul", "Turkey", 41.0082, 28.9784, "istanbul-turkey"),
    ("Cairo", "Egypt", 30.0444, 31.2357, "cairo-egypt"),
    ("Dubai", "UAE", 25.2048, 55.2708, "dubai-uae"),
];

impl SavedLocation {
    pub fn mecca() -> Self {
        Self::from_entry(POPULAR_LOCATIONS[0])
    }

    fn from_entry((name, country, latitude, longitude, value): (&str, &str, f64, f64, &str)) -> Self {
        Self {
            name: name.to_string(),
            country: country.to_string(),
            latitude,
            longitude,
            value: value.to_string(),
        }
    }

    /// Well-known cities offered before the user has chosen a location.
    pub fn popular() -> Vec<Self> {
        POPULAR_LOCATIONS.iter().copied().map(Self::from_entry).collect()
    }

    /// Look up a popular location by its slug, case-insensitively.
    pub fn find_popular(value: &str) -> Option<Self> {
        POPULAR_LOCATIONS
            .iter()
            .copied()
            .find(|entry| entry.4.eq_ignore_ascii_case(value.trim()))
            .map(Self::from_entry)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.value.trim().is_empty() {
            return Err(ScheduleError::invalid_input("Location name and value are required"));
        }
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ScheduleError::invalid_input(format!(
                "Location coordinates out of range: {}, {}",
                self.latitude, self.longitude
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub language: Language,
    pub location: SavedLocation,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            language: Language::default(),
            location: SavedLocation::mecca(),
        }
    }
}

/// A single-field change, applied atomically by a preference store.
#[derive(Debug, Clone, PartialEq)]
pub enum PreferenceUpdate {
    Theme(Theme),
    Language(Language),
    Location(SavedLocation),
}

impl PreferenceUpdate {
    pub fn validate(&self) -> Result<()> {
        match self {
            PreferenceUpdate::Location(location) => location.validate(),
            _ => Ok(()),
        }
    }

    pub fn apply(&self, prefs: &mut Preferences) {
        match self {
            PreferenceUpdate::Theme(theme) => prefs.theme = *theme,
            PreferenceUpdate::Language(language) => prefs.language = *language,
            PreferenceUpdate::Location(location) => prefs.location = location.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popular_locations() {
        let popular = SavedLocation::popular();
        assert_eq!(popular.len(), 6);
        assert_eq!(popular[0], SavedLocation::mecca());
        assert!(popular.iter().all(|loc| loc.validate().is_ok()));

        let istanbul = SavedLocation::find_popular("Istanbul-Turkey").unwrap();
        assert_eq!((istanbul.latitude, istanbul.longitude), (41.0082, 28.9784));
        assert!(SavedLocation::find_popular("atlantis").is_none());
    }

    #[test]
    fn test_defaults_match_mecca_light_english() {
        let prefs = Preferences::default();
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.language, Language::En);
        assert_eq!(prefs.location.value, "mecca-saudi-arabia");
    }

    #[test]
    fn test_location_validation() {
        assert!(SavedLocation::mecca().validate().is_ok());

        let nameless = SavedLocation { name: " ".into(), ..SavedLocation::mecca() };
        assert!(nameless.validate().is_err());

        let off_globe = SavedLocation { latitude: 120.0, ..SavedLocation::mecca() };
        assert!(off_globe.validate().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_value(Preferences::default()).unwrap();
        assert_eq!(json["theme"], "light");
        assert_eq!(json["language"], "en");
        assert_eq!("RU".parse::<Language>().unwrap(), Language::Ru);
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
    }
}
