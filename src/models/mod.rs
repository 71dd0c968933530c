pub mod preferences;
pub mod prayer;
pub mod query;
pub mod schedule;

pub use preferences::{Language, PreferenceUpdate, Preferences, SavedLocation, Theme};
pub use prayer::{FormattedTiming, PrayerName, PrayerTiming, ResolvedPrayer};
pub use query::{CALC_METHODS, ScheduleQuery, School, method_name};
pub use schedule::{DayRecord, DaySchedule, HijriDay, Location, MonthSchedule};
