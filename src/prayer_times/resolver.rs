use crate::error::{Result, ScheduleError};
use crate::models::{PrayerTiming, ResolvedPrayer};
use crate::utils::format::{MINUTES_PER_DAY, format_12h};

/// Mark the current and upcoming prayer relative to `reference_minutes`
/// (minutes since local midnight).
///
/// - `is_current` is set on the most recently started prayer only; before
///   the first prayer of the day nothing is current.
/// - `is_upcoming` is set on exactly one entry: the first, in list order,
///   that starts after the reference. When every prayer has already started,
///   the first entry stands in for tomorrow's occurrence and its remaining
///   time runs across midnight.
///
/// Output order is input order.
pub fn resolve(prayers: &[PrayerTiming], reference_minutes: u32) -> Result<Vec<ResolvedPrayer>> {
    if prayers.is_empty() {
        return Err(ScheduleError::MalformedTiming("no prayers to resolve".to_string()));
    }
    if reference_minutes >= MINUTES_PER_DAY {
        return Err(ScheduleError::invalid_input(format!(
            "Reference time {} is outside the day (0-{})",
            reference_minutes,
            MINUTES_PER_DAY - 1
        )));
    }

    let minutes = prayers
        .iter()
        .map(PrayerTiming::minutes)
        .collect::<Result<Vec<u32>>>()?;

    let (upcoming, remaining) = match minutes.iter().position(|&m| m > reference_minutes) {
        Some(idx) => (idx, minutes[idx] - reference_minutes),
        None => (0, MINUTES_PER_DAY - reference_minutes + minutes[0]),
    };

    // Later entries win ties so two prayers sharing a minute resolve to the later name.
    let current = minutes
        .iter()
        .enumerate()
        .filter(|&(_, &m)| m <= reference_minutes)
        .max_by_key(|&(idx, &m)| (m, idx))
        .map(|(idx, _)| idx);

    Ok(prayers
        .iter()
        .zip(minutes)
        .enumerate()
        .map(|(idx, (prayer, time_in_minutes))| ResolvedPrayer {
            name: prayer.name,
            raw_time: prayer.raw_time.clone(),
            formatted_time: format_12h(&prayer.raw_time),
            time_in_minutes,
            is_current: current == Some(idx),
            is_upcoming: idx == upcoming,
            remaining_minutes: (idx == upcoming).then_some(remaining),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrayerName;

    fn day() -> Vec<PrayerTiming> {
        vec![
            PrayerTiming::new(PrayerName::Fajr, "05:12"),
            PrayerTiming::new(PrayerName::Sunrise, "06:30"),
            PrayerTiming::new(PrayerName::Dhuhr, "12:05"),
            PrayerTiming::new(PrayerName::Asr, "15:20"),
            PrayerTiming::new(PrayerName::Maghrib, "18:40"),
            PrayerTiming::new(PrayerName::Isha, "20:00"),
        ]
    }

    fn upcoming(resolved: &[ResolvedPrayer]) -> Vec<PrayerName> {
        resolved.iter().filter(|p| p.is_upcoming).map(|p| p.name).collect()
    }

    fn current(resolved: &[ResolvedPrayer]) -> Vec<PrayerName> {
        resolved.iter().filter(|p| p.is_current).map(|p| p.name).collect()
    }

    #[test]
    fn test_midday_marks_dhuhr_current_and_asr_upcoming() {
        let resolved = resolve(&day(), 13 * 60).unwrap();

        assert_eq!(current(&resolved), [PrayerName::Dhuhr]);
        assert_eq!(upcoming(&resolved), [PrayerName::Asr]);
        let asr = &resolved[3];
        assert_eq!(asr.remaining_minutes, Some(140));
        assert_eq!(asr.formatted_time, "3:20 PM");
        assert_eq!(asr.time_in_minutes, 920);
    }

    #[test]
    fn test_before_first_prayer() {
        let resolved = resolve(&day(), 4 * 60).unwrap();

        assert!(current(&resolved).is_empty());
        assert_eq!(upcoming(&resolved), [PrayerName::Fajr]);
        assert_eq!(resolved[0].remaining_minutes, Some(72));
    }

    #[test]
    fn test_after_last_prayer_wraps_to_tomorrow() {
        let resolved = resolve(&day(), 23 * 60 + 50).unwrap();

        assert_eq!(current(&resolved), [PrayerName::Isha]);
        assert_eq!(upcoming(&resolved), [PrayerName::Fajr]);
        // 10 minutes to midnight + 5:12 into tomorrow.
        assert_eq!(resolved[0].remaining_minutes, Some(10 + 312));
    }

    #[test]
    fn test_prayer_starting_exactly_now_is_current() {
        let resolved = resolve(&day(), 12 * 60 + 5).unwrap();

        assert_eq!(current(&resolved), [PrayerName::Dhuhr]);
        assert_eq!(upcoming(&resolved), [PrayerName::Asr]);
    }

    #[test]
    fn test_only_upcoming_carries_remaining_time() {
        let resolved = resolve(&day(), 600).unwrap();
        let with_remaining: Vec<_> = resolved.iter().filter(|p| p.remaining_minutes.is_some()).collect();
        assert_eq!(with_remaining.len(), 1);
        assert!(with_remaining[0].is_upcoming);
    }

    #[test]
    fn test_preserves_input_order() {
        let resolved = resolve(&day(), 0).unwrap();
        let names: Vec<_> = resolved.iter().map(|p| p.name).collect();
        assert_eq!(names, PrayerName::canonical());
    }

    #[test]
    fn test_empty_list_is_rejected() {
        assert!(matches!(resolve(&[], 600), Err(ScheduleError::MalformedTiming(_))));
    }

    #[test]
    fn test_unparseable_time_is_rejected() {
        let mut prayers = day();
        prayers[2] = PrayerTiming::new(PrayerName::Dhuhr, "noon");
        assert!(matches!(resolve(&prayers, 600), Err(ScheduleError::MalformedTiming(_))));

        prayers[2] = PrayerTiming::new(PrayerName::Dhuhr, "12:75");
        assert!(resolve(&prayers, 600).is_err());
    }

    #[test]
    fn test_reference_outside_day_is_rejected() {
        assert!(matches!(resolve(&day(), 1440), Err(ScheduleError::InvalidInput(_))));
    }

    #[test]
    fn test_single_prayer_day() {
        let prayers = vec![PrayerTiming::new(PrayerName::Fajr, "05:00")];

        let before = resolve(&prayers, 0).unwrap();
        assert!(before[0].is_upcoming && !before[0].is_current);

        let after = resolve(&prayers, 600).unwrap();
        assert!(after[0].is_upcoming && after[0].is_current);
        assert_eq!(after[0].remaining_minutes, Some(1440 - 600 + 300));
    }
}
