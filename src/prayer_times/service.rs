use chrono::{Datelike, NaiveDate};
use log::info;

use crate::error::{Result, ScheduleError};
use crate::models::{DaySchedule, MonthSchedule, ScheduleQuery};
use crate::prayer_times::clock::{Clock, SystemClock};
use crate::prayer_times::{daily, monthly};
use crate::provider::ProviderGateway;
use crate::store::ResponseCache;
use crate::store::cache::DEFAULT_CAPACITY;

/// Daily and monthly schedules on top of a provider, memoized per location,
/// method, school and date.
pub struct PrayerTimesService<P, C = SystemClock> {
    provider: P,
    clock: C,
    daily: ResponseCache<DaySchedule>,
    monthly: ResponseCache<MonthSchedule>,
}

impl<P: ProviderGateway> PrayerTimesService<P, SystemClock> {
    pub fn new(provider: P) -> Self {
        Self::with_clock(provider, SystemClock, DEFAULT_CAPACITY)
    }
}

impl<P: ProviderGateway, C: Clock> PrayerTimesService<P, C> {
    pub fn with_clock(provider: P, clock: C, cache_capacity: usize) -> Self {
        Self {
            provider,
            clock,
            daily: ResponseCache::new(cache_capacity),
            monthly: ResponseCache::new(cache_capacity),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn daily_cache(&self) -> &ResponseCache<DaySchedule> {
        &self.daily
    }

    pub fn monthly_cache(&self) -> &ResponseCache<MonthSchedule> {
        &self.monthly
    }

    /// Schedule for `date` with current/upcoming marked against the clock.
    ///
    /// Cached schedules are re-resolved on every call, so a hit never serves
    /// the statuses of the time it was first fetched.
    pub async fn resolve_daily(&self, query: &ScheduleQuery, date: NaiveDate) -> Result<DaySchedule> {
        query.validate()?;
        monthly::validate_year(date.year())?;
        let key = query.daily_key(date);

        let schedule = self
            .daily
            .get_or_try_insert_with(&key, || async {
                let payload = self.provider.fetch_day(query, date).await?;
                let schedule =
                    daily::build_day_schedule(&payload, query, date, self.clock.minutes_now())?;
                info!("Resolved {} prayers for {} ({})", schedule.prayers.len(), date, key);
                Ok::<_, ScheduleError>(schedule)
            })
            .await?;

        schedule.refreshed(self.clock.minutes_now())
    }

    pub async fn resolve_today(&self, query: &ScheduleQuery) -> Result<DaySchedule> {
        self.resolve_daily(query, self.clock.today()).await
    }

    pub async fn resolve_monthly(&self, query: &ScheduleQuery, month: u32, year: i32) -> Result<MonthSchedule> {
        query.validate()?;
        monthly::validate_month(month, year)?;
        let key = query.monthly_key(month, year);

        self.monthly
            .get_or_try_insert_with(&key, || async {
                let days = self.provider.fetch_month(query, month, year).await?;
                let schedule = monthly::aggregate(&days, month, year)?;
                info!("Aggregated {} days for {:02}/{} ({})", schedule.days.len(), month, year, key);
                Ok::<_, ScheduleError>(schedule)
            })
            .await
    }
}
