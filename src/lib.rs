//! # waqt
//!
//! Daily and monthly prayer schedules built on an Aladhan-compatible
//! timings provider.
//!
//! The provider supplies raw `HH:MM` times; this crate marks which prayer is
//! current and which is next (wrapping to tomorrow's Fajr after Isha),
//! converts times to 12-hour form, pairs Gregorian and Hijri dates for month
//! tables, and memoizes responses per location, method, school and day.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use waqt::models::{ScheduleQuery, School};
//! use waqt::prayer_times::PrayerTimesService;
//! use waqt::provider::{AladhanClient, DEFAULT_BASE_URL};
//!
//! # async fn run() -> Result<(), waqt::ScheduleError> {
//! let client = AladhanClient::new(DEFAULT_BASE_URL, Duration::from_secs(5))?;
//! let service = PrayerTimesService::new(client);
//! let mecca = ScheduleQuery::new(21.4225, 39.8262, 4, School::Standard);
//!
//! let today = service.resolve_today(&mecca).await?;
//! if let Some(next) = today.upcoming_prayer() {
//!     println!("{} at {}", next.name, next.formatted_time);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod prayer_times;
pub mod provider;
pub mod store;
pub mod utils;

pub use error::ScheduleError;
pub use prayer_times::{PrayerTimesService, aggregate, resolve};
pub use utils::format::format_12h;
