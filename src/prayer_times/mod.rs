pub mod clock;
pub mod daily;
pub mod monthly;
pub mod resolver;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use monthly::aggregate;
pub use resolver::resolve;
pub use service::PrayerTimesService;
