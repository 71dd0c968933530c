//! Process-lifetime state shared between requests.

pub mod cache;
pub mod preferences;

pub use cache::{CacheEntry, ResponseCache};
pub use preferences::{InMemoryPreferenceStore, PreferenceStore};
