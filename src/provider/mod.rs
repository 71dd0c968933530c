//! Boundary to the upstream prayer-time provider.

pub mod client;
pub mod payload;

pub use client::{AladhanClient, DEFAULT_BASE_URL, ProviderGateway};
pub use payload::DayPayload;
