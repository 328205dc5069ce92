//! Data source module.
//!
//! The core computation is fed by two CSV payloads; this module covers
//! getting them: Google Sheets export URLs, an HTTP client, a TTL
//! response cache with an explicit clear operation, and the config that
//! names the sheet.

mod cache;
mod config;
mod sheets;

pub use cache::ResponseCache;
pub use config::TrackerConfig;
pub use sheets::{SheetClient, SheetSource};
