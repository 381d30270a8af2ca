//! Earth orientation parameters
//!
//! Polar motion and UT1-UTC samples for the high-precision frame service,
//! with CelesTrak CSV parsing, a JSON disk cache, and optional download.

pub mod cache;
#[cfg(feature = "fetch")]
pub mod fetcher;
pub mod parser;
pub mod types;

pub use cache::{CachedEop, EopCache};
#[cfg(feature = "fetch")]
pub use fetcher::{fetch_eop, fetch_eop_blocking, load_or_refresh};
pub use parser::parse_celestrak_csv;
pub use types::{EopParameters, EopRecord, EopTable};

use crate::config::EopConfig;

/// EOP table for `config.source_url`.
///
/// With the `fetch` feature this is [`load_or_refresh`]. Without it only an
/// existing cache entry (fresh or stale) is used.
pub fn load_configured(config: &EopConfig, cache: &EopCache) -> anyhow::Result<Option<EopTable>> {
    #[cfg(feature = "fetch")]
    {
        load_or_refresh(cache, &config.source_url).map(Some)
    }
    #[cfg(not(feature = "fetch"))]
    {
        cache.table_for(&config.source_url)
    }
}

/// Full EOP history published by CelesTrak
pub const CELESTRAK_EOP_URL: &str = "https://celestrak.org/SpaceData/EOP-All.csv";
