//! Configurable constants: endpoint, timeout and pagination limits.

use std::time::Duration;

/// Explore v2.1 endpoint of the Toulouse Métropole open-data portal.
pub const DEFAULT_BASE_URL: &str = "https://data.toulouse-metropole.fr/api/explore/v2.1";

/// Per-request timeout.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(20);

/// Page size when walking the dataset catalog. The portal caps pages at 100.
pub const CATALOG_PAGE_SIZE: usize = 100;

/// Upper bound on catalog rows fetched in one walk.
pub const CATALOG_HARD_LIMIT: usize = 10_000;

/// Page size when fetching dataset records.
pub const RECORDS_PAGE_SIZE: usize = 100;

pub const USER_AGENT: &str = concat!("toulouse_weather/", env!("CARGO_PKG_VERSION"));

/// Base URL to use, honoring the `ODS_BASE_URL` environment override.
pub fn base_url() -> String {
    std::env::var("ODS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}
