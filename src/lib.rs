mod cleaner;
mod client;
mod collections;
mod config;
mod error;
mod repository;
mod services;
mod types;
mod utils;

pub use error::ToulouseWeatherError;

pub use cleaner::RecordCleaner;
pub use client::error::OdsClientError;
pub use client::ods_client::{CatalogPage, DatasetField, DatasetInfo, OdsClient, RecordsPage};
pub use collections::hash_map::{HashEntry, HashMap};
pub use collections::linked_list::LinkedList;
pub use config::{
    base_url, CATALOG_HARD_LIMIT, CATALOG_PAGE_SIZE, DEFAULT_BASE_URL, HTTP_TIMEOUT,
    RECORDS_PAGE_SIZE,
};
pub use repository::{CacheInfo, CachedWeatherRepository, TtlCache, WeatherRepository, WeatherStore};
pub use services::forecast::mean_temperature;
pub use services::ingestion::WeatherIngestionService;
pub use types::station::Station;
pub use types::weather_record::WeatherRecord;
pub use types::JsonObject;
pub use utils::{norm, parse_datetime_any};
