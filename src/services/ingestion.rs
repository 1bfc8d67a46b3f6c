//! Orchestrates loading observations from the portal into a repository.

use log::{debug, warn};

use crate::cleaner::RecordCleaner;
use crate::client::error::OdsClientError;
use crate::client::ods_client::OdsClient;
use crate::error::ToulouseWeatherError;
use crate::repository::{CachedWeatherRepository, WeatherStore};
use crate::types::Station;
use crate::utils::norm;

/// Pulls the newest rows of a station's dataset, cleans them and appends
/// them to a store.
pub struct WeatherIngestionService {
    client: OdsClient,
    cleaner: RecordCleaner,
}

impl WeatherIngestionService {
    /// Date fields tried first when deciding how to sort a dataset.
    const PREFERRED_DATE_FIELDS: &'static [&'static str] = &[
        "date_observation",
        "date_mesure",
        "date",
        "datetime",
        "timestamp",
        "time",
        "heure",
    ];

    pub fn new(client: OdsClient) -> Self {
        Self {
            client,
            cleaner: RecordCleaner::new(),
        }
    }

    /// Picks the field to order observations by: a preferred name when the
    /// dataset declares one, otherwise its first date or datetime typed
    /// field.
    async fn find_first_date_field(
        &self,
        dataset_id: &str,
    ) -> Result<Option<String>, OdsClientError> {
        let info = self.client.dataset_info(dataset_id).await?;
        for preferred in Self::PREFERRED_DATE_FIELDS {
            let wanted = norm(preferred);
            let declared = info
                .fields
                .iter()
                .any(|field| norm(field.name.as_deref().unwrap_or("")) == wanted);
            if declared {
                return Ok(Some((*preferred).to_string()));
            }
        }
        let by_type = info.fields.iter().find(|field| {
            matches!(field.field_type.as_deref(), Some("date") | Some("datetime"))
        });
        Ok(by_type.and_then(|field| field.name.clone()))
    }

    /// Fetches up to `max_rows` of the newest observations for one station
    /// and appends them to `store`. Returns the number of rows stored.
    pub async fn ingest_latest<S: WeatherStore>(
        &self,
        store: &mut S,
        station: &Station,
        max_rows: usize,
    ) -> Result<usize, ToulouseWeatherError> {
        if station.dataset_id.is_empty() {
            return Err(ToulouseWeatherError::MissingDataset(station.id.clone()));
        }
        // A dataset without a detectable date field is still ingestible,
        // just in whatever order the portal returns.
        let order_field = match self.find_first_date_field(&station.dataset_id).await {
            Ok(field) => field,
            Err(e) => {
                debug!(
                    "Could not inspect fields of {}, ingesting unordered: {}",
                    station.dataset_id, e
                );
                None
            }
        };
        let order_by = order_field.map(|field| format!("{field} desc"));

        let rows = self
            .client
            .records()
            .dataset_id(&station.dataset_id)
            .maybe_order_by(order_by)
            .max_rows(max_rows)
            .call()
            .await?;

        let mut count = 0;
        for row in rows {
            let record = self.cleaner.clean(&row, &station.id);
            store.add_record(&station.id, record);
            count += 1;
        }
        debug!("Stored {} rows for station {}", count, station.id);
        Ok(count)
    }

    /// Refreshes every station whose cache has gone stale, up to
    /// `max_stations` of them, `max_rows_per_station` rows each. A station
    /// that fails to ingest is logged and skipped; the others still load.
    /// Returns the total number of rows stored.
    pub async fn ingest_all_latest(
        &self,
        repo: &mut CachedWeatherRepository,
        max_rows_per_station: usize,
        max_stations: Option<usize>,
    ) -> usize {
        let mut stations = repo.list_stations();
        if let Some(max) = max_stations {
            stations.truncate(max);
        }

        let mut total = 0;
        for station in &stations {
            if !repo.needs_refresh(&station.id) {
                debug!("Cache still fresh for station {}, skipping", station.id);
                continue;
            }
            match self
                .ingest_latest(repo, station, max_rows_per_station)
                .await
            {
                Ok(count) => {
                    repo.mark_refreshed(&station.id);
                    total += count;
                }
                Err(e) => warn!("Failed to ingest records for station {}: {}", station.id, e),
            }
        }
        total
    }
}
