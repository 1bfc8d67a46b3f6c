//! Thin adapter over the Opendatasoft Explore v2.1 API.
//!
//! Only two resources matter here: the dataset catalog and a dataset's
//! records, both paginated with `limit`/`offset`. Rows come back as raw
//! JSON objects; typing them is the cleaner's job, not the client's. No
//! retry policy: a failed page fails the call.

use bon::bon;
use log::{info, warn};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::client::error::OdsClientError;
use crate::config;
use crate::types::JsonObject;

/// One page of the dataset catalog.
#[derive(Debug, Deserialize)]
pub struct CatalogPage {
    pub total_count: Option<u64>,
    #[serde(default)]
    pub results: Vec<JsonObject>,
}

/// One page of a dataset's records.
#[derive(Debug, Deserialize)]
pub struct RecordsPage {
    pub total_count: Option<u64>,
    #[serde(default)]
    pub results: Vec<JsonObject>,
}

/// Metadata of a single dataset, reduced to what ingestion needs.
#[derive(Debug, Deserialize)]
pub struct DatasetInfo {
    pub dataset_id: Option<String>,
    #[serde(default)]
    pub fields: Vec<DatasetField>,
}

/// One declared field of a dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetField {
    pub name: Option<String>,
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
}

/// HTTP client for the Toulouse Métropole open-data portal.
pub struct OdsClient {
    base_url: String,
    http: reqwest::Client,
}

impl Default for OdsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[bon]
impl OdsClient {
    /// Creates a client against the configured portal endpoint
    /// (`ODS_BASE_URL` overrides the built-in default).
    pub fn new() -> Self {
        Self::with_base_url(config::base_url())
    }

    /// Creates a client against an arbitrary Explore v2.1 endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// The endpoint this client talks to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, OdsClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(params)
            .header(ACCEPT, "application/json; charset=utf-8")
            .header(USER_AGENT, config::USER_AGENT)
            .timeout(config::HTTP_TIMEOUT)
            .send()
            .await
            .map_err(|e| OdsClientError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(match e.status() {
                    Some(status) => OdsClientError::HttpStatus {
                        url,
                        status,
                        source: e,
                    },
                    None => OdsClientError::NetworkRequest(url, e),
                });
            }
        };

        response
            .json::<T>()
            .await
            .map_err(|e| OdsClientError::ResponseDecode(url, e))
    }

    /// Fetches one catalog page. The limit is clamped to the portal's
    /// maximum page size.
    pub async fn catalog_datasets_page(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<CatalogPage, OdsClientError> {
        let limit = limit.clamp(1, config::CATALOG_PAGE_SIZE);
        let params = [
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
            ("include_links", "false".to_string()),
            ("include_app_metas", "false".to_string()),
        ];
        self.get_json("/catalog/datasets", &params).await
    }

    /// Walks the whole catalog, page by page, up to `hard_limit` rows
    /// (the configured limit when `None`).
    pub async fn catalog_datasets(
        &self,
        hard_limit: Option<usize>,
    ) -> Result<Vec<JsonObject>, OdsClientError> {
        let hard_limit = hard_limit.unwrap_or(config::CATALOG_HARD_LIMIT);
        let mut datasets = Vec::new();
        let mut offset = 0;
        loop {
            let page = self
                .catalog_datasets_page(config::CATALOG_PAGE_SIZE, offset)
                .await?;
            if page.results.is_empty() {
                break;
            }
            let fetched = page.results.len();
            for dataset in page.results {
                datasets.push(dataset);
                if datasets.len() >= hard_limit {
                    info!("Catalog walk stopped at the hard limit of {hard_limit} datasets");
                    return Ok(datasets);
                }
            }
            offset += fetched;
            if offset >= page.total_count.unwrap_or(0) as usize {
                break;
            }
        }
        Ok(datasets)
    }

    /// Fetches the metadata of one dataset.
    pub async fn dataset_info(&self, dataset_id: &str) -> Result<DatasetInfo, OdsClientError> {
        let path = format!("/catalog/datasets/{dataset_id}");
        self.get_json(&path, &[]).await
    }

    /// Fetches a dataset's records, paginated.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.dataset_id(&str)`: **Required.** The dataset to read from.
    /// * `.select(String)`: Optional ODS `select` expression.
    /// * `.filter(String)`: Optional filter, sent as the ODS `where` parameter.
    /// * `.order_by(String)`: Optional sort expression, e.g. `"date desc"`.
    /// * `.max_rows(usize)`: Optional cap on the number of rows returned;
    ///   without it the walk continues until the portal runs out of pages.
    #[builder]
    pub async fn records(
        &self,
        dataset_id: &str,
        select: Option<String>,
        filter: Option<String>,
        order_by: Option<String>,
        max_rows: Option<usize>,
    ) -> Result<Vec<JsonObject>, OdsClientError> {
        let path = format!("/catalog/datasets/{dataset_id}/records");
        let mut rows = Vec::new();
        let mut offset = 0;
        loop {
            let page_limit = match max_rows {
                Some(max) => config::RECORDS_PAGE_SIZE.min(max - rows.len()),
                None => config::RECORDS_PAGE_SIZE,
            };
            if page_limit == 0 {
                break;
            }
            let mut params = vec![
                ("limit", page_limit.to_string()),
                ("offset", offset.to_string()),
            ];
            if let Some(select) = &select {
                params.push(("select", select.clone()));
            }
            if let Some(filter) = &filter {
                params.push(("where", filter.clone()));
            }
            if let Some(order_by) = &order_by {
                params.push(("order_by", order_by.clone()));
            }

            let page: RecordsPage = self.get_json(&path, &params).await?;
            if page.results.is_empty() {
                break;
            }
            let fetched = page.results.len();
            for row in page.results {
                rows.push(row);
                if max_rows.is_some_and(|max| rows.len() >= max) {
                    return Ok(rows);
                }
            }
            offset += fetched;
            if fetched < page_limit {
                break;
            }
        }
        Ok(rows)
    }
}
