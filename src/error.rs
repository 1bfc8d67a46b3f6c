use crate::client::error::OdsClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToulouseWeatherError {
    #[error(transparent)]
    Client(#[from] OdsClientError),

    #[error("Station '{0}' has no source dataset to ingest from")]
    MissingDataset(String),
}
