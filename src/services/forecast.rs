//! A toy forecast: the arithmetic mean of recent temperatures.

use crate::repository::WeatherStore;

/// Average of the non-missing temperatures among the latest `last_n`
/// observations of a station. `None` when no usable temperature exists.
pub fn mean_temperature(
    store: &impl WeatherStore,
    station_id: &str,
    last_n: usize,
) -> Option<f64> {
    let records = store.latest_records(station_id, last_n);
    let temperatures: Vec<f64> = records
        .iter()
        .filter_map(|record| record.temperature_c)
        .collect();
    if temperatures.is_empty() {
        return None;
    }
    Some(temperatures.iter().sum::<f64>() / temperatures.len() as f64)
}
