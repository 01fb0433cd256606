pub mod city;
pub mod service;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

pub use city::{City, StateData};
pub use service::Service;

/// Reference records loaded from JSON or the CMS.
/// A record that fails `is_valid` is dropped on load, never surfaced.
pub trait Record: DeserializeOwned {
    fn is_valid(&self) -> bool;
}

/// Decodes a JSON array record by record, dropping anything that does not
/// deserialize or does not validate.
pub fn decode_records<T: Record>(values: Vec<Value>) -> Vec<T> {
    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<T>(value) {
            Ok(record) if record.is_valid() => Some(record),
            Ok(_) => None,
            Err(e) => {
                debug!("Dropping malformed record: {e}");
                None
            }
        })
        .collect();

    if records.len() < total {
        debug!("Dropped {} of {} records", total - records.len(), total);
    }
    records
}
