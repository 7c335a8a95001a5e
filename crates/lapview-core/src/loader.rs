//! Dataset loading
//!
//! Reads a race snapshot from JSON, either a file on disk or an in-memory
//! payload. The local file stands in for the analytics backend response.

use std::path::Path;

use crate::error::{DatasetError, DatasetResult};
use crate::types::EventDataset;

/// Parse a dataset from a JSON string
pub fn parse_dataset(json: &str) -> DatasetResult<EventDataset> {
    let dataset: EventDataset = serde_json::from_str(json)?;
    validate(&dataset)?;
    log::info!(
        "parse_dataset: {} drivers ({} with laps), {} car classes",
        dataset.drivers.len(),
        dataset.drivers_with_laps(),
        dataset.metadata.car_classes.len()
    );
    Ok(dataset)
}

/// Load a dataset from a JSON file
pub fn load_dataset(path: &Path) -> DatasetResult<EventDataset> {
    log::info!("load_dataset: Loading from {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dataset(&contents)
}

fn validate(dataset: &EventDataset) -> DatasetResult<()> {
    let [min, max] = dataset.metadata.timeframe;
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(DatasetError::InvalidTimeframe { min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DriverId;

    #[test]
    fn test_parse_minimal() {
        let data = parse_dataset(
            r#"{"drivers":[{"id":1,"name":"A","laps":[90.0]}],"metadata":{"timeframe":[85.0,100.0],"median":90.0}}"#,
        )
        .unwrap();
        assert_eq!(data.drivers[0].id, DriverId(1));
        assert_eq!(data.metadata.timeframe_max(), 100.0);
    }

    #[test]
    fn test_reversed_timeframe_rejected() {
        let err = parse_dataset(r#"{"drivers":[],"metadata":{"timeframe":[100.0,85.0]}}"#)
            .unwrap_err();
        assert!(matches!(err, DatasetError::InvalidTimeframe { .. }));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        assert!(matches!(
            parse_dataset("not json").unwrap_err(),
            DatasetError::Parse(_)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("race.json");
        std::fs::write(&path, r#"{"drivers":[],"metadata":{"timeframe":[80.0,95.0],"median":88.0}}"#)
            .unwrap();

        let data = load_dataset(&path).unwrap();
        assert!(data.drivers.is_empty());
        assert_eq!(data.metadata.median, 88.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_dataset(Path::new("/nonexistent/race.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
