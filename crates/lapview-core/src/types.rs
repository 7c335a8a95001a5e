//! Race dataset types
//!
//! These mirror the JSON payload delivered by the race-data backend: one
//! entry per driver with a pre-computed boxplot statistics block, plus
//! event-wide metadata. Everything here is plain data; the pipeline derives
//! modified copies rather than mutating a received dataset.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable driver identity (the backend's customer id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(pub u64);

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Car class identifier (0 = unknown / placeholder)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarClassId(pub u32);

/// How a driver's race ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResultStatus {
    #[default]
    Running,
    Disconnected,
    Disqualified,
    /// Any status string the backend adds later
    #[serde(other)]
    Other,
}

impl ResultStatus {
    pub fn is_running(self) -> bool {
        self == ResultStatus::Running
    }

    /// Disconnected and disqualified drivers get the grey "disc" styling
    pub fn is_disc_or_disq(self) -> bool {
        matches!(self, ResultStatus::Disconnected | ResultStatus::Disqualified)
    }
}

/// Finish position as displayed under a boxplot
///
/// The backend sends plain ranks. Sorting by speed re-ranks drivers and the
/// label then shows both values, e.g. `2 (5)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum FinishPosition {
    /// Official result from the race
    Official(u32),
    /// Rank after sorting by median lap time, with the official rank kept
    Reranked { rank: u32, official: u32 },
}

impl FinishPosition {
    /// The official race result, regardless of re-ranking
    pub fn official(self) -> u32 {
        match self {
            FinishPosition::Official(pos) => pos,
            FinishPosition::Reranked { official, .. } => official,
        }
    }

    /// Replace the displayed rank, keeping the official one
    pub fn reranked(self, rank: u32) -> Self {
        FinishPosition::Reranked {
            rank,
            official: self.official(),
        }
    }
}

impl Default for FinishPosition {
    fn default() -> Self {
        FinishPosition::Official(0)
    }
}

impl From<u32> for FinishPosition {
    fn from(pos: u32) -> Self {
        FinishPosition::Official(pos)
    }
}

impl From<FinishPosition> for u32 {
    fn from(pos: FinishPosition) -> Self {
        pos.official()
    }
}

impl fmt::Display for FinishPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinishPosition::Official(pos) => write!(f, "{}", pos),
            FinishPosition::Reranked { rank, official } => write!(f, "{} ({})", rank, official),
        }
    }
}

/// Pre-computed boxplot statistics for one driver (all values in seconds)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxplotStats {
    pub median: f64,
    pub mean: f64,
    #[serde(rename = "Q1")]
    pub q1: f64,
    #[serde(rename = "Q3")]
    pub q3: f64,
    pub whisker_top: f64,
    pub whisker_bottom: f64,
    pub fliers_top: Vec<f64>,
    pub fliers_bottom: Vec<f64>,
    /// Horizontal jitter per lap in pixels, so overlapping laps stay distinguishable
    #[serde(rename = "laps_rndFactors")]
    pub lap_jitter: Vec<f32>,
}

/// One race participant
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub car_class_id: CarClassId,
    pub result_status: ResultStatus,
    pub finish_position: FinishPosition,
    pub finish_position_in_class: FinishPosition,
    /// Raw lap times in seconds, in lap order
    pub laps: Vec<f64>,
    #[serde(rename = "bpdata")]
    pub stats: BoxplotStats,
}

impl Driver {
    /// Neutral stand-in used when the viewing user is not part of the event
    ///
    /// Zero class, empty name and zeroed statistics: every real driver compares
    /// as slower or equal against it.
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn has_laps(&self) -> bool {
        !self.laps.is_empty()
    }

    /// Jitter for lap `index`, 0 when the backend sent fewer factors than laps
    pub fn lap_jitter(&self, index: usize) -> f32 {
        self.stats.lap_jitter.get(index).copied().unwrap_or(0.0)
    }

    /// Index of this driver's fastest lap
    pub fn fastest_lap(&self) -> Option<usize> {
        self.laps
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }
}

/// Event-wide values the chart is anchored on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventMetadata {
    /// [fastest, slowest] lap time bounds in seconds
    pub timeframe: [f64; 2],
    /// Reference median lap time; drawn at the vertical centre of the viewport
    pub median: f64,
    /// Distinct car classes present in the event
    #[serde(rename = "carclasses")]
    pub car_classes: Vec<CarClassId>,
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self {
            timeframe: [0.0, 0.0],
            median: 0.0,
            car_classes: Vec::new(),
        }
    }
}

impl EventMetadata {
    pub fn timeframe_min(&self) -> f64 {
        self.timeframe[0]
    }

    pub fn timeframe_max(&self) -> f64 {
        self.timeframe[1]
    }
}

/// A full race snapshot
///
/// Driver order is meaningful: it is both the render order and the x-axis order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDataset {
    pub drivers: Vec<Driver>,
    pub metadata: EventMetadata,
}

impl EventDataset {
    pub fn driver(&self, id: DriverId) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.id == id)
    }

    /// Number of drivers with at least one recorded lap
    pub fn drivers_with_laps(&self) -> usize {
        self.drivers.iter().filter(|d| d.has_laps()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "drivers": [
            {
                "id": 42, "name": "Jane Doe", "car_class_id": 4,
                "result_status": "Disqualified",
                "finish_position": 3, "finish_position_in_class": 1,
                "laps": [91.2, 90.8],
                "bpdata": {
                    "median": 91.0, "mean": 91.0, "Q1": 90.9, "Q3": 91.1,
                    "whisker_top": 91.2, "whisker_bottom": 90.8,
                    "fliers_top": [], "fliers_bottom": [],
                    "laps_rndFactors": [2.5]
                }
            },
            { "id": 7, "name": "Other", "result_status": "Towed" }
        ],
        "metadata": { "timeframe": [85.0, 110.0], "median": 92.0, "carclasses": [4, 5] }
    }"#;

    #[test]
    fn test_parse_backend_payload() {
        let data: EventDataset = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(data.drivers.len(), 2);

        let jane = &data.drivers[0];
        assert_eq!(jane.id, DriverId(42));
        assert_eq!(jane.car_class_id, CarClassId(4));
        assert_eq!(jane.result_status, ResultStatus::Disqualified);
        assert_eq!(jane.finish_position, FinishPosition::Official(3));
        assert_eq!(jane.stats.q3, 91.1);
        assert_eq!(data.metadata.car_classes, vec![CarClassId(4), CarClassId(5)]);

        // Unknown statuses and missing fields fall back instead of failing
        assert_eq!(data.drivers[1].result_status, ResultStatus::Other);
        assert!(!data.drivers[1].has_laps());
    }

    #[test]
    fn test_lap_jitter_defaults_to_zero() {
        let data: EventDataset = serde_json::from_str(SAMPLE).unwrap();
        let jane = &data.drivers[0];
        assert_eq!(jane.lap_jitter(0), 2.5);
        assert_eq!(jane.lap_jitter(1), 0.0);
    }

    #[test]
    fn test_finish_position_display() {
        let pos = FinishPosition::Official(5);
        assert_eq!(pos.to_string(), "5");
        let reranked = pos.reranked(2);
        assert_eq!(reranked.to_string(), "2 (5)");
        // Re-ranking twice keeps the official result
        assert_eq!(reranked.reranked(1).to_string(), "1 (5)");
    }

    #[test]
    fn test_fastest_lap() {
        let driver = Driver {
            laps: vec![92.0, 90.5, 91.0],
            ..Driver::default()
        };
        assert_eq!(driver.fastest_lap(), Some(1));
        assert_eq!(Driver::placeholder().fastest_lap(), None);
    }

    #[test]
    fn test_status_helpers() {
        assert!(ResultStatus::Running.is_running());
        assert!(ResultStatus::Disconnected.is_disc_or_disq());
        assert!(!ResultStatus::Other.is_disc_or_disq());
        assert!(!ResultStatus::Other.is_running());
    }
}
