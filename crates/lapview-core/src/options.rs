//! View options toggled by the user
//!
//! Read-only to the engine; the host replaces the whole struct when a toggle
//! changes. All switches default to off.

use serde::{Deserialize, Serialize};

/// Sub-toggles of the individual-laps layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LapOptions {
    /// Draw every lap as a dot next to the boxplot
    pub enabled: bool,
    /// Mark the single fastest lap of the event
    pub fastest_overall: bool,
    /// Mark each driver's personal fastest lap
    pub fastest_per_driver: bool,
    /// Mark laps with incidents
    pub incidents: bool,
}

/// Everything the user can switch in the diagram side panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    /// Keep disconnected and disqualified drivers
    pub show_disc_disq: bool,
    pub laps: LapOptions,
    pub show_mean: bool,
    /// Colour medians relative to the user's median
    pub faster_slower: bool,
    /// Show every car class instead of only the user's
    pub multiclass: bool,
    /// Order drivers by median lap time and re-rank them
    pub sort_by_speed: bool,
}

impl ViewOptions {
    pub fn show_laps(&self) -> bool {
        self.laps.enabled
    }
}
