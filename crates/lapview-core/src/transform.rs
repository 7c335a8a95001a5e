//! Seconds to pixel mapping
//!
//! Lap times map to a vertical pixel position through a linear function
//! anchored so the event's reference median sits at mid-viewport. Slower
//! times are higher up (smaller y). Positions are snapped to pixel centres
//! (`+0.5`) so one-pixel lines render crisp.

use serde::{Deserialize, Serialize};

/// Pixels per full second on the y axis at zoom 1.0
pub const DEFAULT_FULL_TICK_SPACING: f32 = 60.0;

/// Linear seconds → pixel mapping: `y = round(m*s + t) + 0.5`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeTransform {
    slope: f64,
    intercept: f64,
    viewport_height: f32,
    reference_median: f64,
}

impl TimeTransform {
    /// Build the mapping for a viewport height and reference median
    pub fn new(viewport_height: f32, reference_median: f64, full_tick_spacing: f32) -> Self {
        let slope = -(full_tick_spacing as f64);
        let intercept = viewport_height as f64 / 2.0 - slope * reference_median;
        Self {
            slope,
            intercept,
            viewport_height,
            reference_median,
        }
    }

    /// Returns a recomputed transform when height or median moved, `None` otherwise
    pub fn rebuilt_for(&self, viewport_height: f32, reference_median: f64) -> Option<Self> {
        if self.viewport_height == viewport_height && self.reference_median == reference_median {
            return None;
        }
        Some(Self::new(
            viewport_height,
            reference_median,
            -self.slope as f32,
        ))
    }

    pub fn to_pixel(&self, seconds: f64) -> f32 {
        ((self.slope * seconds + self.intercept).round() + 0.5) as f32
    }

    /// Inverse mapping, unrounded
    pub fn to_seconds(&self, y: f32) -> f64 {
        (y as f64 - self.intercept) / self.slope
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn reference_median(&self) -> f64 {
        self.reference_median
    }

    /// Pixels covered by one second
    pub fn spacing(&self) -> f32 {
        -self.slope as f32
    }
}

/// Format a lap time as `m:ss.fff`
pub fn format_lap_time(seconds: f64) -> String {
    let total_ms = (seconds.abs() * 1000.0).round() as u64;
    let minutes = total_ms / 60_000;
    let rest = total_ms % 60_000;
    let sign = if seconds < 0.0 && total_ms > 0 { "-" } else { "" };
    format!("{}{}:{:02}.{:03}", sign, minutes, rest / 1000, rest % 1000)
}

/// Format the gap to the user's time as `+0.123` / `-0.123`, empty when equal
pub fn format_delta(delta: f64) -> String {
    if delta.abs() < 0.0005 {
        return String::new();
    }
    format!("{:+.3}", delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_median_at_mid_height() {
        let t = TimeTransform::new(786.0, 95.0, DEFAULT_FULL_TICK_SPACING);
        assert_eq!(t.to_pixel(95.0), 393.5);
        // One second slower is one tick spacing higher
        assert_eq!(t.to_pixel(94.0), 453.5);
        assert_eq!(t.to_pixel(96.0), 333.5);
    }

    #[test]
    fn test_ordering_preserved() {
        let t = TimeTransform::new(700.0, 92.3, DEFAULT_FULL_TICK_SPACING);
        let (q1, median, q3) = (90.12, 90.5, 91.77);
        assert!(t.to_pixel(q3) <= t.to_pixel(median));
        assert!(t.to_pixel(median) <= t.to_pixel(q1));
    }

    #[test]
    fn test_inverse() {
        let t = TimeTransform::new(800.0, 100.0, DEFAULT_FULL_TICK_SPACING);
        assert!((t.to_seconds(400.0) - 100.0).abs() < 1e-9);
        assert!((t.to_seconds(t.to_pixel(97.25)) - 97.25).abs() < 0.02);
    }

    #[test]
    fn test_rebuild_only_on_change() {
        let t = TimeTransform::new(786.0, 95.0, DEFAULT_FULL_TICK_SPACING);
        assert!(t.rebuilt_for(786.0, 95.0).is_none());
        let taller = t.rebuilt_for(900.0, 95.0).unwrap();
        assert_eq!(taller.to_pixel(95.0), 450.5);
        assert_eq!(taller.spacing(), DEFAULT_FULL_TICK_SPACING);
    }

    #[test]
    fn test_format_lap_time() {
        assert_eq!(format_lap_time(95.0), "1:35.000");
        assert_eq!(format_lap_time(65.5), "1:05.500");
        assert_eq!(format_lap_time(59.9996), "1:00.000");
        assert_eq!(format_lap_time(8.25), "0:08.250");
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(0.123), "+0.123");
        assert_eq!(format_delta(-1.5), "-1.500");
        assert_eq!(format_delta(0.0), "");
    }
}
