//! Per-driver boxplot geometry
//!
//! Geometry lives in plot space: pixels before camera and zoom, with the
//! scroll offset already subtracted. The render loop applies camera and zoom
//! on top; the hit-tester maps the pointer back into this space.

use crate::options::ViewOptions;
use crate::pipeline::{LapFlags, PreparedDataset};
use crate::style::LayoutConfig;
use crate::transform::TimeTransform;
use crate::types::DriverId;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Horizontal segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HLine {
    pub x_start: f32,
    pub x_end: f32,
    pub y: f32,
}

impl HLine {
    fn centred(middle: f32, width: f32, y: f32) -> Self {
        Self {
            x_start: middle - width / 2.0,
            x_end: middle + width / 2.0,
            y,
        }
    }

    /// Inside the segment's x range and within `band` of its y
    pub fn contains(&self, p: Point, band: f32) -> bool {
        p.x >= self.x_start && p.x <= self.x_end && p.y >= self.y - band && p.y <= self.y + band
    }
}

/// Vertical segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VLine {
    pub x: f32,
    pub y_start: f32,
    pub y_end: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LapPoint {
    pub position: Point,
    pub seconds: f64,
    pub flags: LapFlags,
}

/// Everything drawn for one driver
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryRecord {
    pub driver_id: DriverId,
    /// Index into the prepared dataset's drivers
    pub driver_index: usize,
    pub q3: HLine,
    pub q1: HLine,
    pub left_side: VLine,
    pub right_side: VLine,
    pub median: HLine,
    pub mean: Option<Point>,
    pub whisker_top_connector: VLine,
    pub whisker_bottom_connector: VLine,
    pub whisker_top: HLine,
    pub whisker_bottom: HLine,
    pub fliers_top: Vec<Point>,
    pub fliers_bottom: Vec<Point>,
    pub laps: Option<Vec<LapPoint>>,
}

/// Box sizes fitted to the viewport width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxLayout {
    pub box_width: f32,
    pub median_width: f32,
    pub whisker_width: f32,
    pub gap: f32,
}

impl BoxLayout {
    /// Shrink the initial width in fixed steps until every box fits
    ///
    /// The step count is solved directly instead of looping, so a step below
    /// the f32 resolution of the width still terminates. The width is not
    /// clamped; very narrow viewports end up with negative widths. With no
    /// drivers it stays at the initial width.
    pub fn fit(driver_count: usize, canvas_width: f32, layout: &LayoutConfig) -> Self {
        let gap = layout.box_gap;
        let n = driver_count as f32;
        let initial = layout.initial_box_width;
        let step = layout.box_width_step;
        let fits = |w: f32| gap + n * (w + gap) <= canvas_width;

        let mut width = initial;
        if driver_count > 0 && step > 0.0 && step.is_finite() && !fits(width) {
            let target = (canvas_width as f64 - gap as f64) / driver_count as f64 - gap as f64;
            let mut steps = ((initial as f64 - target) / step as f64).ceil().max(1.0);
            width = (initial as f64 - steps * step as f64) as f32;
            // f32 rounding can land just past the limit
            if !fits(width) {
                steps += 1.0;
                width = (initial as f64 - steps * step as f64) as f32;
            }
        }
        Self {
            box_width: width,
            median_width: width,
            whisker_width: width * layout.whisker_ratio,
            gap,
        }
    }

    /// Left edge of slot `index`
    pub fn location(&self, index: usize) -> f32 {
        self.gap + index as f32 * (self.box_width + self.gap)
    }

    /// Horizontal centre of slot `index`
    pub fn middle(&self, index: usize) -> f32 {
        self.location(index) + self.box_width / 2.0
    }
}

/// Build one record per prepared driver with at least one lap
pub fn build_geometry(
    prepared: &PreparedDataset,
    transform: &TimeTransform,
    layout: &BoxLayout,
    options: &ViewOptions,
    scroll: Vector,
) -> Vec<GeometryRecord> {
    let y = |seconds: f64| transform.to_pixel(seconds) - scroll.y;

    prepared
        .dataset
        .drivers
        .iter()
        .enumerate()
        .filter(|(_, driver)| driver.has_laps())
        .map(|(i, driver)| {
            let stats = &driver.stats;
            let left = layout.location(i) - scroll.x;
            let right = left + layout.box_width;
            let middle = layout.middle(i) - scroll.x;

            let q3_y = y(stats.q3);
            let q1_y = y(stats.q1);
            let top_y = y(stats.whisker_top);
            let bottom_y = y(stats.whisker_bottom);

            let laps = options.show_laps().then(|| {
                driver
                    .laps
                    .iter()
                    .enumerate()
                    .map(|(lap, &seconds)| LapPoint {
                        position: Point::new(middle + driver.lap_jitter(lap), y(seconds)),
                        seconds,
                        flags: prepared.lap_flags(i, lap),
                    })
                    .collect::<Vec<_>>()
            });

            GeometryRecord {
                driver_id: driver.id,
                driver_index: i,
                q3: HLine { x_start: left, x_end: right, y: q3_y },
                q1: HLine { x_start: left, x_end: right, y: q1_y },
                left_side: VLine { x: left, y_start: q3_y, y_end: q1_y },
                right_side: VLine { x: right, y_start: q3_y, y_end: q1_y },
                median: HLine {
                    x_start: left,
                    x_end: left + layout.median_width,
                    y: y(stats.median),
                },
                mean: options.show_mean.then(|| Point::new(middle, y(stats.mean))),
                whisker_top_connector: VLine { x: middle, y_start: q3_y, y_end: top_y },
                whisker_bottom_connector: VLine { x: middle, y_start: q1_y, y_end: bottom_y },
                whisker_top: HLine::centred(middle, layout.whisker_width, top_y),
                whisker_bottom: HLine::centred(middle, layout.whisker_width, bottom_y),
                fliers_top: stats.fliers_top.iter().map(|&s| Point::new(middle, y(s))).collect(),
                fliers_bottom: stats
                    .fliers_bottom
                    .iter()
                    .map(|&s| Point::new(middle, y(s)))
                    .collect(),
                laps,
            }
        })
        .collect()
}
