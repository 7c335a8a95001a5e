//! Chart style configuration
//!
//! A [`StyleConfig`] is built once by the host (defaults or a YAML file) and
//! handed to the chart session, which owns it. Nothing in here is global.
//!
//! Default location: `~/.config/lapview/style.yaml`

mod color;
mod palette;
mod rules;

pub use color::Rgba;
pub use palette::{
    BoxColors, ClassPalette, DetailColors, DiagramColors, LineColors, Palette, SharedPalette,
};
pub use rules::StyleResolver;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::load_config;
use crate::transform::DEFAULT_FULL_TICK_SPACING;

/// Drawn, highlighted and hit-test sizes of a line primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineProps {
    pub thickness: f32,
    pub select: f32,
    /// Half height of the hover band around the line
    pub hitbox: f32,
}

/// Drawn, highlighted and hit-test radius of a dot primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotProps {
    pub radius: f32,
    pub select: f32,
    pub hitbox: f32,
}

/// Sizes of every boxplot primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimitiveProps {
    pub quartiles: LineProps,
    pub median: LineProps,
    pub whiskers: LineProps,
    pub mean: DotProps,
    pub laps: DotProps,
    pub flier_radius: f32,
    pub flier_thickness: f32,
    /// Box side lines
    pub box_side_thickness: f32,
}

impl Default for PrimitiveProps {
    fn default() -> Self {
        Self {
            quartiles: LineProps { thickness: 2.0, select: 4.0, hitbox: 3.0 },
            median: LineProps { thickness: 2.0, select: 3.0, hitbox: 4.0 },
            whiskers: LineProps { thickness: 2.0, select: 4.0, hitbox: 2.0 },
            mean: DotProps { radius: 4.0, select: 5.0, hitbox: 5.0 },
            laps: DotProps { radius: 2.0, select: 2.5, hitbox: 2.5 },
            flier_radius: 3.5,
            flier_thickness: 0.7,
            box_side_thickness: 2.0,
        }
    }
}

/// Layout constants of the diagram, in screen pixels unless noted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Box width before fitting to the viewport
    pub initial_box_width: f32,
    /// Fitting decrement per step
    pub box_width_step: f32,
    pub box_gap: f32,
    /// Whisker cap width relative to box width
    pub whisker_ratio: f32,
    /// Pixels per second at zoom 1.0
    pub full_tick_spacing: f32,
    /// Width of the area left of the plot (tick labels + axis strip)
    pub gutter_width: f32,
    pub axis_strip_width: f32,
    /// Axis line position inside the strip
    pub y_axis_pos: f32,
    pub full_tick_width: f32,
    pub half_tick_width: f32,
    pub quarter_tick_width: f32,
    pub tick_label_x: f32,
    pub tick_label_y_offset: f32,
    pub tick_label_size: f32,
    /// Height of the driver label area under the plot
    pub footer_height: f32,
    pub position_label_y: f32,
    pub name_label_y: f32,
    pub driver_label_size: f32,
    /// Detail label offset from the primitive, before the per-kind gap
    pub detail_offset_y: f32,
    pub detail_dot_gap: f32,
    pub detail_whisker_gap: f32,
    pub detail_line_gap: f32,
    pub detail_text_size: f32,
    pub detail_height: f32,
    /// Additive zoom change per wheel notch
    pub zoom_step: f32,
    pub min_scale: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            initial_box_width: 200.0,
            box_width_step: 0.1,
            box_gap: 14.0,
            whisker_ratio: 0.6,
            full_tick_spacing: DEFAULT_FULL_TICK_SPACING,
            gutter_width: 150.0,
            axis_strip_width: 20.0,
            y_axis_pos: 10.0,
            full_tick_width: 20.0,
            half_tick_width: 12.0,
            quarter_tick_width: 8.0,
            tick_label_x: 41.0,
            tick_label_y_offset: 9.5,
            tick_label_size: 22.0,
            footer_height: 80.0,
            position_label_y: 25.0,
            name_label_y: 55.0,
            driver_label_size: 20.0,
            detail_offset_y: -15.0,
            detail_dot_gap: 20.0,
            detail_whisker_gap: 5.0,
            detail_line_gap: 5.0,
            detail_text_size: 16.0,
            detail_height: 26.0,
            zoom_step: 0.1,
            min_scale: 0.1,
        }
    }
}

/// Root style configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub palette: Palette,
    pub diagram: DiagramColors,
    pub props: PrimitiveProps,
    pub layout: LayoutConfig,
}

/// Load a style file, defaults when missing or invalid
pub fn load_style(path: &Path) -> StyleConfig {
    load_config(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r##"
diagram:
  background: "#000000"
layout:
  box_gap: 20.0
"##;
        let style: StyleConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(style.diagram.background, Rgba::BLACK);
        assert_eq!(style.layout.box_gap, 20.0);
        assert_eq!(style.layout.initial_box_width, 200.0);
        assert_eq!(style.palette, Palette::default());
    }

    #[test]
    fn test_load_missing_style() {
        let style = load_style(Path::new("/nonexistent/style.yaml"));
        assert_eq!(style, StyleConfig::default());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let style = StyleConfig::default();
        let yaml = serde_yaml::to_string(&style).unwrap();
        let back: StyleConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.palette.shared.fliers, style.palette.shared.fliers);
        assert_eq!(back.props, style.props);
    }
}
