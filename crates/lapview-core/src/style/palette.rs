//! Colour tables
//!
//! Every car class slot carries its own running colours for the box, median
//! and whiskers. Everything else (disconnected/disqualified grey, the user's
//! highlight, faster/slower medians, mean, laps, fliers) is shared.

use serde::{Deserialize, Serialize};

use super::color::Rgba;
use crate::pipeline::{ClassSlot, CLASS_SLOT_COUNT};

/// Border and background of the hover detail label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetailColors {
    pub border: Rgba,
    pub background: Rgba,
}

impl DetailColors {
    fn new(border: &str, background: &str) -> Self {
        Self {
            border: Rgba::from(border),
            background: Rgba::from(background),
        }
    }
}

/// Stroke colour of a line or dot plus its detail label colours
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineColors {
    pub line: Rgba,
    pub detail: DetailColors,
}

impl LineColors {
    fn new(line: &str, detail_border: &str, detail_background: &str) -> Self {
        Self {
            line: Rgba::from(line),
            detail: DetailColors::new(detail_border, detail_background),
        }
    }

    /// Detail label bordered in the line colour itself
    fn bordered(line: &str, detail_background: &str) -> Self {
        Self::new(line, line, detail_background)
    }
}

/// Quartile box colours
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxColors {
    pub fill: Rgba,
    pub line: Rgba,
    pub detail: DetailColors,
}

impl BoxColors {
    fn new(fill: &str, line: &str, detail_background: &str) -> Self {
        Self {
            fill: Rgba::from(fill),
            line: Rgba::from(line),
            detail: DetailColors::new(line, detail_background),
        }
    }
}

/// Running colours of one car class slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassPalette {
    pub boxes: BoxColors,
    pub median: LineColors,
    pub whiskers: LineColors,
}

impl ClassPalette {
    fn new(fill: &str, line: &str, detail_background: &str, whisker: &str, whisker_background: &str) -> Self {
        Self {
            boxes: BoxColors::new(fill, line, detail_background),
            median: LineColors::bordered(line, detail_background),
            whiskers: LineColors::bordered(whisker, whisker_background),
        }
    }
}

fn default_class_palettes() -> [ClassPalette; CLASS_SLOT_COUNT] {
    [
        ClassPalette {
            boxes: BoxColors::new("rgba(0,27,59,0.2)", "#1a88ff", "#093059"),
            median: LineColors::bordered("#22ff1a", "#063306"),
            whiskers: LineColors::bordered("#76b3ff", "#293f59"),
        },
        ClassPalette::new("rgba(59,37,89,0.2)", "#ae6bff", "#2b1b40", "#a087a8", "#3c3340"),
        ClassPalette::new("rgba(89,76,29,0.3)", "#ffda59", "#403716", "#a3a87e", "#3e402f"),
        ClassPalette::new("rgba(89,29,47,0.2)", "#ff5888", "#401622", "#b38686", "#403030"),
        ClassPalette::new("rgba(0,27,59,0.2)", "#24a8a8", "#093059", "#76b3ff", "#293f59"),
    ]
}

/// Colours that do not depend on the car class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedPalette {
    pub box_disc: BoxColors,
    pub box_user: BoxColors,
    pub median_disc: LineColors,
    pub median_user: LineColors,
    /// User's median while faster/slower highlighting is on
    pub median_user_highlight: LineColors,
    pub median_faster: LineColors,
    pub median_slower: LineColors,
    pub whiskers_disc: LineColors,
    pub whiskers_user: Rgba,
    pub mean: LineColors,
    pub lap_normal: LineColors,
    pub lap_fastest: LineColors,
    pub lap_incident: LineColors,
    pub fliers: Rgba,
}

impl Default for SharedPalette {
    fn default() -> Self {
        Self {
            box_disc: BoxColors {
                fill: Rgba::from("rgba(77,77,77,0.4)"),
                line: Rgba::from("#999999"),
                detail: DetailColors::new("#999999", "rgb(51,51,51)"),
            },
            box_user: BoxColors {
                fill: Rgba::from("rgba(166,206,255,0.2)"),
                line: Rgba::from("#a6cfff"),
                detail: DetailColors::new("#d000ff", "#d000ff"),
            },
            median_disc: LineColors::bordered("#999999", "rgb(51,51,51)"),
            median_user: LineColors::bordered("#22ff1a", "#063306"),
            median_user_highlight: LineColors::bordered("#ffd900", "#4d4900"),
            median_faster: LineColors::bordered("#ff0000", "#590000"),
            median_slower: LineColors::bordered("#22ff1a", "#063306"),
            whiskers_disc: LineColors::bordered("#999999", "rgb(51,51,51)"),
            whiskers_user: Rgba::from("#a6cfff"),
            mean: LineColors::bordered("#ff0000", "#590000"),
            lap_normal: LineColors::bordered("#fffb00", "#4d4900"),
            lap_fastest: LineColors::new("#f700ff", "#fffb00", "#4d4900"),
            lap_incident: LineColors::new("#ff7300", "#fffb00", "#4d4900"),
            fliers: Rgba::from("rgba(176,176,176)"),
        }
    }
}

/// All chart colours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Indexed by [`ClassSlot`]; slot 0 is the user's class and the fallback
    pub classes: [ClassPalette; CLASS_SLOT_COUNT],
    pub shared: SharedPalette,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            classes: default_class_palettes(),
            shared: SharedPalette::default(),
        }
    }
}

impl Palette {
    pub fn class(&self, slot: ClassSlot) -> &ClassPalette {
        self.classes.get(slot.0).unwrap_or(&self.classes[0])
    }
}

/// Axis, grid and label colours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramColors {
    pub background: Rgba,
    pub y_axis: Rgba,
    pub full_tick: Rgba,
    pub half_tick: Rgba,
    pub quarter_tick: Rgba,
    pub full_tick_label: Rgba,
    pub half_tick_label: Rgba,
    pub position_label: Rgba,
    pub name_label: Rgba,
    pub user_label: Rgba,
    pub detail_text: Rgba,
    pub footer_separator: Rgba,
}

impl Default for DiagramColors {
    fn default() -> Self {
        Self {
            background: Rgba::from("#101317"),
            y_axis: Rgba::WHITE,
            full_tick: Rgba::from("rgba(255,255,255,0.3)"),
            half_tick: Rgba::from("rgba(255,255,255,0.22)"),
            quarter_tick: Rgba::from("rgba(255,255,255,0.12)"),
            full_tick_label: Rgba::from("#ffffff"),
            half_tick_label: Rgba::from("#cccccc"),
            position_label: Rgba::from("#dbdbdb"),
            name_label: Rgba::from("#d9d9d9"),
            user_label: Rgba::WHITE,
            detail_text: Rgba::WHITE,
            footer_separator: Rgba::from("rgba(105,114,125,0.31)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_lookup_falls_back() {
        let palette = Palette::default();
        assert_eq!(palette.class(ClassSlot(1)).boxes.line, Rgba::from("#ae6bff"));
        assert_eq!(palette.class(ClassSlot(9)), palette.class(ClassSlot::DEFAULT));
    }

    #[test]
    fn test_class_median_matches_box_line() {
        let palette = Palette::default();
        for slot in 1..CLASS_SLOT_COUNT {
            let class = palette.class(ClassSlot(slot));
            assert_eq!(class.median.line, class.boxes.line);
        }
    }
}
