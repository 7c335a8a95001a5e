//! Colour business rules
//!
//! Which colour a primitive gets depends on the driver (status, class, is it
//! the user) and the view options. The resolver is built per frame from the
//! current prepared dataset, so nothing here is cached between frames.

use std::cmp::Ordering;

use super::palette::{BoxColors, ClassPalette, DetailColors};
use super::{Rgba, StyleConfig};
use crate::hit_test::PrimitiveKind;
use crate::options::ViewOptions;
use crate::pipeline::{LapFlags, PreparedDataset};
use crate::types::Driver;

/// Resolves primitive colours for one frame
pub struct StyleResolver<'a> {
    style: &'a StyleConfig,
    prepared: &'a PreparedDataset,
    options: &'a ViewOptions,
}

impl<'a> StyleResolver<'a> {
    pub fn new(style: &'a StyleConfig, prepared: &'a PreparedDataset, options: &'a ViewOptions) -> Self {
        Self {
            style,
            prepared,
            options,
        }
    }

    fn class(&self, driver: &Driver) -> &'a ClassPalette {
        self.style
            .palette
            .class(self.prepared.class_slots.slot_for(driver.car_class_id))
    }

    fn is_user(&self, driver: &Driver) -> bool {
        self.prepared.is_user(driver)
    }

    /// How the driver's median compares with the user's
    fn median_vs_user(&self, driver: &Driver) -> Ordering {
        driver
            .stats
            .median
            .total_cmp(&self.prepared.user_driver.stats.median)
    }

    pub fn box_colors(&self, driver: &Driver) -> BoxColors {
        let shared = &self.style.palette.shared;
        if driver.result_status.is_disc_or_disq() {
            return shared.box_disc;
        }
        if self.is_user(driver) {
            shared.box_user
        } else {
            self.class(driver).boxes
        }
    }

    pub fn median_color(&self, driver: &Driver) -> Rgba {
        let shared = &self.style.palette.shared;
        if driver.result_status.is_disc_or_disq() {
            return shared.median_disc.line;
        }
        let mut color = if self.is_user(driver) {
            shared.median_user.line
        } else {
            self.class(driver).median.line
        };
        if self.options.faster_slower {
            if self.is_user(driver) {
                color = shared.median_user_highlight.line;
            } else {
                match self.median_vs_user(driver) {
                    Ordering::Greater => color = shared.median_slower.line,
                    Ordering::Less => color = shared.median_faster.line,
                    Ordering::Equal => {}
                }
            }
        }
        color
    }

    pub fn whisker_color(&self, driver: &Driver) -> Rgba {
        let shared = &self.style.palette.shared;
        if driver.result_status.is_disc_or_disq() {
            shared.whiskers_disc.line
        } else if self.is_user(driver) {
            shared.whiskers_user
        } else {
            self.class(driver).whiskers.line
        }
    }

    pub fn mean_color(&self) -> Rgba {
        self.style.palette.shared.mean.line
    }

    pub fn flier_color(&self) -> Rgba {
        self.style.palette.shared.fliers
    }

    pub fn lap_color(&self, flags: LapFlags) -> Rgba {
        let shared = &self.style.palette.shared;
        if flags.incident && self.options.laps.incidents {
            shared.lap_incident.line
        } else if flags.fastest_overall || flags.fastest_personal {
            shared.lap_fastest.line
        } else {
            shared.lap_normal.line
        }
    }

    /// Border and background of the hover detail label
    pub fn detail_colors(&self, driver: &Driver, kind: PrimitiveKind) -> DetailColors {
        let shared = &self.style.palette.shared;
        let class = self.class(driver);

        if !driver.result_status.is_running() {
            return match kind {
                PrimitiveKind::Median => shared.median_disc.detail,
                PrimitiveKind::Mean => shared.mean.detail,
                PrimitiveKind::Q1 | PrimitiveKind::Q3 => shared.whiskers_disc.detail,
                PrimitiveKind::WhiskerTop | PrimitiveKind::WhiskerBottom => DetailColors {
                    border: shared.box_disc.line,
                    background: shared.box_disc.fill,
                },
                PrimitiveKind::Lap => shared.lap_normal.detail,
            };
        }

        match kind {
            PrimitiveKind::Median if self.options.faster_slower => {
                if self.is_user(driver) {
                    shared.median_user_highlight.detail
                } else {
                    match self.median_vs_user(driver) {
                        Ordering::Greater => shared.median_slower.detail,
                        Ordering::Less => shared.median_faster.detail,
                        Ordering::Equal => class.median.detail,
                    }
                }
            }
            PrimitiveKind::Median => class.median.detail,
            PrimitiveKind::Mean => shared.mean.detail,
            PrimitiveKind::Q1 | PrimitiveKind::Q3 => class.boxes.detail,
            PrimitiveKind::WhiskerTop | PrimitiveKind::WhiskerBottom => DetailColors {
                border: class.whiskers.line,
                background: class.whiskers.detail.background,
            },
            PrimitiveKind::Lap => shared.lap_normal.detail,
        }
    }
}
