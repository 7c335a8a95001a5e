//! Data preparation pipeline
//!
//! Turns a received [`EventDataset`] into the dataset the chart actually
//! draws: filtered by car class and result status, optionally sorted by
//! median lap time and re-ranked. The input is never modified; every call
//! produces an independent copy.

use crate::options::ViewOptions;
use crate::types::{CarClassId, Driver, DriverId, EventDataset};

/// Number of palette slots a car class can be drawn with
pub const CLASS_SLOT_COUNT: usize = 5;

/// Palette slot for a car class (0-based, slot 0 is the user's / default slot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClassSlot(pub usize);

impl ClassSlot {
    pub const DEFAULT: ClassSlot = ClassSlot(0);
}

/// Mapping from car class to palette slot
///
/// The user's class always draws with the default slot. Other classes take
/// the remaining slots in metadata order; any class past the last slot falls
/// back to the default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassSlots {
    assigned: Vec<(CarClassId, ClassSlot)>,
}

impl ClassSlots {
    pub fn assign(car_classes: &[CarClassId], user_class: CarClassId, multiclass: bool) -> Self {
        if !multiclass || car_classes.len() <= 1 {
            return Self::default();
        }
        let assigned = car_classes
            .iter()
            .filter(|&&class| class != user_class)
            .take(CLASS_SLOT_COUNT - 1)
            .enumerate()
            .map(|(i, &class)| (class, ClassSlot(i + 1)))
            .collect();
        Self { assigned }
    }

    pub fn slot_for(&self, class: CarClassId) -> ClassSlot {
        self.assigned
            .iter()
            .find(|(c, _)| *c == class)
            .map(|(_, slot)| *slot)
            .unwrap_or(ClassSlot::DEFAULT)
    }
}

/// Highlight flags for one lap dot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LapFlags {
    pub fastest_personal: bool,
    pub fastest_overall: bool,
    /// Always false for now, the backend sends no incident data
    pub incident: bool,
}

/// Render-ready dataset plus everything resolved while preparing it
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedDataset {
    pub dataset: EventDataset,
    /// Id the user asked for, whether or not it was found
    pub user_id: Option<DriverId>,
    /// The user's driver, or [`Driver::placeholder`] when not in the event
    pub user_driver: Driver,
    pub class_slots: ClassSlots,
    /// Per prepared driver, one entry per lap
    pub lap_flags: Vec<Vec<LapFlags>>,
}

impl PreparedDataset {
    /// Whether `driver` is the viewing user
    pub fn is_user(&self, driver: &Driver) -> bool {
        self.user_id == Some(driver.id)
    }

    pub fn user_class(&self) -> CarClassId {
        self.user_driver.car_class_id
    }

    pub fn lap_flags(&self, driver_index: usize, lap_index: usize) -> LapFlags {
        self.lap_flags
            .get(driver_index)
            .and_then(|laps| laps.get(lap_index))
            .copied()
            .unwrap_or_default()
    }
}

/// Run the whole pipeline
pub fn prepare(
    raw: &EventDataset,
    options: &ViewOptions,
    user_id: Option<DriverId>,
) -> PreparedDataset {
    let mut dataset = raw.clone();

    let user_driver = match user_id.and_then(|id| raw.driver(id)) {
        Some(driver) => driver.clone(),
        None => {
            if let Some(id) = user_id {
                log::warn!("prepare: User {} not in event, using placeholder", id);
            }
            Driver::placeholder()
        }
    };
    let user_class = user_driver.car_class_id;

    let before = dataset.drivers.len();
    if !options.multiclass {
        dataset.drivers.retain(|d| d.car_class_id == user_class);
    }
    if !options.show_disc_disq {
        drop_not_running(&mut dataset);
    }
    if options.sort_by_speed {
        sort_by_speed(&mut dataset, options.multiclass);
    }
    log::info!(
        "prepare: Kept {} of {} drivers (multiclass={}, disc/disq={}, sorted={})",
        dataset.drivers.len(),
        before,
        options.multiclass,
        options.show_disc_disq,
        options.sort_by_speed
    );

    let class_slots = ClassSlots::assign(&raw.metadata.car_classes, user_class, options.multiclass);
    let lap_flags = classify_laps(&dataset, options);

    PreparedDataset {
        dataset,
        user_id,
        user_driver,
        class_slots,
        lap_flags,
    }
}

/// Keep only drivers still running at the finish
pub fn drop_not_running(dataset: &mut EventDataset) {
    dataset.drivers.retain(|d| d.result_status.is_running());
}

/// Stable ascending sort by median, then re-rank the displayed finish position
///
/// Multiclass views re-rank the overall position, single class views the
/// in-class one.
pub fn sort_by_speed(dataset: &mut EventDataset, multiclass: bool) {
    dataset
        .drivers
        .sort_by(|a, b| a.stats.median.total_cmp(&b.stats.median));
    for (i, driver) in dataset.drivers.iter_mut().enumerate() {
        let rank = i as u32 + 1;
        if multiclass {
            driver.finish_position = driver.finish_position.reranked(rank);
        } else {
            driver.finish_position_in_class = driver.finish_position_in_class.reranked(rank);
        }
    }
}

fn classify_laps(dataset: &EventDataset, options: &ViewOptions) -> Vec<Vec<LapFlags>> {
    let mut flags: Vec<Vec<LapFlags>> = dataset
        .drivers
        .iter()
        .map(|d| vec![LapFlags::default(); d.laps.len()])
        .collect();

    if options.laps.fastest_per_driver {
        for (driver, laps) in dataset.drivers.iter().zip(flags.iter_mut()) {
            if let Some(lap) = driver.fastest_lap() {
                laps[lap].fastest_personal = true;
            }
        }
    }

    if options.laps.fastest_overall {
        let fastest = dataset
            .drivers
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.fastest_lap().map(|lap| (i, lap, d.laps[lap])))
            .min_by(|a, b| a.2.total_cmp(&b.2));
        if let Some((driver, lap, _)) = fastest {
            flags[driver][lap].fastest_overall = true;
        }
    }

    flags
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::{BoxplotStats, FinishPosition, ResultStatus};

    pub(crate) fn driver(id: u64, class: u32, median: f64, status: ResultStatus) -> Driver {
        Driver {
            id: DriverId(id),
            name: format!("Driver {}", id),
            car_class_id: CarClassId(class),
            result_status: status,
            finish_position: FinishPosition::Official(id as u32),
            finish_position_in_class: FinishPosition::Official(id as u32),
            laps: vec![median - 0.5, median, median + 0.5],
            stats: BoxplotStats {
                median,
                mean: median + 0.1,
                q1: median - 0.3,
                q3: median + 0.3,
                whisker_top: median + 0.5,
                whisker_bottom: median - 0.5,
                ..BoxplotStats::default()
            },
        }
    }

    pub(crate) fn sample() -> EventDataset {
        let mut data = EventDataset {
            drivers: vec![
                driver(1, 4, 95.0, ResultStatus::Running),
                driver(2, 4, 90.0, ResultStatus::Running),
                driver(3, 5, 100.0, ResultStatus::Disconnected),
                driver(4, 5, 92.0, ResultStatus::Running),
                driver(5, 4, 90.0, ResultStatus::Disqualified),
            ],
            ..EventDataset::default()
        };
        data.metadata.timeframe = [85.0, 105.0];
        data.metadata.median = 95.0;
        data.metadata.car_classes = vec![CarClassId(4), CarClassId(5)];
        data
    }

    fn ids(prepared: &PreparedDataset) -> Vec<u64> {
        prepared.dataset.drivers.iter().map(|d| d.id.0).collect()
    }

    #[test]
    fn test_single_class_filter() {
        let opts = ViewOptions {
            show_disc_disq: true,
            ..ViewOptions::default()
        };
        let prepared = prepare(&sample(), &opts, Some(DriverId(1)));
        assert_eq!(ids(&prepared), vec![1, 2, 5]);
    }

    #[test]
    fn test_drop_disc_disq() {
        let opts = ViewOptions {
            multiclass: true,
            ..ViewOptions::default()
        };
        let prepared = prepare(&sample(), &opts, Some(DriverId(1)));
        assert_eq!(ids(&prepared), vec![1, 2, 4]);

        // Dropping twice changes nothing
        let mut again = prepared.dataset.clone();
        drop_not_running(&mut again);
        assert_eq!(again, prepared.dataset);
    }

    #[test]
    fn test_sort_by_speed_reranks() {
        let opts = ViewOptions {
            multiclass: true,
            show_disc_disq: true,
            sort_by_speed: true,
            ..ViewOptions::default()
        };
        let prepared = prepare(&sample(), &opts, Some(DriverId(1)));
        let medians: Vec<f64> = prepared.dataset.drivers.iter().map(|d| d.stats.median).collect();
        assert!(medians.windows(2).all(|w| w[0] <= w[1]));

        // Ties keep input order
        assert_eq!(ids(&prepared), vec![2, 5, 4, 1, 3]);
        let first = &prepared.dataset.drivers[0];
        assert_eq!(first.finish_position.to_string(), "1 (2)");
        // Single class field untouched in multiclass mode
        assert_eq!(first.finish_position_in_class, FinishPosition::Official(2));
    }

    #[test]
    fn test_sort_is_idempotent() {
        let opts = ViewOptions {
            show_disc_disq: true,
            sort_by_speed: true,
            ..ViewOptions::default()
        };
        let once = prepare(&sample(), &opts, Some(DriverId(1)));
        let twice = prepare(&once.dataset, &opts, Some(DriverId(1)));
        assert_eq!(once.dataset, twice.dataset);
        assert_eq!(
            once.dataset.drivers[2].finish_position_in_class.to_string(),
            "3 (1)"
        );
    }

    #[test]
    fn test_input_not_mutated() {
        let raw = sample();
        let opts = ViewOptions {
            sort_by_speed: true,
            ..ViewOptions::default()
        };
        let _ = prepare(&raw, &opts, Some(DriverId(1)));
        assert_eq!(raw, sample());
    }

    #[test]
    fn test_missing_user_uses_placeholder() {
        let opts = ViewOptions {
            multiclass: true,
            ..ViewOptions::default()
        };
        let prepared = prepare(&sample(), &opts, Some(DriverId(99)));
        assert_eq!(prepared.user_driver, Driver::placeholder());
        assert_eq!(prepared.user_class(), CarClassId(0));
        assert!(!prepared.dataset.drivers.iter().any(|d| prepared.is_user(d)));
    }

    #[test]
    fn test_class_slots() {
        let classes = [CarClassId(4), CarClassId(5), CarClassId(6)];
        let slots = ClassSlots::assign(&classes, CarClassId(5), true);
        assert_eq!(slots.slot_for(CarClassId(5)), ClassSlot::DEFAULT);
        assert_eq!(slots.slot_for(CarClassId(4)), ClassSlot(1));
        assert_eq!(slots.slot_for(CarClassId(6)), ClassSlot(2));

        // Off in single class mode
        let single = ClassSlots::assign(&classes, CarClassId(5), false);
        assert_eq!(single.slot_for(CarClassId(4)), ClassSlot::DEFAULT);
    }

    #[test]
    fn test_class_slots_overflow_to_default() {
        let classes: Vec<CarClassId> = (1..=7).map(CarClassId).collect();
        let slots = ClassSlots::assign(&classes, CarClassId(1), true);
        assert_eq!(slots.slot_for(CarClassId(5)), ClassSlot(4));
        assert_eq!(slots.slot_for(CarClassId(6)), ClassSlot::DEFAULT);
    }

    #[test]
    fn test_lap_flags() {
        let mut opts = ViewOptions {
            multiclass: true,
            ..ViewOptions::default()
        };
        opts.laps.enabled = true;
        opts.laps.fastest_overall = true;
        opts.laps.fastest_per_driver = true;
        let prepared = prepare(&sample(), &opts, Some(DriverId(1)));

        // Driver 2 (median 90) owns the fastest lap, its first one
        assert!(prepared.lap_flags(1, 0).fastest_overall);
        assert!(!prepared.lap_flags(0, 0).fastest_overall);
        assert!(prepared.lap_flags(0, 0).fastest_personal);
        assert!(!prepared.lap_flags(0, 1).fastest_personal);
        assert!(!prepared.lap_flags(0, 0).incident);
        assert_eq!(prepared.lap_flags(10, 0), LapFlags::default());
    }
}
