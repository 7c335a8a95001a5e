//! Side panel: diagram toggles and the hover detail

use iced::widget::{checkbox, column, container, text, Space};
use iced::{Element, Length};

use lapview_core::options::ViewOptions;
use lapview_core::render::HighlightDetail;

use super::app::Message;

pub const PANEL_WIDTH: f32 = 260.0;

/// One switch of the diagram options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionToggle {
    ShowDiscDisq,
    Laps,
    FastestOverall,
    FastestPerDriver,
    Incidents,
    ShowMean,
    FasterSlower,
    Multiclass,
    SortBySpeed,
}

impl OptionToggle {
    /// Top-level toggles, in panel order
    pub const MAIN: [OptionToggle; 6] = [
        OptionToggle::ShowDiscDisq,
        OptionToggle::Laps,
        OptionToggle::ShowMean,
        OptionToggle::FasterSlower,
        OptionToggle::Multiclass,
        OptionToggle::SortBySpeed,
    ];

    /// Shown under "Laps" while laps are enabled
    pub const LAP_DETAILS: [OptionToggle; 3] = [
        OptionToggle::FastestOverall,
        OptionToggle::FastestPerDriver,
        OptionToggle::Incidents,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OptionToggle::ShowDiscDisq => "Show disconnected / disqualified",
            OptionToggle::Laps => "Show laps",
            OptionToggle::FastestOverall => "Fastest lap overall",
            OptionToggle::FastestPerDriver => "Fastest lap per driver",
            OptionToggle::Incidents => "Incident laps",
            OptionToggle::ShowMean => "Show mean",
            OptionToggle::FasterSlower => "Faster / slower than me",
            OptionToggle::Multiclass => "All car classes",
            OptionToggle::SortBySpeed => "Sort by median",
        }
    }

    pub fn get(self, options: &ViewOptions) -> bool {
        match self {
            OptionToggle::ShowDiscDisq => options.show_disc_disq,
            OptionToggle::Laps => options.laps.enabled,
            OptionToggle::FastestOverall => options.laps.fastest_overall,
            OptionToggle::FastestPerDriver => options.laps.fastest_per_driver,
            OptionToggle::Incidents => options.laps.incidents,
            OptionToggle::ShowMean => options.show_mean,
            OptionToggle::FasterSlower => options.faster_slower,
            OptionToggle::Multiclass => options.multiclass,
            OptionToggle::SortBySpeed => options.sort_by_speed,
        }
    }

    /// Copy of `options` with this switch set to `value`
    pub fn apply(self, options: ViewOptions, value: bool) -> ViewOptions {
        let mut options = options;
        match self {
            OptionToggle::ShowDiscDisq => options.show_disc_disq = value,
            OptionToggle::Laps => options.laps.enabled = value,
            OptionToggle::FastestOverall => options.laps.fastest_overall = value,
            OptionToggle::FastestPerDriver => options.laps.fastest_per_driver = value,
            OptionToggle::Incidents => options.laps.incidents = value,
            OptionToggle::ShowMean => options.show_mean = value,
            OptionToggle::FasterSlower => options.faster_slower = value,
            OptionToggle::Multiclass => options.multiclass = value,
            OptionToggle::SortBySpeed => options.sort_by_speed = value,
        }
        options
    }
}

fn toggle_row(toggle: OptionToggle, options: &ViewOptions) -> Element<'static, Message> {
    checkbox(toggle.get(options))
        .label(toggle.label())
        .on_toggle(move |value| Message::SetOption(toggle, value))
        .size(16)
        .into()
}

fn detail_view(detail: Option<HighlightDetail>) -> Element<'static, Message> {
    match detail {
        Some(detail) => column![
            text(detail.driver_name.clone()).size(16),
            text(detail.kind.label()).size(12),
            text(detail.text()).size(20),
        ]
        .spacing(4)
        .into(),
        None => text("Hover a boxplot for details").size(12).into(),
    }
}

/// Build the side panel
pub fn view(options: &ViewOptions, detail: Option<HighlightDetail>, status: &str) -> Element<'static, Message> {
    let mut toggles = column![text("Diagram").size(18)].spacing(8);
    for toggle in OptionToggle::MAIN {
        toggles = toggles.push(toggle_row(toggle, options));
        if toggle == OptionToggle::Laps && options.show_laps() {
            let mut details = column![].spacing(6).padding(iced::Padding::ZERO.left(20.0));
            for detail_toggle in OptionToggle::LAP_DETAILS {
                details = details.push(toggle_row(detail_toggle, options));
            }
            toggles = toggles.push(details);
        }
    }

    let content = column![
        toggles,
        Space::new().height(Length::Fixed(20.0)),
        text("Selection").size(18),
        detail_view(detail),
        Space::new().height(Length::Fill),
        text(status.to_string()).size(12),
    ]
    .spacing(8);

    container(content)
        .padding(16)
        .width(Length::Fixed(PANEL_WIDTH))
        .height(Length::Fill)
        .style(container::rounded_box)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lapview_core::geometry::Point;
    use lapview_core::hit_test::PrimitiveKind;
    use lapview_core::DriverId;

    #[test]
    fn test_detail_view_keeps_detail_usable() {
        let detail = HighlightDetail {
            driver_id: DriverId(2),
            driver_name: "Driver 2".to_string(),
            kind: PrimitiveKind::Lap,
            lap_number: Some(3),
            seconds: 95.5,
            time: "1:35.500".to_string(),
            delta: None,
            anchor: Point::new(10.0, 20.0),
        };
        assert_eq!(detail.text(), "L3 1:35.500");
        let _panel = detail_view(Some(detail));
        let _empty = detail_view(None);
    }

    #[test]
    fn test_apply_and_get_agree() {
        let all = OptionToggle::MAIN.iter().chain(OptionToggle::LAP_DETAILS.iter());
        for &toggle in all {
            let on = toggle.apply(ViewOptions::default(), true);
            assert!(toggle.get(&on), "{:?}", toggle);
            assert!(!toggle.get(&toggle.apply(on, false)), "{:?}", toggle);
        }
    }

    #[test]
    fn test_apply_touches_only_one_switch() {
        let options = OptionToggle::Multiclass.apply(ViewOptions::default(), true);
        assert_eq!(
            options,
            ViewOptions {
                multiclass: true,
                ..ViewOptions::default()
            }
        );
        let options = OptionToggle::FastestOverall.apply(options, true);
        assert!(options.laps.fastest_overall);
        assert!(!options.laps.enabled);
    }
}
