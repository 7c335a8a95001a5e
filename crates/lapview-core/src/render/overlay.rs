//! Screen-space labels: lap time ticks, driver labels and the hover detail

use super::paint::TickLevel;
use super::surface::{HAlign, Layer, Rect, Surface, TextLabel, Transform2D, VAlign};
use super::FrameContext;
use crate::geometry::{GeometryRecord, Point};
use crate::hit_test::PrimitiveKind;
use crate::style::{DetailColors, StyleResolver};
use crate::transform::{format_delta, format_lap_time};
use crate::types::DriverId;

/// What the hover detail label shows
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightDetail {
    pub driver_id: DriverId,
    pub driver_name: String,
    pub kind: PrimitiveKind,
    /// 1-based lap number for lap highlights
    pub lap_number: Option<usize>,
    pub seconds: f64,
    /// `m:ss.fff`
    pub time: String,
    /// Gap to the user's value, only in faster/slower mode for median and mean
    pub delta: Option<String>,
    /// Primitive anchor in plot space
    pub anchor: Point,
}

impl HighlightDetail {
    pub fn text(&self) -> String {
        let mut text = match self.lap_number {
            Some(lap) => format!("L{} {}", lap, self.time),
            None => self.time.clone(),
        };
        if let Some(delta) = &self.delta {
            text.push_str(&format!(" ({})", delta));
        }
        text
    }
}

fn find_record<'a>(ctx: &'a FrameContext<'_>, id: DriverId) -> Option<&'a GeometryRecord> {
    ctx.geometry.iter().find(|r| r.driver_id == id)
}

/// Resolve the current highlight against the geometry cache
pub(crate) fn highlight_detail(ctx: &FrameContext<'_>) -> Option<HighlightDetail> {
    let highlight = ctx.view.highlight?;
    let record = find_record(ctx, highlight.driver_id)?;
    let driver = ctx.prepared.dataset.drivers.get(record.driver_index)?;
    let stats = &driver.stats;
    let user = &ctx.prepared.user_driver.stats;

    let (seconds, anchor, user_value) = match highlight.kind {
        PrimitiveKind::Median => (
            stats.median,
            Point::new(record.median.x_end, record.median.y),
            Some(user.median),
        ),
        PrimitiveKind::Mean => (stats.mean, record.mean?, Some(user.mean)),
        PrimitiveKind::Q1 => (stats.q1, Point::new(record.q1.x_end, record.q1.y), None),
        PrimitiveKind::Q3 => (stats.q3, Point::new(record.q3.x_end, record.q3.y), None),
        PrimitiveKind::WhiskerTop => (
            stats.whisker_top,
            Point::new(record.whisker_top.x_end, record.whisker_top.y),
            None,
        ),
        PrimitiveKind::WhiskerBottom => (
            stats.whisker_bottom,
            Point::new(record.whisker_bottom.x_end, record.whisker_bottom.y),
            None,
        ),
        PrimitiveKind::Lap => {
            let key = highlight.lap?;
            let lap = record.laps.as_ref()?.get(key.index)?;
            (lap.seconds, lap.position, None)
        }
    };

    let delta = user_value
        .filter(|_| ctx.options.faster_slower && driver.result_status.is_running())
        .map(|user_value| format_delta(seconds - user_value))
        .filter(|d| !d.is_empty());

    Some(HighlightDetail {
        driver_id: driver.id,
        driver_name: driver.name.clone(),
        kind: highlight.kind,
        lap_number: highlight.lap.map(|l| l.index + 1),
        seconds,
        time: format_lap_time(seconds),
        delta,
        anchor,
    })
}

pub(crate) fn paint_tick_labels<S: Surface + ?Sized>(ctx: &FrameContext<'_>, surface: &mut S) {
    let layout = &ctx.style.layout;
    let colors = &ctx.style.diagram;
    let s = ctx.scale();
    let height = ctx.viewport.height;
    surface.begin_layer(
        Layer::TickLabels,
        Rect::new(0.0, 0.0, layout.gutter_width - layout.axis_strip_width, height),
        Transform2D::IDENTITY,
    );
    surface.clear(
        Rect::new(0.0, 0.0, layout.gutter_width - layout.axis_strip_width, height),
        colors.background,
    );

    let end = ctx.prepared.dataset.metadata.timeframe_max();
    let label_y = |seconds: f64| {
        (ctx.transform.to_pixel(seconds) - ctx.view.scroll.y) * s
            + layout.tick_label_y_offset
            + ctx.view.camera.y
    };
    let mut emit = |seconds: f64, color| {
        let y = label_y(seconds);
        if 0.0 < y && y < height {
            surface.fill_text(
                TextLabel::new(
                    format_lap_time(seconds),
                    Point::new(layout.tick_label_x, y),
                    layout.tick_label_size,
                    color,
                )
                .aligned(HAlign::Left, VAlign::Baseline),
            );
        }
    };

    // Zoomed out far, label every second full second only
    let every = if s < 0.7 { 2 } else { 1 };
    for seconds in TickLevel::Full.seconds(end).step_by(every) {
        emit(seconds, colors.full_tick_label);
    }
    if s > 2.0 {
        for seconds in TickLevel::Half.seconds(end) {
            emit(seconds, colors.half_tick_label);
        }
    }
}

pub(crate) fn paint_driver_labels<S: Surface + ?Sized>(ctx: &FrameContext<'_>, surface: &mut S) {
    let layout = &ctx.style.layout;
    let colors = &ctx.style.diagram;
    let s = ctx.scale();
    let top = ctx.viewport.height;
    let footer = Rect::new(0.0, top, layout.gutter_width + ctx.viewport.width, layout.footer_height);
    surface.begin_layer(Layer::DriverLabels, footer, Transform2D::IDENTITY);
    surface.clear(footer, colors.background);
    surface.fill_rect(Rect::new(footer.x, top, footer.width, 1.0), colors.footer_separator);

    for (i, driver) in ctx.prepared.dataset.drivers.iter().enumerate() {
        let x = layout.gutter_width
            + (ctx.layout.middle(i) - ctx.view.scroll.x) * s
            + ctx.view.camera.x;
        let is_user = ctx.prepared.is_user(driver);
        let position = if ctx.options.multiclass {
            driver.finish_position
        } else {
            driver.finish_position_in_class
        };
        let (position_color, name_color) = if is_user {
            (colors.user_label, colors.user_label)
        } else {
            (colors.position_label, colors.name_label)
        };

        surface.fill_text(
            TextLabel::new(
                position.to_string(),
                Point::new(x, top + layout.position_label_y),
                layout.driver_label_size,
                position_color,
            )
            .aligned(HAlign::Center, VAlign::Baseline)
            .bold(is_user),
        );
        surface.fill_text(
            TextLabel::new(
                driver.name.clone(),
                Point::new(x, top + layout.name_label_y),
                layout.driver_label_size,
                name_color,
            )
            .aligned(HAlign::Center, VAlign::Baseline)
            .bold(is_user),
        );
    }
}

pub(crate) fn paint_detail<S: Surface + ?Sized>(ctx: &FrameContext<'_>, surface: &mut S) {
    let layout = &ctx.style.layout;
    let size = ctx.chart_size();
    surface.begin_layer(
        Layer::Overlay,
        Rect::new(0.0, 0.0, size.width, size.height),
        Transform2D::IDENTITY,
    );

    let Some(detail) = highlight_detail(ctx) else {
        return;
    };
    let Some(driver) = ctx.prepared.dataset.driver(detail.driver_id) else {
        return;
    };
    let resolver = StyleResolver::new(ctx.style, ctx.prepared, ctx.options);
    let DetailColors { border, background } = resolver.detail_colors(driver, detail.kind);

    let gap = match detail.kind {
        PrimitiveKind::Lap | PrimitiveKind::Mean => layout.detail_dot_gap,
        PrimitiveKind::WhiskerTop | PrimitiveKind::WhiskerBottom => layout.detail_whisker_gap,
        PrimitiveKind::Median | PrimitiveKind::Q1 | PrimitiveKind::Q3 => layout.detail_line_gap,
    };
    let s = ctx.scale();
    let x = detail.anchor.x * s + layout.gutter_width + ctx.view.camera.x + gap;
    let y = detail.anchor.y * s + layout.detail_offset_y + ctx.view.camera.y;

    let text = TextLabel::new(
        detail.text(),
        Point::new(x + 5.0, y + layout.detail_height / 2.0),
        layout.detail_text_size,
        ctx.style.diagram.detail_text,
    );
    let rect = Rect::new(x, y, text.approx_width() + 10.0, layout.detail_height);
    surface.fill_rect(rect, background);
    surface.stroke_rect(rect, 1.0, border);
    surface.fill_text(text);
}
