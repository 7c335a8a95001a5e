//! Plot and axis strip painting

use super::surface::{Layer, Rect, Surface};
use super::FrameContext;
use crate::geometry::{GeometryRecord, HLine, Point, VLine};
use crate::hit_test::PrimitiveKind;
use crate::style::{Rgba, StyleResolver};

/// Tick densities, drawn when the zoom passes their threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum TickLevel {
    Full,
    Half,
    Quarter,
}

impl TickLevel {
    /// Seconds from 0 up to (excluding) `end` at this level
    pub(crate) fn seconds(self, end: f64) -> impl Iterator<Item = f64> {
        let (first, step) = match self {
            TickLevel::Full => (0.0, 1.0),
            TickLevel::Half => (0.5, 1.0),
            TickLevel::Quarter => (0.25, 0.5),
        };
        (0..)
            .map(move |i| first + i as f64 * step)
            .take_while(move |&s| s < end)
    }

    fn visible_at(self, scale: f32) -> bool {
        match self {
            TickLevel::Full => true,
            TickLevel::Half => scale > 1.0,
            TickLevel::Quarter => scale > 2.0,
        }
    }

    const ALL: [TickLevel; 3] = [TickLevel::Full, TickLevel::Half, TickLevel::Quarter];
}

// =============================================================================
// Plot layer
// =============================================================================

pub(crate) fn paint_plot<S: Surface + ?Sized>(ctx: &FrameContext<'_>, surface: &mut S) {
    let s = ctx.scale();
    surface.begin_layer(Layer::Plot, ctx.plot_rect(), ctx.plot_transform());

    // Visible region in plot space
    let visible = Rect::new(
        -ctx.view.camera.x / s,
        -ctx.view.camera.y / s,
        ctx.viewport.width / s,
        ctx.viewport.height / s,
    );
    surface.clear(visible, ctx.style.diagram.background);

    paint_grid(ctx, surface, visible);

    let resolver = StyleResolver::new(ctx.style, ctx.prepared, ctx.options);
    for record in ctx.geometry {
        paint_record(ctx, &resolver, record, surface);
    }
}

fn paint_grid<S: Surface + ?Sized>(ctx: &FrameContext<'_>, surface: &mut S, visible: Rect) {
    let s = ctx.scale();
    let end = ctx.prepared.dataset.metadata.timeframe_max();
    let colors = &ctx.style.diagram;

    for level in TickLevel::ALL {
        if !level.visible_at(s) {
            continue;
        }
        let color = match level {
            TickLevel::Full => colors.full_tick,
            TickLevel::Half => colors.half_tick,
            TickLevel::Quarter => colors.quarter_tick,
        };
        for seconds in level.seconds(end) {
            let y = ctx.transform.to_pixel(seconds) - ctx.view.scroll.y;
            if y < visible.y || y > visible.y + visible.height {
                continue;
            }
            surface.stroke_line(
                Point::new(visible.x, y),
                Point::new(visible.x + visible.width, y),
                1.0 / s,
                color,
            );
        }
    }
}

fn hline<S: Surface + ?Sized>(surface: &mut S, line: &HLine, width: f32, color: Rgba) {
    surface.stroke_line(
        Point::new(line.x_start, line.y),
        Point::new(line.x_end, line.y),
        width,
        color,
    );
}

fn vline<S: Surface + ?Sized>(surface: &mut S, line: &VLine, width: f32, color: Rgba) {
    surface.stroke_line(
        Point::new(line.x, line.y_start),
        Point::new(line.x, line.y_end),
        width,
        color,
    );
}

fn paint_record<S: Surface + ?Sized>(
    ctx: &FrameContext<'_>,
    resolver: &StyleResolver<'_>,
    record: &GeometryRecord,
    surface: &mut S,
) {
    let Some(driver) = ctx.prepared.dataset.drivers.get(record.driver_index) else {
        return;
    };
    let s = ctx.scale();
    let props = &ctx.style.props;
    let highlight = ctx
        .view
        .highlight
        .filter(|h| h.driver_id == record.driver_id);
    let selected = |kind: PrimitiveKind| highlight.map(|h| h.kind) == Some(kind);
    let thickness = |kind: PrimitiveKind, base: f32, select: f32| {
        if selected(kind) {
            select / s
        } else {
            base / s
        }
    };

    // Whiskers
    let whisker = resolver.whisker_color(driver);
    let w = &props.whiskers;
    vline(surface, &record.whisker_top_connector, w.thickness / s, whisker);
    hline(surface, &record.whisker_top, thickness(PrimitiveKind::WhiskerTop, w.thickness, w.select), whisker);
    vline(surface, &record.whisker_bottom_connector, w.thickness / s, whisker);
    hline(
        surface,
        &record.whisker_bottom,
        thickness(PrimitiveKind::WhiskerBottom, w.thickness, w.select),
        whisker,
    );

    // Box
    let box_colors = resolver.box_colors(driver);
    let q = &props.quartiles;
    surface.fill_rect(
        Rect::from_corners(
            Point::new(record.q3.x_start, record.q3.y),
            Point::new(record.q1.x_end, record.q1.y),
        ),
        box_colors.fill,
    );
    hline(surface, &record.q3, thickness(PrimitiveKind::Q3, q.thickness, q.select), box_colors.line);
    vline(surface, &record.left_side, props.box_side_thickness / s, box_colors.line);
    vline(surface, &record.right_side, props.box_side_thickness / s, box_colors.line);
    hline(surface, &record.q1, thickness(PrimitiveKind::Q1, q.thickness, q.select), box_colors.line);

    // Median
    let m = &props.median;
    hline(
        surface,
        &record.median,
        thickness(PrimitiveKind::Median, m.thickness, m.select),
        resolver.median_color(driver),
    );

    // Fliers
    let flier = resolver.flier_color();
    for &p in record.fliers_top.iter().chain(record.fliers_bottom.iter()) {
        surface.stroke_circle(p, props.flier_radius, props.flier_thickness, flier);
    }

    // Mean
    if let Some(mean) = record.mean {
        let radius = if selected(PrimitiveKind::Mean) {
            props.mean.select
        } else {
            props.mean.radius
        };
        surface.fill_circle(mean, radius, resolver.mean_color());
    }

    // Laps
    if let Some(laps) = &record.laps {
        let highlighted_lap = highlight.and_then(|h| h.lap).map(|l| l.index);
        for (i, lap) in laps.iter().enumerate() {
            let radius = if highlighted_lap == Some(i) {
                props.laps.select
            } else {
                props.laps.radius
            };
            surface.fill_circle(lap.position, radius, resolver.lap_color(lap.flags));
        }
    }
}

// =============================================================================
// Axis strip
// =============================================================================

pub(crate) fn paint_axis_strip<S: Surface + ?Sized>(ctx: &FrameContext<'_>, surface: &mut S) {
    let s = ctx.scale();
    let layout = &ctx.style.layout;
    let colors = &ctx.style.diagram;
    let scroll_y = ctx.view.scroll.y;
    surface.begin_layer(Layer::AxisStrip, ctx.axis_strip_rect(), ctx.axis_transform());

    surface.clear(
        Rect::new(
            0.0,
            -ctx.view.camera.y / s,
            layout.axis_strip_width / s,
            ctx.viewport.height / s,
        ),
        colors.background,
    );

    let metadata = &ctx.prepared.dataset.metadata;
    let axis_x = layout.y_axis_pos / s;
    surface.stroke_line(
        Point::new(axis_x, ctx.transform.to_pixel(metadata.timeframe_max()) - scroll_y),
        Point::new(axis_x, ctx.transform.to_pixel(metadata.timeframe_min()) - scroll_y),
        1.0 / s,
        colors.y_axis,
    );

    for level in TickLevel::ALL {
        if !level.visible_at(s) {
            continue;
        }
        let (tick_width, color) = match level {
            TickLevel::Full => (layout.full_tick_width, colors.full_tick),
            TickLevel::Half => (layout.half_tick_width, colors.half_tick),
            TickLevel::Quarter => (layout.quarter_tick_width, colors.quarter_tick),
        };
        for seconds in level.seconds(metadata.timeframe_max()) {
            let y = ctx.transform.to_pixel(seconds) - scroll_y;
            let tick_end = (layout.y_axis_pos + tick_width / 2.0) / s;
            surface.stroke_line(
                Point::new((layout.y_axis_pos - tick_width / 2.0) / s, y),
                Point::new(tick_end, y),
                1.0 / s,
                colors.y_axis,
            );
            surface.stroke_line(
                Point::new(tick_end, y),
                Point::new(layout.axis_strip_width / s, y),
                1.0 / s,
                color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_seconds() {
        let full: Vec<f64> = TickLevel::Full.seconds(3.0).collect();
        assert_eq!(full, vec![0.0, 1.0, 2.0]);
        let half: Vec<f64> = TickLevel::Half.seconds(3.0).collect();
        assert_eq!(half, vec![0.5, 1.5, 2.5]);
        let quarter: Vec<f64> = TickLevel::Quarter.seconds(1.5).collect();
        assert_eq!(quarter, vec![0.25, 0.75, 1.25]);
    }

    #[test]
    fn test_tick_thresholds() {
        assert!(TickLevel::Full.visible_at(0.5));
        assert!(!TickLevel::Half.visible_at(1.0));
        assert!(TickLevel::Half.visible_at(1.1));
        assert!(!TickLevel::Quarter.visible_at(2.0));
        assert!(TickLevel::Quarter.visible_at(2.1));
    }
}
