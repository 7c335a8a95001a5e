//! Render loop
//!
//! One frame paints, back to front: the plot (clear, grid, boxplots), the
//! axis strip, the lap time labels, the driver labels and the hover detail.
//! Frames are driven by an injected [`FrameScheduler`] so the loop works the
//! same under a GUI frame clock and under test.

mod frame;
mod overlay;
mod paint;
mod surface;

pub use frame::{DrawCommand, DrawList, RecordedLayer};
pub use overlay::HighlightDetail;
pub use surface::{HAlign, Layer, Rect, Surface, TextLabel, Transform2D, VAlign};

pub(crate) use overlay::highlight_detail;

use serde::{Deserialize, Serialize};

use crate::geometry::{BoxLayout, GeometryRecord, Size, Vector};
use crate::interaction::ViewState;
use crate::options::ViewOptions;
use crate::pipeline::PreparedDataset;
use crate::session::ChartSession;
use crate::style::StyleConfig;
use crate::transform::TimeTransform;

/// When the loop repaints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Repaint every frame and always request the next one
    #[default]
    Continuous,
    /// Repaint only when the session changed; the host wakes the loop
    OnDirty,
}

/// Requests another frame from the host's frame clock
pub trait FrameScheduler {
    fn schedule_next(&mut self);
}

/// Everything a frame reads, borrowed from the session
pub struct FrameContext<'a> {
    pub style: &'a StyleConfig,
    pub options: &'a ViewOptions,
    pub prepared: &'a PreparedDataset,
    pub transform: &'a TimeTransform,
    pub layout: &'a BoxLayout,
    pub geometry: &'a [GeometryRecord],
    pub view: &'a ViewState,
    /// Plot area size
    pub viewport: Size,
}

impl FrameContext<'_> {
    pub fn scale(&self) -> f32 {
        self.view.scale.x
    }

    /// Whole widget: gutter + plot, plot + footer
    pub fn chart_size(&self) -> Size {
        let layout = &self.style.layout;
        Size::new(
            layout.gutter_width + self.viewport.width,
            self.viewport.height + layout.footer_height,
        )
    }

    pub fn plot_rect(&self) -> Rect {
        Rect::new(
            self.style.layout.gutter_width,
            0.0,
            self.viewport.width,
            self.viewport.height,
        )
    }

    pub fn axis_strip_rect(&self) -> Rect {
        let layout = &self.style.layout;
        Rect::new(
            layout.gutter_width - layout.axis_strip_width,
            0.0,
            layout.axis_strip_width,
            self.viewport.height,
        )
    }

    pub fn plot_transform(&self) -> Transform2D {
        Transform2D::new(
            Vector::new(
                self.style.layout.gutter_width + self.view.camera.x,
                self.view.camera.y,
            ),
            self.scale(),
        )
    }

    /// Zoomed like the plot but only the vertical camera offset applies
    pub fn axis_transform(&self) -> Transform2D {
        let layout = &self.style.layout;
        Transform2D::new(
            Vector::new(layout.gutter_width - layout.axis_strip_width, self.view.camera.y),
            self.scale(),
        )
    }
}

/// Paint one complete frame
pub fn paint_frame<S: Surface + ?Sized>(ctx: &FrameContext<'_>, surface: &mut S) {
    surface.begin_frame(ctx.chart_size());
    paint::paint_plot(ctx, surface);
    paint::paint_axis_strip(ctx, surface);
    overlay::paint_tick_labels(ctx, surface);
    overlay::paint_driver_labels(ctx, surface);
    overlay::paint_detail(ctx, surface);
}

/// Self-rescheduling frame driver
#[derive(Debug, Clone, Default)]
pub struct RenderLoop {
    mode: RenderMode,
    frames_painted: u64,
}

impl RenderLoop {
    pub fn new(mode: RenderMode) -> Self {
        log::info!("RenderLoop: mode {:?}", mode);
        Self {
            mode,
            frames_painted: 0,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn frames_painted(&self) -> u64 {
        self.frames_painted
    }

    /// Handle one frame tick, returns whether the surface was repainted
    pub fn run_frame<S, F>(&mut self, session: &mut ChartSession, surface: &mut S, scheduler: &mut F) -> bool
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        let paint = match self.mode {
            RenderMode::Continuous => true,
            RenderMode::OnDirty => session.is_dirty(),
        };
        if paint {
            session.paint(surface);
            session.mark_clean();
            self.frames_painted += 1;
        }
        if self.mode == RenderMode::Continuous {
            scheduler.schedule_next();
        }
        paint
    }

    /// Called by the host after feeding input; arms a frame when one is due
    pub fn wake<F: FrameScheduler + ?Sized>(&self, session: &ChartSession, scheduler: &mut F) {
        if self.mode == RenderMode::OnDirty && session.is_dirty() {
            scheduler.schedule_next();
        }
    }
}
