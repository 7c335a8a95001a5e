//! Chart session
//!
//! Owns everything one chart needs: the received dataset, the view options,
//! the user identity, the style, the viewport, and what is derived from them
//! (prepared dataset, transform, box layout, geometry cache, view state).
//! Derived state is rebuilt synchronously whenever an input changes.

use crate::geometry::{build_geometry, BoxLayout, GeometryRecord, Size};
use crate::hit_test::{hit_test, Highlight};
use crate::interaction::{PointerInput, ViewState};
use crate::options::ViewOptions;
use crate::pipeline::{prepare, PreparedDataset};
use crate::render::{self, FrameContext, HighlightDetail, Surface};
use crate::style::StyleConfig;
use crate::transform::TimeTransform;
use crate::types::{DriverId, EventDataset};

pub struct ChartSession {
    raw: EventDataset,
    options: ViewOptions,
    user_id: Option<DriverId>,
    style: StyleConfig,
    /// Plot area size (excludes gutter and footer)
    viewport: Size,
    prepared: PreparedDataset,
    transform: TimeTransform,
    layout: BoxLayout,
    geometry: Vec<GeometryRecord>,
    view: ViewState,
    dirty: bool,
}

impl ChartSession {
    pub fn new(style: StyleConfig, viewport: Size) -> Self {
        let raw = EventDataset::default();
        let options = ViewOptions::default();
        let prepared = prepare(&raw, &options, None);
        let transform = TimeTransform::new(
            viewport.height,
            raw.metadata.median,
            style.layout.full_tick_spacing,
        );
        let layout = BoxLayout::fit(0, viewport.width, &style.layout);
        Self {
            raw,
            options,
            user_id: None,
            style,
            viewport,
            prepared,
            transform,
            layout,
            geometry: Vec::new(),
            view: ViewState::default(),
            dirty: true,
        }
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// Replace the dataset wholesale
    pub fn set_dataset(&mut self, dataset: EventDataset) {
        self.raw = dataset;
        self.reprepare();
    }

    pub fn set_options(&mut self, options: ViewOptions) {
        if self.options == options {
            return;
        }
        self.options = options;
        self.reprepare();
    }

    pub fn set_user(&mut self, user_id: Option<DriverId>) {
        if self.user_id == user_id {
            return;
        }
        self.user_id = user_id;
        self.reprepare();
    }

    pub fn set_style(&mut self, style: StyleConfig) {
        self.style = style;
        self.transform = TimeTransform::new(
            self.viewport.height,
            self.raw.metadata.median,
            self.style.layout.full_tick_spacing,
        );
        self.rebuild_geometry();
    }

    /// Plot area resized
    pub fn resize(&mut self, viewport: Size) {
        if self.viewport == viewport {
            return;
        }
        log::debug!(
            "resize: Viewport {}x{} -> {}x{}",
            self.viewport.width,
            self.viewport.height,
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
        self.refresh_transform();
        self.rebuild_geometry();
    }

    /// Feed one pointer event (plot-area coordinates), returns whether anything changed
    pub fn handle_pointer(&mut self, input: PointerInput) -> bool {
        let changed = match input {
            PointerInput::Down(p) => {
                self.view.pointer_down(p);
                false
            }
            PointerInput::Up | PointerInput::Leave => {
                self.view.pointer_up();
                false
            }
            PointerInput::Move(p) => {
                let hovered = self.update_highlight(hit_test(
                    &self.geometry,
                    self.view.to_plot(p),
                    &self.style.props,
                ));
                let panned = self.view.pointer_move(p);
                hovered || panned
            }
            PointerInput::Wheel {
                position,
                delta_y,
                ctrl,
            } => {
                let layout = &self.style.layout;
                let zoomed = self
                    .view
                    .wheel(position, delta_y, ctrl, layout.zoom_step, layout.min_scale);
                if zoomed {
                    // Scroll is baked into the geometry
                    self.rebuild_geometry();
                }
                zoomed
            }
        };
        if changed {
            self.dirty = true;
        }
        changed
    }

    fn update_highlight(&mut self, highlight: Option<Highlight>) -> bool {
        if self.view.highlight == highlight {
            return false;
        }
        self.view.highlight = highlight;
        true
    }

    // -------------------------------------------------------------------------
    // Outputs
    // -------------------------------------------------------------------------

    fn frame(&self) -> FrameContext<'_> {
        FrameContext {
            style: &self.style,
            options: &self.options,
            prepared: &self.prepared,
            transform: &self.transform,
            layout: &self.layout,
            geometry: &self.geometry,
            view: &self.view,
            viewport: self.viewport,
        }
    }

    /// Current highlight, resolved against this frame's geometry
    pub fn highlight(&self) -> Option<HighlightDetail> {
        render::highlight_detail(&self.frame())
    }

    /// Paint a full frame onto `surface`
    pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S) {
        render::paint_frame(&self.frame(), surface);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn user_id(&self) -> Option<DriverId> {
        self.user_id
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Widget size needed for the current viewport
    pub fn chart_size(&self) -> Size {
        self.frame().chart_size()
    }

    pub fn dataset(&self) -> &EventDataset {
        &self.raw
    }

    pub fn prepared(&self) -> &PreparedDataset {
        &self.prepared
    }

    pub fn transform(&self) -> &TimeTransform {
        &self.transform
    }

    pub fn box_layout(&self) -> &BoxLayout {
        &self.layout
    }

    pub fn geometry(&self) -> &[GeometryRecord] {
        &self.geometry
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    // -------------------------------------------------------------------------
    // Rebuilds
    // -------------------------------------------------------------------------

    fn reprepare(&mut self) {
        self.prepared = prepare(&self.raw, &self.options, self.user_id);
        self.refresh_transform();
        self.rebuild_geometry();
    }

    fn refresh_transform(&mut self) {
        if let Some(transform) = self
            .transform
            .rebuilt_for(self.viewport.height, self.raw.metadata.median)
        {
            self.transform = transform;
        }
    }

    fn rebuild_geometry(&mut self) {
        self.layout = BoxLayout::fit(
            self.prepared.dataset.drivers.len(),
            self.viewport.width,
            &self.style.layout,
        );
        self.geometry = build_geometry(
            &self.prepared,
            &self.transform,
            &self.layout,
            &self.options,
            self.view.scroll,
        );
        log::debug!(
            "rebuild_geometry: {} records, box width {:.1}",
            self.geometry.len(),
            self.layout.box_width
        );
        self.dirty = true;
    }
}
