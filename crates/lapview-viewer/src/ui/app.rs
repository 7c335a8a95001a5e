//! Main iced application for the lap-time viewer
//!
//! This is the entry point for the GUI. It manages:
//! - The chart session (dataset, options, view state)
//! - The render loop and its frame subscription
//! - Layout of the chart and the side panel

use std::path::PathBuf;
use std::time::Instant;

use iced::widget::{container, row};
use iced::{window, Element, Fill, Subscription, Task, Theme};

use lapview_core::geometry;
use lapview_core::interaction::PointerInput;
use lapview_core::loader::load_dataset;
use lapview_core::render::{DrawList, FrameScheduler, RenderLoop};
use lapview_core::style::StyleConfig;
use lapview_core::{ChartSession, EventDataset};
use lapview_widgets::{boxplot_chart, ChartGeometry};

use super::options_panel::{self, OptionToggle, PANEL_WIDTH};
use crate::config::{self, ViewerConfig};

/// Pending frame request, consumed by the `window::frames` subscription
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameRequest {
    pending: bool,
}

impl FrameRequest {
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

impl FrameScheduler for FrameRequest {
    fn schedule_next(&mut self) {
        self.pending = true;
    }
}

/// Application state
pub struct LapviewApp {
    session: ChartSession,
    /// Last frame recorded by the render loop, replayed by the canvas
    draw_list: DrawList,
    render_loop: RenderLoop,
    frames: FrameRequest,
    config: ViewerConfig,
    config_path: PathBuf,
    /// Status line shown at the bottom of the side panel
    status: String,
}

/// Messages that can be sent to the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Frame clock tick
    Frame(Instant),
    /// Pointer input over the chart, plot-area coordinates
    Pointer(PointerInput),
    /// Chart widget resized, new plot-area size
    PlotResized(geometry::Size),
    /// Background dataset load finished
    DatasetLoaded(PathBuf, Result<EventDataset, String>),
    /// Diagram option switched
    SetOption(OptionToggle, bool),
    /// Background config save finished
    ConfigSaved(Result<(), String>),
}

impl LapviewApp {
    /// Create the application without loading anything
    pub fn new(config: ViewerConfig, style: StyleConfig, config_path: PathBuf) -> Self {
        let layout = &style.layout;
        let viewport = geometry::Size::new(
            (config.window.width - PANEL_WIDTH - layout.gutter_width).max(0.0),
            (config.window.height - layout.footer_height).max(0.0),
        );
        let mut session = ChartSession::new(style, viewport);
        session.set_options(config.options);
        session.set_user(config.user_id);

        let mut frames = FrameRequest::default();
        // First frame is always painted
        frames.schedule_next();

        Self {
            session,
            draw_list: DrawList::new(),
            render_loop: RenderLoop::new(config.render_mode),
            frames,
            config,
            config_path,
            status: String::from("No dataset loaded"),
        }
    }

    /// Boot: create the app and start loading the configured dataset
    pub fn boot(config: ViewerConfig, style: StyleConfig, config_path: PathBuf) -> (Self, Task<Message>) {
        let dataset_path = config.dataset_path.clone();
        let mut app = Self::new(config, style, config_path);
        let task = match dataset_path {
            Some(path) => {
                app.status = format!("Loading {}", path.display());
                load_task(path)
            }
            None => {
                log::info!("boot: No dataset given, starting empty");
                Task::none()
            }
        };
        (app, task)
    }

    /// Update state based on message
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::Frame(_) => {
                self.frames.pending = false;
                self.render_loop
                    .run_frame(&mut self.session, &mut self.draw_list, &mut self.frames);
                return Task::none();
            }

            Message::Pointer(input) => {
                self.session.handle_pointer(input);
                Task::none()
            }

            Message::PlotResized(size) => {
                self.session.resize(size);
                Task::none()
            }

            Message::DatasetLoaded(path, result) => {
                match result {
                    Ok(dataset) => {
                        self.status = format!(
                            "{}: {} drivers",
                            path.display(),
                            dataset.drivers.len()
                        );
                        let user_missing = self
                            .session
                            .user_id()
                            .is_some_and(|id| dataset.driver(id).is_none());
                        if user_missing {
                            self.status.push_str(" (you are not in this event)");
                        }
                        self.session.set_dataset(dataset);
                    }
                    Err(e) => {
                        log::warn!("DatasetLoaded: {}", e);
                        self.status = format!("Failed to load {}: {}", path.display(), e);
                    }
                }
                Task::none()
            }

            Message::SetOption(toggle, value) => {
                let options = toggle.apply(*self.session.options(), value);
                self.session.set_options(options);
                self.config.options = options;

                let config = self.config.clone();
                let path = self.config_path.clone();
                Task::perform(
                    async move { config::save_config(&config, &path).map_err(|e| format!("{:#}", e)) },
                    Message::ConfigSaved,
                )
            }

            Message::ConfigSaved(result) => {
                if let Err(e) = result {
                    log::warn!("ConfigSaved: {}", e);
                    self.status = format!("Settings save failed: {}", e);
                }
                Task::none()
            }
        };

        self.render_loop.wake(&self.session, &mut self.frames);
        task
    }

    /// Frame clock, only while a frame is requested
    pub fn subscription(&self) -> Subscription<Message> {
        if self.frames.is_pending() {
            window::frames().map(Message::Frame)
        } else {
            Subscription::none()
        }
    }

    /// Build the view
    pub fn view(&self) -> Element<'_, Message> {
        let layout = &self.session.style().layout;
        let chart = boxplot_chart(
            &self.draw_list,
            ChartGeometry {
                gutter_width: layout.gutter_width,
                footer_height: layout.footer_height,
            },
            Message::Pointer,
            Message::PlotResized,
        );

        let panel = options_panel::view(self.session.options(), self.session.highlight(), &self.status);

        container(row![chart, panel].spacing(10))
            .padding(10)
            .width(Fill)
            .height(Fill)
            .into()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn frames(&self) -> FrameRequest {
        self.frames
    }

    pub fn session(&self) -> &ChartSession {
        &self.session
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }
}

fn load_task(path: PathBuf) -> Task<Message> {
    Task::perform(
        async move {
            let result = load_dataset(&path).map_err(|e| e.to_string());
            (path, result)
        },
        |(path, result)| Message::DatasetLoaded(path, result),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lapview_core::render::RenderMode;

    fn app(mode: RenderMode) -> LapviewApp {
        let dir = std::env::temp_dir().join("lapview-viewer-tests");
        let config = ViewerConfig {
            render_mode: mode,
            ..ViewerConfig::default()
        };
        LapviewApp::new(config, StyleConfig::default(), dir.join("config.yaml"))
    }

    #[test]
    fn test_first_frame_is_requested() {
        let app = app(RenderMode::OnDirty);
        assert!(app.frames().is_pending());
        assert!(app.draw_list().is_empty());
    }

    #[test]
    fn test_on_dirty_frame_consumes_request() {
        let mut app = app(RenderMode::OnDirty);
        let _ = app.update(Message::Frame(Instant::now()));
        assert!(!app.frames().is_pending());
        assert_eq!(app.draw_list().generation(), 1);

        // Idle tick while clean: nothing painted, nothing requested
        let _ = app.update(Message::Frame(Instant::now()));
        assert_eq!(app.draw_list().generation(), 1);

        // Input that changes the session arms the next frame
        let _ = app.update(Message::PlotResized(geometry::Size::new(640.0, 480.0)));
        assert!(app.frames().is_pending());
        let _ = app.update(Message::Frame(Instant::now()));
        assert_eq!(app.draw_list().generation(), 2);
        assert!(!app.frames().is_pending());
    }

    #[test]
    fn test_continuous_keeps_requesting() {
        let mut app = app(RenderMode::Continuous);
        for _ in 0..3 {
            let _ = app.update(Message::Frame(Instant::now()));
            assert!(app.frames().is_pending());
        }
        assert_eq!(app.draw_list().generation(), 3);
    }

    #[test]
    fn test_failed_load_keeps_session() {
        let mut app = app(RenderMode::OnDirty);
        let _ = app.update(Message::DatasetLoaded(
            PathBuf::from("missing.json"),
            Err("No such file".to_string()),
        ));
        assert!(app.session().dataset().drivers.is_empty());
    }
}
