//! Lapview - interactive boxplot of per-driver lap times
//!
//! This is the main entry point for the GUI application. It:
//! 1. Loads the viewer config and the style file
//! 2. Applies command line overrides
//! 3. Launches the iced GUI application
//!
//! ## Command line
//!
//! `lapview-viewer [DATASET.json] [--user ID] [--on-dirty]`
//!
//! - `DATASET.json`: race snapshot to open (default: `dataset_path` from the config)
//! - `--user ID`: driver to highlight as "you"
//! - `--on-dirty`: repaint only after input instead of every frame

mod cli;
mod config;
mod ui;

use iced::{Size, Task};

use lapview_core::style::{load_style, StyleConfig};
use ui::{app::Message, LapviewApp};

fn main() -> iced::Result {
    // Parse command line arguments
    let cli = match cli::CliArgs::parse(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("lapview-viewer: {:#}", e);
            eprintln!("{}", cli::USAGE);
            std::process::exit(2);
        }
    };
    if cli.help {
        println!("{}", cli::USAGE);
        return Ok(());
    }

    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("lapview-viewer starting up");

    let config_path = config::default_config_path();
    let mut viewer_config = config::load_config(&config_path);
    cli.apply(&mut viewer_config);

    let style: StyleConfig = load_style(&config::default_style_path());
    let window_size = Size::new(viewer_config.window.width, viewer_config.window.height);

    iced::application(
        move || LapviewApp::boot(viewer_config.clone(), style.clone(), config_path.clone()),
        update,
        view,
    )
    .subscription(subscription)
    .theme(theme)
    .title("Lapview")
    .window_size(window_size)
    .run()
}

/// Update function for iced
fn update(app: &mut LapviewApp, message: Message) -> Task<Message> {
    app.update(message)
}

/// View function for iced
fn view(app: &LapviewApp) -> iced::Element<'_, Message> {
    app.view()
}

/// Subscription function for iced
fn subscription(app: &LapviewApp) -> iced::Subscription<Message> {
    app.subscription()
}

/// Theme function for iced
fn theme(app: &LapviewApp) -> iced::Theme {
    app.theme()
}
