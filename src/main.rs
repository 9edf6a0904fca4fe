//! MacSlide - slide-out panel engine
//!
//! Shows a slide-out panel when the cursor dwells at a true outer screen
//! edge or a global hotkey fires, and hides it again after the cursor
//! idles elsewhere.

mod config;
mod input;
mod panel;
mod screen;
mod store;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;
use input::{CursorCapture, HotkeyListener, PanelCommand, SystemCursorCapture};
use panel::{PanelController, PanelEvent, PanelSurface, VirtualPanel};
use screen::{EdgeMonitor, EdgeSample, Point, ScreenSource, SystemScreens};
use store::{FileLayoutStore, LayoutStore};

/// MacSlide - slide-out panel engine
#[derive(Parser)]
#[command(name = "macslide")]
#[command(author = "MacSlide Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Slide-out panel triggered by screen-edge gestures", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the panel engine
    Run,

    /// Show current configuration
    Config {
        /// Generate sample configuration
        #[arg(long)]
        generate: bool,

        /// Output path for generated config
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show system information
    Info,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        Config::load(config_path)?
    } else {
        Config::load_default().unwrap_or_default()
    };

    match cli.command {
        Commands::Run => {
            run_engine(config).await?;
        }
        Commands::Config { generate, output } => {
            if generate {
                let sample = config::generate_sample_config();
                if let Some(path) = output {
                    std::fs::write(&path, &sample)?;
                    println!("Configuration written to: {}", path.display());
                } else {
                    println!("{}", sample);
                }
            } else {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        }
        Commands::Info => {
            print_system_info();
        }
    }

    Ok(())
}

/// Run the panel engine event loop.
///
/// Everything that touches detector or panel state happens inside this
/// one task; cursor events, timers and animation completions are all
/// marshaled here through channels, so processing order is arrival order.
async fn run_engine(config: Config) -> anyhow::Result<()> {
    let screens = SystemScreens::new();

    let store_path = FileLayoutStore::default_path();
    let store = FileLayoutStore::open_or_empty(&store_path);

    let (panel_tx, mut panel_rx) = mpsc::channel(32);
    let surface = VirtualPanel::new(panel_tx);
    let mut controller = PanelController::new(surface, store, config.panel_config());
    let mut detector = EdgeMonitor::new(config.trigger_config());

    let mut capture = SystemCursorCapture::new();
    let mut cursor_rx = capture.start().await?;

    let mut hotkeys = HotkeyListener::new();
    let mut command_rx = hotkeys.start()?;

    // Park the panel off-screen on the current monitor before anything
    // can trigger it.
    controller.prepare(screens.cursor_position(), &screens.monitors());

    tracing::info!(
        "MacSlide engine running: edge {:?}, dwell {}ms, cooldown {}ms",
        config.gesture.edge,
        config.gesture.dwell_ms,
        config.gesture.cooldown_ms,
    );
    println!("MacSlide running on the {:?} edge. Press Ctrl+C to stop.", config.gesture.edge);

    // Fallback polls: the edge poll guarantees detection when movement
    // events are suppressed or the cursor parks exactly on the boundary;
    // the hide poll keeps the idle timer honest while the mouse is still.
    let mut edge_poll =
        tokio::time::interval(Duration::from_millis(config.gesture.poll_interval_ms));
    let mut hide_poll =
        tokio::time::interval(Duration::from_millis(config.panel.auto_hide_poll_ms));

    loop {
        tokio::select! {
            Some(sample) = cursor_rx.recv() => {
                step(&mut detector, &mut controller, &screens, sample.position);
            }
            _ = edge_poll.tick() => {
                let position = screens.cursor_position();
                step(&mut detector, &mut controller, &screens, position);
            }
            _ = hide_poll.tick() => {
                let monitors = screens.monitors();
                controller.sample_cursor(Instant::now(), screens.cursor_position(), &monitors);
            }
            Some(event) = panel_rx.recv() => {
                match event {
                    PanelEvent::AnimationDone => controller.animation_finished(),
                    PanelEvent::FrameChanged(frame) => {
                        let monitors = screens.monitors();
                        controller.record_layout(frame, &monitors);
                    }
                }
            }
            Some(command) = command_rx.recv() => {
                let monitors = screens.monitors();
                let position = screens.cursor_position();
                match command {
                    PanelCommand::Toggle => controller.toggle(position, &monitors),
                    PanelCommand::ShowIfHidden => controller.show_if_hidden(position, &monitors),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("\nShutting down...");
                break;
            }
        }
    }

    capture.stop().await?;
    hotkeys.invalidate();
    tracing::info!("MacSlide engine stopped");

    Ok(())
}

/// Feed one cursor sample to both detectors.
///
/// The movement event stream and the fallback poll converge here, so both
/// sources share identical gesture semantics.
fn step<S, P>(
    detector: &mut EdgeMonitor,
    controller: &mut PanelController<S, P>,
    screens: &impl ScreenSource,
    position: Point,
) where
    S: PanelSurface,
    P: LayoutStore,
{
    let now = Instant::now();
    let monitors = screens.monitors();

    if detector.sample(now, position, &monitors) == EdgeSample::Triggered {
        tracing::info!("edge gesture recognized");
        controller.show_if_hidden(position, &monitors);
    }

    controller.sample_cursor(now, position, &monitors);
}

/// Print system information
fn print_system_info() {
    let screens = SystemScreens::new();

    println!("MacSlide System Information");
    println!("===========================\n");

    println!("Platform: {}", input::platform_name());
    for monitor in screens.monitors() {
        println!(
            "Display {}: {}x{} at ({}, {})",
            monitor.id,
            monitor.frame.width,
            monitor.frame.height,
            monitor.frame.x,
            monitor.frame.y,
        );
    }

    println!("\nLayout store: {}", FileLayoutStore::default_path().display());

    #[cfg(target_os = "macos")]
    {
        println!("\nmacOS Requirements:");
        println!("  - Accessibility permissions required for global mouse monitoring");
        println!("  - System Preferences > Security & Privacy > Privacy > Accessibility");
    }
}
