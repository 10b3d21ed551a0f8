//! Headless command-line front end: snap a saved camera onto an axis, or
//! print the options schema.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use viewsync::backend::headless::HeadlessBackend;
use viewsync::backend::RendererHandle;
use viewsync::camera::AxisRequest;
use viewsync::error::ViewSyncError;
use viewsync::input::ViewEvent;
use viewsync::options::ViewOptions;
use viewsync::view::{PlotView, ViewModel};

#[derive(Parser)]
#[command(name = "viewsync", version, about)]
struct Cli {
    /// TOML options preset.
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply a camera state and snap it onto a coordinate axis.
    Align {
        /// JSON file holding the camera state.
        #[arg(long)]
        camera: PathBuf,
        /// Axis to look down, e.g. `+x`, `-z`.
        #[arg(long, allow_hyphen_values = true)]
        axis: AxisRequest,
    },
    /// Print the JSON schema of the options file.
    Schema,
}

fn run(cli: Cli) -> Result<(), ViewSyncError> {
    let options = match &cli.options {
        Some(path) => ViewOptions::load(path)?,
        None => ViewOptions::default(),
    };
    let mut out = std::io::stdout().lock();

    match cli.command {
        Command::Align { camera, axis } => {
            let content = std::fs::read_to_string(&camera)?;
            let value = serde_json::from_str(&content)?;
            let mut view = PlotView::new(
                HeadlessBackend::new(),
                ViewModel::default(),
                options,
            );
            let _ = view.set_camera(value)?;

            if view.on_orientation_change(axis.direction()).is_none() {
                return Err(ViewSyncError::DegenerateCamera {
                    distance: view.backend().camera().pose().distance(),
                });
            }
            // The in-memory camera has no modified notification to deliver.
            view.handle(ViewEvent::CameraModified);
            log::info!("snapped {} to {axis}", camera.display());
            let snapped = serde_json::to_string_pretty(&view.model().camera)?;
            writeln!(out, "{snapped}")?;
        }
        Command::Schema => {
            let schema = ViewOptions::json_schema();
            writeln!(out, "{}", serde_json::to_string_pretty(&schema)?)?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
