use clap::Parser;
use std::sync::Arc;
use std::time::Duration;

use glyphcam::camera::{CameraCapture, CameraError};
use glyphcam::cli::{self, Args, Command};
use glyphcam::config::Config;
use glyphcam::event_loop::{self, App, LoopExit};
use glyphcam::export::{self, Exporter};
use glyphcam::logging;
use glyphcam::terminal::{StatusBar, Tui};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), BoxError> {
    let mut config = Config::load(args.config.as_deref())?;
    args.apply_to(&mut config);
    logging::init(args.log_file.as_deref(), args.verbose)?;

    match args.command {
        Some(Command::ListCameras) => {
            cli::list_cameras()?;
            return Ok(());
        }
        Some(Command::Config { action }) => {
            cli::handle_config_action(action, args.config.as_deref(), &config)?;
            return Ok(());
        }
        Some(Command::Snapshot { timeout }) => {
            let grid = cli::snapshot(&config, Duration::from_secs(timeout))?;
            print!("{}", grid);
            return Ok(());
        }
        None => {}
    }

    let settings = config.render_settings()?;
    let sizer = config.char_sizer()?;

    // The TUI is only entered once the camera stream is open.
    let mut camera = open_camera(&config).map_err(|e| camera_notice(&e))?;

    let exporter: Arc<dyn Exporter> = Arc::from(export::detect_exporter());

    let mut tui = Tui::new()?;
    let area = tui.area()?;
    let mut app = App::new(
        &camera,
        settings,
        sizer,
        StatusBar::with_visibility(config.ui.status_bar),
        area,
    );

    let exit = event_loop::run(&mut tui, &mut app, config.render.fps, exporter).await;

    drop(app);
    tui.restore()?;
    camera.stop();

    match exit? {
        LoopExit::Quit => Ok(()),
        LoopExit::SourceEnded => Err("camera stream ended".into()),
    }
}

fn open_camera(config: &Config) -> Result<CameraCapture, CameraError> {
    let mut camera = CameraCapture::open(config.camera_settings())?;
    camera.start()?;
    Ok(camera)
}

/// One-time message shown when the camera cannot be used.
fn camera_notice(err: &CameraError) -> String {
    match err {
        CameraError::NoDevices => {
            format!("{}. Connect a camera and run 'glyphcam list-cameras'", err)
        }
        _ => err.to_string(),
    }
}
