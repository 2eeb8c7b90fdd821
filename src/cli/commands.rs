//! Subcommand handlers for list-cameras, config actions, and snapshot.

use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;

use super::args::ConfigAction;
use crate::ascii::RenderedGrid;
use crate::camera::{self, CameraCapture, CameraError};
use crate::config::{default_path, Config, ConfigError};
use crate::pipeline::{FrameSource, Pipeline, RenderSettings, TickOutcome};

/// Poll interval while waiting for the first frame.
const SNAPSHOT_POLL: Duration = Duration::from_millis(20);

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no camera frame within {0:?}")]
    Timeout(Duration),
    #[error("camera stream ended before the first frame")]
    SourceEnded,
}

/// List available cameras and print them to stdout.
pub fn list_cameras() -> Result<(), CameraError> {
    let devices = camera::list_devices()?;
    if devices.is_empty() {
        println!("No cameras found.");
        println!();
        println!("Make sure your camera is connected and permissions are granted.");
        println!("On macOS, grant access in System Settings > Privacy & Security > Camera.");
    } else {
        println!("Available cameras:");
        for device in devices {
            println!("  {}", device);
        }
        println!();
        println!("Use --camera <index> to select a camera.");
    }
    Ok(())
}

/// Handle config subcommand actions.
///
/// `config` is the effective configuration (file plus command-line overrides).
pub fn handle_config_action(
    action: ConfigAction,
    path: Option<&Path>,
    config: &Config,
) -> Result<(), ConfigError> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_path);
    match action {
        ConfigAction::Show => {
            if config_path.exists() {
                println!("# Config file: {} (exists)", config_path.display());
            } else {
                println!("# Config file: {} (not found)", config_path.display());
            }
            println!();
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Init => {
            let written = Config::write_default(Some(&config_path))?;
            println!("Created config file: {}", written.display());
        }
    }
    Ok(())
}

/// Open the configured camera and render one grid.
pub fn snapshot(config: &Config, timeout: Duration) -> Result<RenderedGrid, SnapshotError> {
    let settings = config.render_settings()?;
    let mut camera = CameraCapture::open(config.camera_settings())?;
    camera.start()?;
    render_first_frame(&camera, &settings, timeout)
}

/// Tick a fresh pipeline over `source` until it renders once.
pub fn render_first_frame<S: FrameSource>(
    source: S,
    settings: &RenderSettings,
    timeout: Duration,
) -> Result<RenderedGrid, SnapshotError> {
    let mut pipeline = Pipeline::new(source, settings);
    pipeline.start();

    let deadline = Instant::now() + timeout;
    loop {
        match pipeline.tick(settings) {
            TickOutcome::Rendered => return Ok(pipeline.grid().clone()),
            TickOutcome::Stopped => return Err(SnapshotError::SourceEnded),
            TickOutcome::Skipped(reason) => log::debug!("Snapshot tick skipped: {:?}", reason),
        }
        if Instant::now() >= deadline {
            return Err(SnapshotError::Timeout(timeout));
        }
        std::thread::sleep(SNAPSHOT_POLL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::{Palette, SamplingConfig};
    use crate::camera::Frame;
    use crate::display::DisplayTheme;
    use crate::pipeline::SourceStatus;

    struct Fixed(SourceStatus, Option<Frame>);

    impl FrameSource for Fixed {
        fn status(&self) -> SourceStatus {
            self.0
        }

        fn current_frame(&self) -> Option<Frame> {
            self.1.clone()
        }
    }

    fn settings() -> RenderSettings {
        RenderSettings::new(
            SamplingConfig::from_width(4).unwrap(),
            Palette::custom("AB").unwrap(),
            DisplayTheme::Default,
        )
    }

    #[test]
    fn test_render_first_frame() {
        let frame = Frame::rgb(vec![0; 8 * 8 * 3], 8, 8);
        let grid = render_first_frame(
            Fixed(SourceStatus::Ready, Some(frame)),
            &settings(),
            Duration::from_millis(100),
        )
        .unwrap();
        assert_eq!(grid.as_str(), "AAAA\nAAAA\n");
    }

    #[test]
    fn test_render_first_frame_times_out() {
        let err = render_first_frame(
            Fixed(SourceStatus::NotReady, None),
            &settings(),
            Duration::from_millis(50),
        )
        .unwrap_err();
        assert!(matches!(err, SnapshotError::Timeout(_)));
    }

    #[test]
    fn test_render_first_frame_source_ended() {
        let err = render_first_frame(
            Fixed(SourceStatus::Ended, None),
            &settings(),
            Duration::from_millis(50),
        )
        .unwrap_err();
        assert!(matches!(err, SnapshotError::SourceEnded));
    }

    #[test]
    fn test_config_init_then_show() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        handle_config_action(ConfigAction::Init, Some(&path), &Config::default()).unwrap();
        assert!(path.exists());

        assert!(matches!(
            handle_config_action(ConfigAction::Init, Some(&path), &Config::default()),
            Err(ConfigError::AlreadyExists(_))
        ));
        handle_config_action(ConfigAction::Show, Some(&path), &Config::default()).unwrap();
    }
}
