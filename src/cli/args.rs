//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{PaletteArg, PolicyArg, ThemeArg};
use crate::config::Config;

/// Live webcam rendered as ASCII art in the terminal
#[derive(Parser, Debug)]
#[command(name = "glyphcam")]
#[command(version, about = "Live webcam rendered as ASCII art", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Camera device index (from list-cameras)
    #[arg(long)]
    pub camera: Option<u32>,

    /// Sampling width in glyph columns (20-200)
    #[arg(long, short, value_parser = clap::value_parser!(u16).range(20..=200))]
    pub width: Option<u16>,

    /// Glyph palette
    #[arg(long, short)]
    pub palette: Option<PaletteArg>,

    /// Custom glyph ramp, darkest first (overrides --palette)
    #[arg(long)]
    pub glyphs: Option<String>,

    /// Color theme
    #[arg(long, short)]
    pub theme: Option<ThemeArg>,

    /// Glyph sizing policy
    #[arg(long)]
    pub policy: Option<PolicyArg>,

    /// Render rate in frames per second
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: Option<u32>,

    /// Hide status bar
    #[arg(long)]
    pub no_status: bool,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Write diagnostic logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available cameras
    ListCameras,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Render a single frame to stdout and exit
    Snapshot {
        /// Seconds to wait for the first camera frame
        #[arg(long, default_value = "5")]
        timeout: u64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

impl Args {
    /// Overlay command-line options onto a loaded config.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(camera) = self.camera {
            config.camera.device = camera;
        }
        if let Some(width) = self.width {
            config.render.width = width;
        }
        if let Some(palette) = self.palette {
            config.render.palette = Some(palette.name().to_string());
            config.render.custom_palette = None;
        }
        if let Some(glyphs) = &self.glyphs {
            config.render.custom_palette = Some(glyphs.clone());
        }
        if let Some(theme) = self.theme {
            config.render.theme = Some(theme.name().to_string());
        }
        if let Some(policy) = self.policy {
            config.display.policy = Some(policy.name().to_string());
        }
        if let Some(fps) = self.fps {
            config.render.fps = fps;
        }
        if self.no_status {
            config.ui.status_bar = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["glyphcam"]);
        assert!(args.camera.is_none());
        assert!(args.width.is_none());
        assert!(args.palette.is_none());
        assert!(args.glyphs.is_none());
        assert!(args.theme.is_none());
        assert!(args.fps.is_none());
        assert!(!args.no_status);
        assert!(args.config.is_none());
        assert!(args.log_file.is_none());
        assert_eq!(args.verbose, 0);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_args_width_range() {
        let args = Args::parse_from(["glyphcam", "--width", "64"]);
        assert_eq!(args.width, Some(64));

        assert!(Args::try_parse_from(["glyphcam", "--width", "10"]).is_err());
        assert!(Args::try_parse_from(["glyphcam", "--width", "201"]).is_err());
    }

    #[test]
    fn test_args_palette_values() {
        let args = Args::parse_from(["glyphcam", "--palette", "blocks"]);
        assert_eq!(args.palette, Some(PaletteArg::Blocks));

        let args = Args::parse_from(["glyphcam", "-p", "classic"]);
        assert_eq!(args.palette, Some(PaletteArg::Classic));

        assert!(Args::try_parse_from(["glyphcam", "--palette", "braille"]).is_err());
    }

    #[test]
    fn test_args_verbose_count() {
        let args = Args::parse_from(["glyphcam", "-vv"]);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_args_config_option() {
        let args = Args::parse_from(["glyphcam", "--config", "/tmp/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/config.toml")));

        let args = Args::parse_from(["glyphcam", "-c", "/tmp/test.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
    }

    #[test]
    fn test_args_list_cameras_subcommand() {
        let args = Args::parse_from(["glyphcam", "list-cameras"]);
        assert!(matches!(args.command, Some(Command::ListCameras)));
    }

    #[test]
    fn test_args_config_subcommands() {
        let args = Args::parse_from(["glyphcam", "config", "show"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));

        let args = Args::parse_from(["glyphcam", "config", "init"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn test_args_snapshot_subcommand() {
        let args = Args::parse_from(["glyphcam", "snapshot"]);
        assert!(matches!(args.command, Some(Command::Snapshot { timeout: 5 })));

        let args = Args::parse_from(["glyphcam", "snapshot", "--timeout", "2"]);
        assert!(matches!(args.command, Some(Command::Snapshot { timeout: 2 })));
    }

    #[test]
    fn test_apply_to_overrides_config() {
        let mut config = Config::default();
        config.render.custom_palette = Some("xo".to_string());

        let args = Args::parse_from([
            "glyphcam",
            "--camera",
            "1",
            "--width",
            "48",
            "--palette",
            "minimal",
            "--theme",
            "alt",
            "--policy",
            "fit-width",
            "--fps",
            "24",
            "--no-status",
        ]);
        args.apply_to(&mut config);

        assert_eq!(config.camera.device, 1);
        assert_eq!(config.render.width, 48);
        assert_eq!(config.render.palette.as_deref(), Some("minimal"));
        assert!(config.render.custom_palette.is_none());
        assert_eq!(config.render.theme.as_deref(), Some("alt"));
        assert_eq!(config.display.policy.as_deref(), Some("fit-width"));
        assert_eq!(config.render.fps, 24);
        assert!(!config.ui.status_bar);
    }

    #[test]
    fn test_apply_to_keeps_unset_fields() {
        let mut config = Config::default();
        config.render.width = 80;
        Args::parse_from(["glyphcam"]).apply_to(&mut config);
        assert_eq!(config.render.width, 80);
        assert!(config.ui.status_bar);
    }
}
