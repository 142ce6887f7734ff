//! Application configuration: JSON file defaults overridden by command-line flags

use crate::error::{AppError, Result};
use crate::session::SessionSettings;
use crate::source::VideoSource;
use clap::Parser;
use roitrack::TrackerAlgorithm;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Track regions selected on the first frame of a video stream
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Camera index or video file / stream URL
    #[arg(short, long)]
    pub source: Option<String>,

    /// Tracking algorithm (KCF, TLD, BOOSTING, MEDIAN_FLOW, MIL, GOTURN, MOSSE, CSRT)
    #[arg(short, long)]
    pub algorithm: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Milliseconds to wait for a key press after each displayed frame
    #[arg(short, long)]
    pub wait_ms: Option<i32>,

    /// Also write annotated frames to this video file
    #[arg(short, long)]
    pub record: Option<String>,

    /// Print the supported algorithm names and exit
    #[arg(long, default_value_t = false)]
    pub list_algorithms: bool,
}

/// Configuration for a tracking run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: VideoSource,

    pub algorithm: TrackerAlgorithm,

    /// Key poll delay after each frame (ms)
    pub wait_ms: i32,

    /// Window used for the initial region selection
    pub selection_window: String,

    /// Window showing the annotated stream
    pub display_window: String,

    /// Optional output video of the annotated stream
    pub record: Option<String>,

    /// Frame rate written into the recording
    pub record_fps: f64,

    /// Log progress every N frames (0 disables)
    pub progress_interval: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: VideoSource::default(),
            algorithm: TrackerAlgorithm::default(),
            wait_ms: 33,
            selection_window: "tracker".to_string(),
            display_window: "Tracker".to_string(),
            record: None,
            record_fps: 30.0,
            progress_interval: 100,
        }
    }
}

impl AppConfig {
    /// Read a configuration file; missing keys take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&text)
            .map_err(|e| AppError::config(format!("Invalid config {}: {}", path.display(), e)))
    }

    /// Build the effective configuration from command-line flags
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.apply_cli(cli)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_cli(&mut self, cli: &Cli) -> Result<()> {
        if let Some(source) = &cli.source {
            self.source = source.clone().into();
        }
        if let Some(name) = &cli.algorithm {
            self.algorithm = name.parse()?;
        }
        if let Some(wait_ms) = cli.wait_ms {
            self.wait_ms = wait_ms;
        }
        if let Some(record) = &cli.record {
            self.record = Some(record.clone());
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.wait_ms <= 0 {
            return Err(AppError::config(format!(
                "wait_ms must be positive, got {}",
                self.wait_ms
            )));
        }
        if self.record.is_some() && !(self.record_fps > 0.0) {
            return Err(AppError::config(format!(
                "record_fps must be positive, got {}",
                self.record_fps
            )));
        }
        Ok(())
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            algorithm: self.algorithm,
            wait_ms: self.wait_ms,
            progress_interval: self.progress_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roitrack::TrackError;
    use std::io::Write;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "tracker_app_{}_{}.json",
            name,
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::load(&Cli::default()).unwrap();
        assert_eq!(config.source, VideoSource::Camera(0));
        assert_eq!(config.algorithm, TrackerAlgorithm::Csrt);
        assert_eq!(config.wait_ms, 33);
        assert_eq!(config.display_window, "Tracker");
        assert!(config.record.is_none());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "multi-tracker",
            "--source",
            "clip.avi",
            "--algorithm",
            "kcf",
            "--wait-ms",
            "1",
        ])
        .unwrap();
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.source, VideoSource::File("clip.avi".into()));
        assert_eq!(config.algorithm, TrackerAlgorithm::Kcf);
        assert_eq!(config.wait_ms, 1);
    }

    #[test]
    fn test_unknown_algorithm_is_usage_error() {
        let cli = Cli {
            algorithm: Some("HOG".into()),
            ..Default::default()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(matches!(
            err,
            AppError::Tracking(TrackError::UnknownAlgorithm(_))
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_file_then_cli_override() {
        let path = temp_config(
            "override",
            r#"{ "source": "rtsp://cam/stream", "algorithm": "MOSSE", "progress_interval": 10 }"#,
        );
        let cli = Cli {
            config: Some(path.clone()),
            algorithm: Some("MIL".into()),
            ..Default::default()
        };
        let config = AppConfig::load(&cli).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.source, VideoSource::File("rtsp://cam/stream".into()));
        assert_eq!(config.algorithm, TrackerAlgorithm::Mil);
        assert_eq!(config.progress_interval, 10);
        assert_eq!(config.wait_ms, 33);
    }

    #[test]
    fn test_numeric_camera_in_file() {
        let path = temp_config("numeric_source", r#"{ "source": 1 }"#);
        let config = AppConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.source, VideoSource::Camera(1));
        assert_eq!(config.algorithm, TrackerAlgorithm::Csrt);
    }

    #[test]
    fn test_bad_file_values() {
        let path = temp_config("bad_alg", r#"{ "algorithm": "SIFT" }"#);
        let err = AppConfig::from_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, AppError::ConfigError(_)));

        let missing = AppConfig::from_file("/nonexistent/tracker.json").unwrap_err();
        assert_eq!(missing.exit_code(), 2);
    }

    #[test]
    fn test_validation() {
        let config = AppConfig {
            wait_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            record: Some("out.avi".into()),
            record_fps: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
