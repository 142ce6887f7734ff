//! Video source selection

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Where frames come from
///
/// An integer selects a camera by index; anything else is handed to the
/// capture backend as a file path or stream URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SourceRepr", into = "String")]
pub enum VideoSource {
    Camera(i32),
    File(String),
}

impl VideoSource {
    pub fn is_camera(&self) -> bool {
        matches!(self, VideoSource::Camera(_))
    }
}

impl Default for VideoSource {
    fn default() -> Self {
        VideoSource::Camera(0)
    }
}

impl FromStr for VideoSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<i32>() {
            Ok(index) => VideoSource::Camera(index),
            Err(_) => VideoSource::File(s.to_string()),
        })
    }
}

impl From<String> for VideoSource {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(source) => source,
            Err(never) => match never {},
        }
    }
}

/// Config files may carry a camera index as a bare number
#[derive(Deserialize)]
#[serde(untagged)]
enum SourceRepr {
    Index(i32),
    Text(String),
}

impl From<SourceRepr> for VideoSource {
    fn from(repr: SourceRepr) -> Self {
        match repr {
            SourceRepr::Index(index) => VideoSource::Camera(index),
            SourceRepr::Text(text) => text.into(),
        }
    }
}

impl From<VideoSource> for String {
    fn from(source: VideoSource) -> Self {
        match source {
            VideoSource::Camera(index) => index.to_string(),
            VideoSource::File(path) => path,
        }
    }
}

impl fmt::Display for VideoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoSource::Camera(index) => write!(f, "camera {}", index),
            VideoSource::File(path) => write!(f, "{}", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_index() {
        assert_eq!("0".parse::<VideoSource>().unwrap(), VideoSource::Camera(0));
        assert_eq!(" 2 ".parse::<VideoSource>().unwrap(), VideoSource::Camera(2));
        assert!(VideoSource::default().is_camera());
    }

    #[test]
    fn test_file_and_url() {
        assert_eq!(
            "../../media/VideoStream.avi".parse::<VideoSource>().unwrap(),
            VideoSource::File("../../media/VideoStream.avi".into())
        );
        let rtsp: VideoSource = String::from("rtsp://cam.local/stream").into();
        assert!(!rtsp.is_camera());
        assert_eq!(rtsp.to_string(), "rtsp://cam.local/stream");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&VideoSource::Camera(1)).unwrap();
        assert_eq!(json, "\"1\"");
        let back: VideoSource = serde_json::from_str("\"clip.mp4\"").unwrap();
        assert_eq!(back, VideoSource::File("clip.mp4".into()));
    }

    #[test]
    fn test_serde_numeric_index() {
        let camera: VideoSource = serde_json::from_str("3").unwrap();
        assert_eq!(camera, VideoSource::Camera(3));
        let quoted: VideoSource = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(quoted, camera);
        assert!(serde_json::from_str::<VideoSource>("1.5").is_err());
    }
}
