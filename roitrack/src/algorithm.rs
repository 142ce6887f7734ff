//! Tracking algorithm selection table
//!
//! Maps the user-facing algorithm names onto [`TrackerAlgorithm`] variants.
//! A backend turns a variant into a concrete tracker through
//! [`TrackerFactory`](crate::tracker::TrackerFactory).

use crate::error::TrackError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Off-the-shelf single-object tracking algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TrackerAlgorithm {
    Kcf,
    Tld,
    Boosting,
    MedianFlow,
    Mil,
    Goturn,
    Mosse,
    #[default]
    Csrt,
}

impl TrackerAlgorithm {
    pub const ALL: [TrackerAlgorithm; 8] = [
        TrackerAlgorithm::Kcf,
        TrackerAlgorithm::Tld,
        TrackerAlgorithm::Boosting,
        TrackerAlgorithm::MedianFlow,
        TrackerAlgorithm::Mil,
        TrackerAlgorithm::Goturn,
        TrackerAlgorithm::Mosse,
        TrackerAlgorithm::Csrt,
    ];

    /// Canonical upper-case name, as shown in the overlay
    pub fn name(&self) -> &'static str {
        match self {
            TrackerAlgorithm::Kcf => "KCF",
            TrackerAlgorithm::Tld => "TLD",
            TrackerAlgorithm::Boosting => "BOOSTING",
            TrackerAlgorithm::MedianFlow => "MEDIAN_FLOW",
            TrackerAlgorithm::Mil => "MIL",
            TrackerAlgorithm::Goturn => "GOTURN",
            TrackerAlgorithm::Mosse => "MOSSE",
            TrackerAlgorithm::Csrt => "CSRT",
        }
    }

    /// Whether the algorithm is only available through OpenCV's legacy tracking API
    pub fn is_legacy(&self) -> bool {
        matches!(
            self,
            TrackerAlgorithm::Tld
                | TrackerAlgorithm::Boosting
                | TrackerAlgorithm::MedianFlow
                | TrackerAlgorithm::Mosse
        )
    }
}

impl FromStr for TrackerAlgorithm {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        TrackerAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.name() == normalized)
            .ok_or_else(|| TrackError::UnknownAlgorithm(s.to_string()))
    }
}

impl TryFrom<String> for TrackerAlgorithm {
    type Error = TrackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TrackerAlgorithm> for String {
    fn from(alg: TrackerAlgorithm) -> Self {
        alg.name().to_string()
    }
}

impl fmt::Display for TrackerAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        for alg in TrackerAlgorithm::ALL {
            assert_eq!(alg.name().parse::<TrackerAlgorithm>().unwrap(), alg);
        }
    }

    #[test]
    fn test_parse_is_lenient_on_case_and_dashes() {
        assert_eq!(
            "median-flow".parse::<TrackerAlgorithm>().unwrap(),
            TrackerAlgorithm::MedianFlow
        );
        assert_eq!(" kcf ".parse::<TrackerAlgorithm>().unwrap(), TrackerAlgorithm::Kcf);
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "DEEPSORT".parse::<TrackerAlgorithm>().unwrap_err();
        assert!(matches!(err, TrackError::UnknownAlgorithm(ref name) if name == "DEEPSORT"));
        assert!("".parse::<TrackerAlgorithm>().is_err());
    }

    #[test]
    fn test_default_is_csrt() {
        assert_eq!(TrackerAlgorithm::default(), TrackerAlgorithm::Csrt);
        assert_eq!(TrackerAlgorithm::default().to_string(), "CSRT");
    }

    #[test]
    fn test_legacy_split() {
        let legacy: Vec<_> = TrackerAlgorithm::ALL
            .into_iter()
            .filter(|a| a.is_legacy())
            .map(|a| a.name())
            .collect();
        assert_eq!(legacy, vec!["TLD", "BOOSTING", "MEDIAN_FLOW", "MOSSE"]);
    }
}
