use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Tunable parameters for the whole pipeline. Eye distances and shoulder
/// spans are in normalized image units, depths in estimator z units,
/// visibilities in [0, 1].
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Confirmed transitions kept for pattern matching. Default 12.
    pub history_capacity: usize,
    /// Most recent transitions the pattern matcher examines. Default 8.
    pub pattern_window: usize,
    pub classifier: ClassifierThresholds,
    pub stability: StabilityConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            history_capacity: 12,
            pattern_window: 8,
            classifier: ClassifierThresholds::default(),
            stability: StabilityConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    /// Nose/eye visibility under which classification degrades to unknown.
    /// Default 0.2.
    pub visibility_floor: f64,
    /// A landmark counts as visible above this score. Default 0.5.
    pub visible_confidence: f64,
    /// Prostration demands an unambiguous face. Default 0.5.
    pub clear_face_confidence: f64,
    /// Eye distance at or above which the face fills the frame. Default 0.15.
    pub prostrate_min_eye_distance: f64,
    /// Nose depth at or above which the face is near the lens. Default -0.3.
    pub prostrate_min_depth: f64,
    /// Lower edge of the bowing eye-distance band. Default 0.08.
    pub bow_min_eye_distance: f64,
    /// Upper edge (exclusive) of the bowing band; hands off to the
    /// prostration threshold. Default 0.15.
    pub bow_max_eye_distance: f64,
    /// Lower edge of the sitting eye-distance band. Default 0.05.
    pub sit_min_eye_distance: f64,
    /// Upper edge (exclusive) of the sitting band. Default 0.10.
    pub sit_max_eye_distance: f64,
    /// Sitting keeps the face farther than prostration range. Default -0.15.
    pub sit_max_depth: f64,
    /// Eye distance under which the subject reads as far away. Default 0.05.
    pub stand_max_eye_distance: f64,
    /// Nose depth under which the subject reads as far away. Default -0.5.
    pub stand_far_depth: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            visibility_floor: 0.2,
            visible_confidence: 0.5,
            clear_face_confidence: 0.5,
            prostrate_min_eye_distance: 0.15,
            prostrate_min_depth: -0.3,
            bow_min_eye_distance: 0.08,
            bow_max_eye_distance: 0.15,
            sit_min_eye_distance: 0.05,
            sit_max_eye_distance: 0.10,
            sit_max_depth: -0.15,
            stand_max_eye_distance: 0.05,
            stand_far_depth: -0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct StabilityConfig {
    /// Evidence added to the detected posture each frame. Default 2.
    pub evidence_increment: u32,
    /// Evidence removed from every other posture each frame. Default 1.
    pub evidence_decrement: u32,
    /// Evidence needed before a posture change is confirmed. Default 5.
    pub confirmation_threshold: u32,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            evidence_increment: 2,
            evidence_decrement: 1,
            confirmation_threshold: 5,
        }
    }
}

impl TrackerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: TrackerConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject configurations under which the pipeline cannot behave sanely.
    /// Bands may overlap (rule priority breaks ties) but must not be empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.classifier;

        for (name, value) in [
            ("classifier.visibility_floor", c.visibility_floor),
            ("classifier.visible_confidence", c.visible_confidence),
            ("classifier.clear_face_confidence", c.clear_face_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be in [0,1], got {value}"
                )));
            }
        }
        if c.visibility_floor > c.visible_confidence {
            return Err(ConfigError::Invalid(format!(
                "classifier.visibility_floor ({}) must not exceed visible_confidence ({})",
                c.visibility_floor, c.visible_confidence
            )));
        }

        for (name, value) in [
            ("classifier.prostrate_min_eye_distance", c.prostrate_min_eye_distance),
            ("classifier.bow_min_eye_distance", c.bow_min_eye_distance),
            ("classifier.bow_max_eye_distance", c.bow_max_eye_distance),
            ("classifier.sit_min_eye_distance", c.sit_min_eye_distance),
            ("classifier.sit_max_eye_distance", c.sit_max_eye_distance),
            ("classifier.stand_max_eye_distance", c.stand_max_eye_distance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if c.bow_min_eye_distance >= c.bow_max_eye_distance {
            return Err(ConfigError::Invalid(format!(
                "bowing band is empty: {} >= {}",
                c.bow_min_eye_distance, c.bow_max_eye_distance
            )));
        }
        if c.sit_min_eye_distance >= c.sit_max_eye_distance {
            return Err(ConfigError::Invalid(format!(
                "sitting band is empty: {} >= {}",
                c.sit_min_eye_distance, c.sit_max_eye_distance
            )));
        }

        for (name, value) in [
            ("classifier.prostrate_min_depth", c.prostrate_min_depth),
            ("classifier.sit_max_depth", c.sit_max_depth),
            ("classifier.stand_far_depth", c.stand_far_depth),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("stability.evidence_increment", self.stability.evidence_increment),
            ("stability.evidence_decrement", self.stability.evidence_decrement),
            ("stability.confirmation_threshold", self.stability.confirmation_threshold),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be at least 1")));
            }
        }

        if self.pattern_window < 4 {
            return Err(ConfigError::Invalid(format!(
                "pattern_window must cover the 4-posture cycle, got {}",
                self.pattern_window
            )));
        }
        if self.history_capacity < self.pattern_window {
            return Err(ConfigError::Invalid(format!(
                "history_capacity ({}) must not be smaller than pattern_window ({})",
                self.history_capacity, self.pattern_window
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(TrackerConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_band_is_rejected() {
        let mut cfg = TrackerConfig::default();
        cfg.classifier.bow_min_eye_distance = 0.15;
        cfg.classifier.bow_max_eye_distance = 0.08;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_stability_increment_is_rejected() {
        let mut cfg = TrackerConfig::default();
        cfg.stability.evidence_increment = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let mut cfg = TrackerConfig::default();
        cfg.classifier.prostrate_min_eye_distance = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn window_smaller_than_cycle_is_rejected() {
        let mut cfg = TrackerConfig::default();
        cfg.pattern_window = 3;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn capacity_smaller_than_window_is_rejected() {
        let mut cfg = TrackerConfig::default();
        cfg.history_capacity = 6;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn floor_above_visible_confidence_is_rejected() {
        let mut cfg = TrackerConfig::default();
        cfg.classifier.visibility_floor = 0.8;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let cfg: TrackerConfig = toml::from_str(
            "[stability]\nconfirmation_threshold = 7\n",
        )
        .unwrap();
        assert_eq!(cfg.stability.confirmation_threshold, 7);
        assert_eq!(cfg.stability.evidence_increment, 2);
        assert_eq!(cfg.history_capacity, 12);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn round_trips_through_toml() {
        let text = toml::to_string_pretty(&TrackerConfig::default()).unwrap();
        let parsed: TrackerConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.pattern_window, 8);
        assert_eq!(parsed.classifier.bow_max_eye_distance, 0.15);
    }

    #[test]
    fn written_defaults_are_clean_decimals() {
        // The generated template is user-facing; thresholds must not pick
        // up float widening noise like 0.20000000298023224.
        let text = toml::to_string_pretty(&TrackerConfig::default()).unwrap();
        assert!(text.contains("visibility_floor = 0.2"));
        assert!(text.contains("prostrate_min_depth = -0.3"));
        assert!(!text.contains("000000"));
    }
}
