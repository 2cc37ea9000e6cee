//! Posture classification and prayer-cycle counting over pose-estimator
//! landmark streams.
//!
//! Each frame is classified on its own, then a hysteresis filter debounces
//! the per-frame labels. Confirmed transitions feed a pattern matcher that
//! recognizes the standing-to-double-prostration sequence and counts
//! completed rakaat. [`RakaatTracker`] bundles the pipeline behind a single
//! entry point.

pub mod classifier;
pub mod config;
pub mod history;
pub mod rakaat;
pub mod replay;
pub mod stability;
pub mod tracker;
pub mod types;

pub use classifier::PoseClassifier;
pub use config::{ClassifierThresholds, ConfigError, StabilityConfig, TrackerConfig};
pub use history::PostureHistory;
pub use rakaat::RakaatMatcher;
pub use stability::{ConfirmedChange, StabilityFilter};
pub use tracker::RakaatTracker;
pub use types::{
    Classification, ClassificationFeatures, Landmark, LandmarkFrame, LandmarkKind, PostureLabel,
    TrackerEvent,
};
