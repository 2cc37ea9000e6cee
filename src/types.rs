use serde::{Deserialize, Serialize};

/// One estimated body keypoint: normalized image position, estimator depth
/// (larger z is nearer the camera) and a visibility confidence in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub visibility: f32,
}

/// The landmarks this pipeline reads out of the estimator's 33-point layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LandmarkKind {
    Nose,
    LeftEye,
    RightEye,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
}

impl LandmarkKind {
    /// Slot in the upstream pose estimator's output array.
    pub const fn index(self) -> usize {
        match self {
            LandmarkKind::Nose => 0,
            LandmarkKind::LeftEye => 2,
            LandmarkKind::RightEye => 5,
            LandmarkKind::LeftShoulder => 11,
            LandmarkKind::RightShoulder => 12,
            LandmarkKind::LeftElbow => 13,
            LandmarkKind::RightElbow => 14,
            LandmarkKind::LeftWrist => 15,
            LandmarkKind::RightWrist => 16,
            LandmarkKind::LeftHip => 23,
            LandmarkKind::RightHip => 24,
        }
    }
}

/// One frame of estimator output, in the estimator's slot order. Frames are
/// immutable once delivered; the pipeline borrows them for a single pass.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct LandmarkFrame {
    pub landmarks: Vec<Landmark>,
}

impl LandmarkFrame {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    pub fn get(&self, kind: LandmarkKind) -> Option<Landmark> {
        self.landmarks.get(kind.index()).copied()
    }
}

/// Discrete posture labels. Declaration order is ascending classification
/// priority, so the derived ordering resolves ties between overlapping
/// threshold bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PostureLabel {
    Unknown,
    Standing,
    Sitting,
    Bowing,
    Prostrating,
}

impl PostureLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            PostureLabel::Unknown => "unknown",
            PostureLabel::Standing => "standing",
            PostureLabel::Sitting => "sitting",
            PostureLabel::Bowing => "bowing",
            PostureLabel::Prostrating => "prostrating",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PostureLabel::Unknown => "غير محدد",
            PostureLabel::Standing => "قيام",
            PostureLabel::Sitting => "جلوس",
            PostureLabel::Bowing => "ركوع",
            PostureLabel::Prostrating => "سجود",
        }
    }
}

/// Per-frame scalars derived from the landmark geometry. Computed once,
/// used for classification and diagnostics, then discarded.
#[derive(Clone, Copy, Debug)]
pub struct ClassificationFeatures {
    /// 2D distance between the eyes; grows as the face nears the camera.
    pub eye_distance: f64,
    /// Nose z from the estimator.
    pub nose_depth: f64,
    /// 2D distance between the shoulders.
    pub shoulder_span: f64,
    /// Nose visibility score.
    pub face_visibility: f64,
    /// Lesser of the two eye visibility scores.
    pub eye_visibility: f64,
    /// Lesser of the two shoulder visibility scores.
    pub shoulder_visibility: f64,
    /// Mean visibility over nose, eyes and shoulders.
    pub mean_visibility: f64,
}

/// Classifier output for one frame. `features` is None when the frame did
/// not carry the required landmarks.
#[derive(Clone, Copy, Debug)]
pub struct Classification {
    pub label: PostureLabel,
    pub features: Option<ClassificationFeatures>,
}

/// Events raised by the tracker for external consumers (display, audio,
/// haptics). The core never calls consumers directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackerEvent {
    PostureChanged {
        previous: PostureLabel,
        current: PostureLabel,
    },
    RakaatCompleted {
        count: u32,
    },
}
