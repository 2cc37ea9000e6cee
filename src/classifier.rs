use crate::{
    config::ClassifierThresholds,
    types::{
        Classification, ClassificationFeatures, Landmark, LandmarkFrame, LandmarkKind,
        PostureLabel,
    },
};

/// Rules in descending priority; the first whose predicate holds wins.
const RULES: [(
    PostureLabel,
    fn(&ClassifierThresholds, &ClassificationFeatures) -> bool,
); 4] = [
    (PostureLabel::Prostrating, is_prostrating),
    (PostureLabel::Bowing, is_bowing),
    (PostureLabel::Sitting, is_sitting),
    (PostureLabel::Standing, is_standing),
];

/// Maps one landmark frame to a posture label. Stateless; thresholds are
/// tuned for a ground-facing camera, where face size in frame is the main
/// proximity signal.
pub struct PoseClassifier {
    thresholds: ClassifierThresholds,
}

impl PoseClassifier {
    pub fn new(thresholds: ClassifierThresholds) -> Self {
        Self { thresholds }
    }

    /// Total over any frame: missing required landmarks come back as
    /// unknown with no feature snapshot.
    pub fn classify(&self, frame: &LandmarkFrame) -> Classification {
        let Some(points) = RequiredLandmarks::extract(frame) else {
            return Classification {
                label: PostureLabel::Unknown,
                features: None,
            };
        };

        let features = compute_features(&points);
        Classification {
            label: self.label_for(&features),
            features: Some(features),
        }
    }

    fn label_for(&self, features: &ClassificationFeatures) -> PostureLabel {
        // Proximity readings mean nothing when the face is barely tracked.
        if features.face_visibility < self.thresholds.visibility_floor
            || features.eye_visibility < self.thresholds.visibility_floor
        {
            return PostureLabel::Unknown;
        }

        for (label, applies) in RULES {
            if applies(&self.thresholds, features) {
                return label;
            }
        }
        PostureLabel::Unknown
    }
}

/// The minimum landmark set a frame must carry: nose, both eyes, both
/// shoulders, both wrists. Anything less is treated as an empty frame.
struct RequiredLandmarks {
    nose: Landmark,
    left_eye: Landmark,
    right_eye: Landmark,
    left_shoulder: Landmark,
    right_shoulder: Landmark,
}

impl RequiredLandmarks {
    fn extract(frame: &LandmarkFrame) -> Option<Self> {
        // Wrists are part of the input contract but carry no signal here.
        frame.get(LandmarkKind::LeftWrist)?;
        frame.get(LandmarkKind::RightWrist)?;

        Some(Self {
            nose: frame.get(LandmarkKind::Nose)?,
            left_eye: frame.get(LandmarkKind::LeftEye)?,
            right_eye: frame.get(LandmarkKind::RightEye)?,
            left_shoulder: frame.get(LandmarkKind::LeftShoulder)?,
            right_shoulder: frame.get(LandmarkKind::RightShoulder)?,
        })
    }
}

fn compute_features(points: &RequiredLandmarks) -> ClassificationFeatures {
    ClassificationFeatures {
        eye_distance: distance2(points.left_eye, points.right_eye),
        nose_depth: f64::from(points.nose.z),
        shoulder_span: distance2(points.left_shoulder, points.right_shoulder),
        face_visibility: f64::from(points.nose.visibility),
        eye_visibility: f64::from(points.left_eye.visibility.min(points.right_eye.visibility)),
        shoulder_visibility: f64::from(
            points
                .left_shoulder
                .visibility
                .min(points.right_shoulder.visibility),
        ),
        mean_visibility: f64::from(
            points.nose.visibility
                + points.left_eye.visibility
                + points.right_eye.visibility
                + points.left_shoulder.visibility
                + points.right_shoulder.visibility,
        ) / 5.0,
    }
}

fn distance2(a: Landmark, b: Landmark) -> f64 {
    let dx = f64::from(a.x) - f64::from(b.x);
    let dy = f64::from(a.y) - f64::from(b.y);
    (dx.powi(2) + dy.powi(2)).sqrt()
}

// The face fills the frame and the nose is close to the lens.
fn is_prostrating(t: &ClassifierThresholds, f: &ClassificationFeatures) -> bool {
    f.face_visibility > t.clear_face_confidence
        && f.eye_distance >= t.prostrate_min_eye_distance
        && f.nose_depth >= t.prostrate_min_depth
}

// Upper body over the camera at mid proximity.
fn is_bowing(t: &ClassifierThresholds, f: &ClassificationFeatures) -> bool {
    f.shoulder_visibility > t.visible_confidence
        && f.face_visibility > t.visible_confidence
        && f.eye_distance >= t.bow_min_eye_distance
        && f.eye_distance < t.bow_max_eye_distance
}

// Face legible but held farther back than bowing range.
fn is_sitting(t: &ClassifierThresholds, f: &ClassificationFeatures) -> bool {
    f.face_visibility > t.visible_confidence
        && f.eye_distance >= t.sit_min_eye_distance
        && f.eye_distance < t.sit_max_eye_distance
        && f.nose_depth < t.sit_max_depth
}

// Far away or the face is out of the camera's view entirely.
fn is_standing(t: &ClassifierThresholds, f: &ClassificationFeatures) -> bool {
    f.eye_distance < t.stand_max_eye_distance
        || f.face_visibility < t.visible_confidence
        || f.nose_depth < t.stand_far_depth
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landmark(x: f32, y: f32, z: f32, visibility: f32) -> Landmark {
        Landmark { x, y, z, visibility }
    }

    /// Frame with the eyes `eye_distance` apart, the nose at `nose_depth`
    /// with `face_visibility`, and everything else clearly visible.
    fn frame(eye_distance: f32, nose_depth: f32, face_visibility: f32) -> LandmarkFrame {
        let mut landmarks = vec![landmark(0.5, 0.5, 0.0, 0.9); 25];
        landmarks[LandmarkKind::Nose.index()] = landmark(0.5, 0.4, nose_depth, face_visibility);
        landmarks[LandmarkKind::LeftEye.index()] =
            landmark(0.5 - eye_distance / 2.0, 0.3, 0.0, 0.9);
        landmarks[LandmarkKind::RightEye.index()] =
            landmark(0.5 + eye_distance / 2.0, 0.3, 0.0, 0.9);
        LandmarkFrame::new(landmarks)
    }

    fn classify(frame: &LandmarkFrame) -> PostureLabel {
        PoseClassifier::new(ClassifierThresholds::default())
            .classify(frame)
            .label
    }

    #[test]
    fn near_face_is_prostrating() {
        assert_eq!(classify(&frame(0.20, 0.0, 0.9)), PostureLabel::Prostrating);
    }

    #[test]
    fn prostration_thresholds_are_inclusive() {
        // Exactly on both proximity edges. Frame-derived distances cannot
        // land on the threshold bit patterns, so build the features by hand.
        let t = ClassifierThresholds::default();
        let f = ClassificationFeatures {
            eye_distance: t.prostrate_min_eye_distance,
            nose_depth: t.prostrate_min_depth,
            shoulder_span: 0.3,
            face_visibility: 0.9,
            eye_visibility: 0.9,
            shoulder_visibility: 0.9,
            mean_visibility: 0.9,
        };
        assert!(is_prostrating(&t, &f));
    }

    #[test]
    fn mid_band_is_bowing() {
        assert_eq!(classify(&frame(0.10, 0.0, 0.9)), PostureLabel::Bowing);
    }

    #[test]
    fn lower_mid_band_with_depth_is_sitting() {
        assert_eq!(classify(&frame(0.07, -0.2, 0.9)), PostureLabel::Sitting);
    }

    #[test]
    fn tiny_eye_distance_is_standing() {
        assert_eq!(classify(&frame(0.03, -0.6, 0.9)), PostureLabel::Standing);
    }

    #[test]
    fn hidden_face_is_standing() {
        assert_eq!(classify(&frame(0.12, 0.0, 0.3)), PostureLabel::Standing);
    }

    #[test]
    fn bowing_outranks_sitting_where_bands_overlap() {
        // 0.09 sits inside both the bowing and sitting bands; depth also
        // satisfies the sitting rule. Priority order decides.
        assert_eq!(classify(&frame(0.09, -0.2, 0.9)), PostureLabel::Bowing);
    }

    #[test]
    fn gap_between_bands_is_unknown() {
        // Sitting band without the depth condition, standing rule misses.
        assert_eq!(classify(&frame(0.06, 0.0, 0.9)), PostureLabel::Unknown);
    }

    #[test]
    fn sub_floor_face_visibility_is_unknown() {
        let result = PoseClassifier::new(ClassifierThresholds::default())
            .classify(&frame(0.20, 0.0, 0.1));
        assert_eq!(result.label, PostureLabel::Unknown);
        assert!(result.features.is_some());
    }

    #[test]
    fn sub_floor_eye_visibility_is_unknown() {
        let mut f = frame(0.20, 0.0, 0.9);
        f.landmarks[LandmarkKind::LeftEye.index()].visibility = 0.1;
        assert_eq!(classify(&f), PostureLabel::Unknown);
    }

    #[test]
    fn missing_landmarks_yield_unknown_without_features() {
        let result = PoseClassifier::new(ClassifierThresholds::default())
            .classify(&LandmarkFrame::default());
        assert_eq!(result.label, PostureLabel::Unknown);
        assert!(result.features.is_none());
    }

    #[test]
    fn missing_wrist_yields_unknown_without_features() {
        let mut f = frame(0.20, 0.0, 0.9);
        f.landmarks.truncate(LandmarkKind::RightWrist.index());
        let result = PoseClassifier::new(ClassifierThresholds::default()).classify(&f);
        assert_eq!(result.label, PostureLabel::Unknown);
        assert!(result.features.is_none());
    }

    #[test]
    fn eye_distance_is_euclidean() {
        let mut f = frame(0.0, 0.0, 0.9);
        f.landmarks[LandmarkKind::LeftEye.index()] = landmark(0.5, 0.3, 0.0, 0.9);
        f.landmarks[LandmarkKind::RightEye.index()] = landmark(0.53, 0.34, 0.0, 0.9);
        let result = PoseClassifier::new(ClassifierThresholds::default()).classify(&f);
        let features = result.features.unwrap();
        assert!((features.eye_distance - 0.05).abs() < 1e-6);
    }
}
