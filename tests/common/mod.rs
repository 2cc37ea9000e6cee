use rakaat_tracker::{Landmark, LandmarkFrame, LandmarkKind, PostureLabel};

/// Frame with the eyes `eye_distance` apart, the nose at `nose_depth`, and
/// every landmark clearly visible.
pub fn frame(eye_distance: f32, nose_depth: f32) -> LandmarkFrame {
    let base = Landmark {
        x: 0.5,
        y: 0.5,
        z: 0.0,
        visibility: 0.9,
    };
    let mut landmarks = vec![base; 25];
    landmarks[LandmarkKind::Nose.index()].z = nose_depth;
    landmarks[LandmarkKind::LeftEye.index()].x = 0.5 - eye_distance / 2.0;
    landmarks[LandmarkKind::RightEye.index()].x = 0.5 + eye_distance / 2.0;
    LandmarkFrame::new(landmarks)
}

/// A frame that cleanly classifies as the given posture. The unknown frame
/// falls in the dead band between the sitting and bowing rules.
pub fn frame_for(label: PostureLabel) -> LandmarkFrame {
    match label {
        PostureLabel::Standing => frame(0.03, 0.0),
        PostureLabel::Sitting => frame(0.07, -0.2),
        PostureLabel::Bowing => frame(0.10, 0.0),
        PostureLabel::Prostrating => frame(0.20, 0.0),
        PostureLabel::Unknown => frame(0.06, 0.0),
    }
}
