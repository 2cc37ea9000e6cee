use anyhow::Result;
use rakaat_tracker::{
    Landmark, LandmarkFrame, LandmarkKind, PostureLabel, RakaatTracker, TrackerConfig,
    TrackerEvent,
};

// Runs the tracker over a synthesized two-rakaat session and prints every
// event it raises. No estimator required.
fn main() -> Result<()> {
    env_logger::init();

    let mut tracker = RakaatTracker::new(TrackerConfig::default())?;
    let frames = session();
    let mut completed = 0;

    for (index, frame) in frames.iter().enumerate() {
        for event in tracker.process_frame(frame) {
            match event {
                TrackerEvent::PostureChanged { previous, current } => println!(
                    "frame {index:>3}: {} -> {} ({})",
                    previous.as_str(),
                    current.as_str(),
                    current.display_name(),
                ),
                TrackerEvent::RakaatCompleted { count } => {
                    completed = count;
                    println!("frame {index:>3}: rakaat {count} complete");
                }
            }
        }
    }

    println!("{completed} rakaat in {} frames", frames.len());
    Ok(())
}

/// Two cycles of held postures, with a dropped frame early on and estimator
/// junk between the cycles. The second cycle holds everything longer, the
/// way a subject slows down once settled.
fn session() -> Vec<LandmarkFrame> {
    let segments: [(PostureLabel, usize); 10] = [
        (PostureLabel::Standing, 6),
        (PostureLabel::Bowing, 6),
        (PostureLabel::Prostrating, 6),
        (PostureLabel::Sitting, 6),
        (PostureLabel::Prostrating, 6),
        (PostureLabel::Standing, 10),
        (PostureLabel::Bowing, 10),
        (PostureLabel::Prostrating, 10),
        (PostureLabel::Sitting, 10),
        (PostureLabel::Prostrating, 6),
    ];

    let mut frames = Vec::new();
    for (label, hold) in segments {
        for _ in 0..hold {
            frames.push(frame_for(label));
        }
    }
    frames.insert(30, dim_frame());
    frames.insert(30, LandmarkFrame::default());
    frames.insert(2, LandmarkFrame::default());
    frames
}

fn frame(eye_distance: f32, nose_depth: f32) -> LandmarkFrame {
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

fn frame_for(label: PostureLabel) -> LandmarkFrame {
    match label {
        PostureLabel::Standing => frame(0.03, 0.0),
        PostureLabel::Sitting => frame(0.07, -0.2),
        PostureLabel::Bowing => frame(0.10, 0.0),
        PostureLabel::Prostrating => frame(0.20, 0.0),
        PostureLabel::Unknown => frame(0.06, 0.0),
    }
}

fn dim_frame() -> LandmarkFrame {
    let mut dim = frame(0.20, 0.0);
    dim.landmarks[LandmarkKind::Nose.index()].visibility = 0.1;
    dim
}
