use crate::{
    classifier::PoseClassifier,
    config::{ConfigError, TrackerConfig},
    history::PostureHistory,
    rakaat::RakaatMatcher,
    stability::StabilityFilter,
    types::{LandmarkFrame, PostureLabel, TrackerEvent},
};

/// The full pipeline over a stream of landmark frames: classify each frame,
/// debounce the labels, record confirmed transitions and count completed
/// prayer cycles. Feed frames in capture order; the tracker keeps all state
/// between calls.
pub struct RakaatTracker {
    classifier: PoseClassifier,
    stability: StabilityFilter,
    history: PostureHistory,
    matcher: RakaatMatcher,
    completed: u32,
}

impl RakaatTracker {
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            classifier: PoseClassifier::new(config.classifier),
            stability: StabilityFilter::new(config.stability),
            history: PostureHistory::new(config.history_capacity),
            matcher: RakaatMatcher::new(config.pattern_window),
            completed: 0,
        })
    }

    /// Process one frame and return the events it produced, usually none.
    /// A frame missing the required landmarks is dropped whole: it neither
    /// adds nor drains posture evidence.
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> Vec<TrackerEvent> {
        let mut events = Vec::new();

        let classification = self.classifier.classify(frame);
        let Some(features) = classification.features else {
            log::trace!("frame dropped: required landmarks missing");
            return events;
        };
        log::trace!(
            "frame: {} (eye {:.3}, depth {:.3}, span {:.3}, vis {:.2})",
            classification.label.as_str(),
            features.eye_distance,
            features.nose_depth,
            features.shoulder_span,
            features.mean_visibility,
        );

        let Some(change) = self.stability.observe(classification.label) else {
            return events;
        };
        events.push(TrackerEvent::PostureChanged {
            previous: change.previous,
            current: change.current,
        });

        if !self.history.push(change.current) {
            return events;
        }
        let entries: Vec<PostureLabel> = self.history.iter().collect();
        let recent: Vec<&str> = entries
            .iter()
            .skip(entries.len().saturating_sub(5))
            .map(|label| label.as_str())
            .collect();
        log::debug!(
            "posture confirmed: {} -> {} (recent: {recent:?})",
            change.previous.as_str(),
            change.current.as_str(),
        );

        if self.matcher.matches(&entries) {
            self.completed += 1;
            self.history.clear();
            log::info!("rakaat completed: {}", self.completed);
            events.push(TrackerEvent::RakaatCompleted {
                count: self.completed,
            });
        }
        events
    }

    /// Zero the cycle count and drop all posture state. The next frames
    /// start from scratch, as if the tracker had just been built.
    pub fn reset(&mut self) {
        self.completed = 0;
        self.history.clear();
        self.stability.reset();
        log::debug!("tracker reset");
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed
    }

    pub fn current_posture(&self) -> PostureLabel {
        self.stability.confirmed()
    }

    /// Confirmed transitions still held for pattern matching, oldest first.
    pub fn recent_transitions(&self) -> impl Iterator<Item = PostureLabel> + '_ {
        self.history.iter()
    }
}
