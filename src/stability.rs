use crate::{config::StabilityConfig, types::PostureLabel};

/// Slot order matches label priority, so ties resolve upward.
const CONCRETE_POSTURES: [PostureLabel; 4] = [
    PostureLabel::Standing,
    PostureLabel::Sitting,
    PostureLabel::Bowing,
    PostureLabel::Prostrating,
];

/// A confirmed posture transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfirmedChange {
    pub previous: PostureLabel,
    pub current: PostureLabel,
}

/// Hysteresis debouncer over the raw per-frame label stream.
///
/// Each frame adds evidence for the detected posture and drains it from the
/// others; a posture is confirmed once it holds the most evidence and that
/// evidence clears the configured threshold. Confirmation never zeroes the
/// counters, so a posture the subject recently left re-confirms faster than
/// one seen cold.
#[derive(Debug)]
pub struct StabilityFilter {
    config: StabilityConfig,
    evidence: [u32; CONCRETE_POSTURES.len()],
    confirmed: PostureLabel,
}

impl StabilityFilter {
    pub fn new(config: StabilityConfig) -> Self {
        Self {
            config,
            evidence: [0; CONCRETE_POSTURES.len()],
            confirmed: PostureLabel::Unknown,
        }
    }

    /// Feed one raw label; returns the transition if this frame confirmed
    /// one. An unknown frame carries no evidence and only decays the
    /// counters, so unknown is never confirmed as a transition target.
    pub fn observe(&mut self, raw: PostureLabel) -> Option<ConfirmedChange> {
        for (slot, posture) in CONCRETE_POSTURES.iter().enumerate() {
            if *posture == raw {
                self.evidence[slot] =
                    self.evidence[slot].saturating_add(self.config.evidence_increment);
            } else {
                self.evidence[slot] =
                    self.evidence[slot].saturating_sub(self.config.evidence_decrement);
            }
        }

        let (candidate, count) = self.leader();
        if count >= self.config.confirmation_threshold && candidate != self.confirmed {
            let previous = self.confirmed;
            self.confirmed = candidate;
            return Some(ConfirmedChange {
                previous,
                current: candidate,
            });
        }
        None
    }

    pub fn confirmed(&self) -> PostureLabel {
        self.confirmed
    }

    pub fn reset(&mut self) {
        self.evidence = [0; CONCRETE_POSTURES.len()];
        self.confirmed = PostureLabel::Unknown;
    }

    fn leader(&self) -> (PostureLabel, u32) {
        let mut best = (CONCRETE_POSTURES[0], self.evidence[0]);
        for slot in 1..CONCRETE_POSTURES.len() {
            if self.evidence[slot] >= best.1 {
                best = (CONCRETE_POSTURES[slot], self.evidence[slot]);
            }
        }
        best
    }
}
