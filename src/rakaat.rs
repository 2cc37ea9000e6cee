use crate::types::PostureLabel;

/// A completed cycle spans at least this many confirmed transitions.
const MIN_PATTERN_LEN: usize = 4;

/// Detects a completed prayer cycle in a confirmed-posture record: standing,
/// then bowing, then two prostrations, in order but not necessarily
/// adjacent. Whatever the subject passes through in between (sitting between
/// the prostrations, a stray reading) does not break the chain.
#[derive(Debug)]
pub struct RakaatMatcher {
    window: usize,
}

impl RakaatMatcher {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// True when the most recent entries complete a cycle. Only the last
    /// `window` entries are considered, so stale postures from long before
    /// cannot combine with fresh ones.
    pub fn matches(&self, history: &[PostureLabel]) -> bool {
        if history.len() < MIN_PATTERN_LEN {
            return false;
        }
        let window = &history[history.len().saturating_sub(self.window)..];

        // Walk backwards anchored at the newest entry: second prostration,
        // first prostration, bowing, standing.
        let stages = [
            PostureLabel::Prostrating,
            PostureLabel::Prostrating,
            PostureLabel::Bowing,
            PostureLabel::Standing,
        ];
        let mut stage = 0;
        for posture in window.iter().rev() {
            if *posture == stages[stage] {
                stage += 1;
                if stage == stages.len() {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PostureLabel::{Bowing, Prostrating, Sitting, Standing};

    #[test]
    fn bare_cycle_matches() {
        let matcher = RakaatMatcher::new(8);
        assert!(matcher.matches(&[Standing, Bowing, Prostrating, Prostrating]));
    }

    #[test]
    fn cycle_with_sitting_between_prostrations_matches() {
        let matcher = RakaatMatcher::new(8);
        assert!(matcher.matches(&[Standing, Bowing, Prostrating, Sitting, Prostrating]));
    }

    #[test]
    fn short_record_never_matches() {
        let matcher = RakaatMatcher::new(8);
        assert!(!matcher.matches(&[]));
        assert!(!matcher.matches(&[Standing, Bowing, Prostrating]));
    }

    #[test]
    fn out_of_order_stages_do_not_match() {
        let matcher = RakaatMatcher::new(8);
        // One prostration precedes the bow; only one follows it.
        assert!(!matcher.matches(&[Prostrating, Standing, Bowing, Prostrating]));
        assert!(!matcher.matches(&[Bowing, Standing, Prostrating, Prostrating]));
    }

    #[test]
    fn entries_outside_the_window_are_ignored() {
        let record = [
            Standing, Bowing, Sitting, Standing, Sitting, Standing, Sitting, Standing,
            Prostrating, Sitting, Prostrating,
        ];
        // The bow is the tenth most recent entry; a window of eight cannot see it.
        assert!(!RakaatMatcher::new(8).matches(&record));
        assert!(RakaatMatcher::new(11).matches(&record));
    }

    #[test]
    fn matching_does_not_consume_the_record() {
        let matcher = RakaatMatcher::new(8);
        let record = [Standing, Bowing, Prostrating, Prostrating];
        assert!(matcher.matches(&record));
        assert!(matcher.matches(&record));
    }
}
