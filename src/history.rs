use std::collections::VecDeque;

use crate::types::PostureLabel;

/// Bounded record of confirmed postures, oldest first. Consecutive
/// duplicates are collapsed and the oldest entry is evicted once the
/// capacity is reached.
#[derive(Debug)]
pub struct PostureHistory {
    entries: VecDeque<PostureLabel>,
    capacity: usize,
}

impl PostureHistory {
    /// Capacity is floored at one so the record stays bounded.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a confirmed posture. Returns false when the label matches the
    /// most recent entry and nothing was recorded.
    pub fn push(&mut self, label: PostureLabel) -> bool {
        if self.entries.back() == Some(&label) {
            return false;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(label);
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PostureLabel> + '_ {
        self.entries.iter().copied()
    }
}
