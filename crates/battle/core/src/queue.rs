//! FIFO of pending level-up presentations.

use std::collections::VecDeque;

use crate::progression::LevelUpResult;

/// Pending level-ups, presented one at a time in the order they happened.
#[derive(Clone, Debug, Default)]
pub struct LevelUpQueue {
    entries: VecDeque<LevelUpResult>,
}

impl LevelUpQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, result: LevelUpResult) {
        self.entries.push_back(result);
    }

    pub fn dequeue(&mut self) -> Option<LevelUpResult> {
        self.entries.pop_front()
    }

    pub fn peek(&self) -> Option<&LevelUpResult> {
        self.entries.front()
    }

    pub fn has_pending(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Extend<LevelUpResult> for LevelUpQueue {
    fn extend<I: IntoIterator<Item = LevelUpResult>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
