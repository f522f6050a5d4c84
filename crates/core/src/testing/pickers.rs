//! Deterministic index pickers.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::resolver::IndexPicker;

/// Always picks the same index, clamped to the list length.
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker {
    index: usize,
}

impl FixedPicker {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl IndexPicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.index.min(len.saturating_sub(1))
    }
}

/// Picks from a queue of indices, then repeats the last one.
#[derive(Debug)]
pub struct SequencePicker {
    queue: Mutex<VecDeque<usize>>,
    last: Mutex<usize>,
}

impl SequencePicker {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            queue: Mutex::new(indices.into()),
            last: Mutex::new(0),
        }
    }
}

impl IndexPicker for SequencePicker {
    fn pick(&self, len: usize) -> usize {
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(next) = self.queue.lock().unwrap_or_else(|e| e.into_inner()).pop_front() {
            *last = next;
        }
        (*last).min(len.saturating_sub(1))
    }
}
