use std::sync::atomic::{AtomicBool, Ordering};

/// Per-index results of one pool run, frozen after every worker has joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultBuffer {
    slots: Vec<bool>,
}

impl ResultBuffer {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.slots.get(index).copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.slots
    }

    /// Indices whose predicate came out true, ascending.
    pub fn true_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, &hit)| hit.then_some(i))
            .collect()
    }

    pub fn count_true(&self) -> usize {
        self.slots.iter().filter(|&&hit| hit).count()
    }

    pub fn into_vec(self) -> Vec<bool> {
        self.slots
    }
}

impl From<Vec<bool>> for ResultBuffer {
    fn from(slots: Vec<bool>) -> Self {
        Self { slots }
    }
}

/// Write side of a [`ResultBuffer`] shared by the workers of a single run.
///
/// Every index is owned by exactly one worker, so plain relaxed stores are
/// enough; the pool's join orders them before [`SharedSlots::freeze`].
pub(crate) struct SharedSlots {
    slots: Box<[AtomicBool]>,
}

impl SharedSlots {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| AtomicBool::new(false)).collect(),
        }
    }

    pub(crate) fn set(&self, index: usize, value: bool) {
        self.slots[index].store(value, Ordering::Relaxed);
    }

    pub(crate) fn freeze(self) -> ResultBuffer {
        ResultBuffer {
            slots: self
                .slots
                .into_vec()
                .into_iter()
                .map(AtomicBool::into_inner)
                .collect(),
        }
    }
}
