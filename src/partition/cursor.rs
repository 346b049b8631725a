use std::sync::{Mutex, PoisonError};

/// Shared next-index counter over `[0, end)`.
///
/// The lock covers only the read-and-advance; callers do their work on the
/// claimed index after the guard is dropped.
#[derive(Debug)]
pub struct SharedCursor {
    next: Mutex<usize>,
    end: usize,
}

impl SharedCursor {
    pub fn new(end: usize) -> Self {
        Self {
            next: Mutex::new(0),
            end,
        }
    }

    /// Claim the next unprocessed index, or `None` once the range is exhausted.
    pub fn claim(&self) -> Option<usize> {
        // Nothing panics while the guard is held, so a poisoned lock still
        // holds a consistent counter.
        let mut next = self.next.lock().unwrap_or_else(PoisonError::into_inner);
        let current = *next;
        if current >= self.end {
            return None;
        }
        *next = current + 1;
        Some(current)
    }

    /// Indices handed out so far.
    pub fn claimed(&self) -> usize {
        *self.next.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn end(&self) -> usize {
        self.end
    }
}
