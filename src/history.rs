//! Fixed-capacity ring of raw command lines.

use std::fmt;

use crate::errors::{ErrorKind, Result};

/// Number of lines the interactive shell remembers.
pub const HISTORY_CAPACITY: usize = 20;

#[derive(Debug)]
pub struct HistoryBuffer {
    slots: Vec<Option<String>>,
    /// Slot of the oldest surviving entry.
    oldest: usize,
    /// Slot the next append writes to.
    newest: usize,
    count: usize,
}

impl HistoryBuffer {
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> HistoryBuffer {
        assert!(capacity > 0, "history capacity must be positive");
        HistoryBuffer {
            slots: vec![None; capacity],
            oldest: 0,
            newest: 0,
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Stores a copy of `line`, overwriting the oldest entry once full.
    pub fn push(&mut self, line: &str) {
        let capacity = self.capacity();
        // replacing the Option drops the evicted line
        self.slots[self.newest] = Some(line.to_owned());
        self.newest = (self.newest + 1) % capacity;
        if self.count < capacity {
            self.count += 1;
        } else {
            self.oldest = (self.oldest + 1) % capacity;
        }
    }

    /// Returns entry `n`, where 1 is the oldest surviving entry.
    pub fn recall(&self, n: usize) -> Result<&str> {
        if n < 1 || n > self.count {
            bail!(ErrorKind::HistoryRange(format!("!{}", n)));
        }

        let index = (self.oldest + n - 1) % self.capacity();
        self.slots[index]
            .as_deref()
            .ok_or_else(|| ErrorKind::HistoryRange(format!("!{}", n)).into())
    }

    /// Returns the most recently stored entry.
    pub fn recall_last(&self) -> Result<&str> {
        if self.count == 0 {
            bail!(ErrorKind::HistoryRange("!!".into()));
        }
        self.recall(self.count)
    }

    /// Iterates `(n, line)` pairs, oldest first, `n` being the recall index.
    pub fn enumerate(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        (1..=self.count).filter_map(move |n| self.recall(n).ok().map(|line| (n, line)))
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        HistoryBuffer::with_capacity(HISTORY_CAPACITY)
    }
}

impl fmt::Display for HistoryBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, line) in self.enumerate() {
            writeln!(f, "{}: {}", n, line)?;
        }

        Ok(())
    }
}
