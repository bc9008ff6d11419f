//! Bounded, newest-first calculation history.

use crate::items::HistoryEntry;
use serde::Serialize;
use std::collections::VecDeque;

/// Default number of entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Newest-first list of successful calculations.
///
/// Pushing past the limit evicts the oldest entry. Recall reads an entry
/// without removing it.
#[derive(Clone, Debug, Serialize)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    #[serde(skip)]
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Create an empty history holding at most `limit` entries (at least one).
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.limit);
    }

    /// Entry at `index`, where 0 is the most recent.
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry::new(format!("{n} + 0"), n.to_string())
    }

    #[test]
    fn test_newest_first() {
        let mut history = History::default();
        history.push(entry(1));
        history.push(entry(2));
        assert_eq!(history.get(0).map(|e| e.result.as_str()), Some("2"));
        assert_eq!(history.get(1).map(|e| e.result.as_str()), Some("1"));
    }

    #[test]
    fn test_oldest_evicted_past_limit() {
        let mut history = History::default();
        for n in 1..=11 {
            history.push(entry(n));
        }
        assert_eq!(history.len(), 10);
        assert_eq!(history.get(0).map(|e| e.result.as_str()), Some("11"));
        assert_eq!(history.get(9).map(|e| e.result.as_str()), Some("2"));
        assert!(history.iter().all(|e| e.result != "1"));
    }

    #[test]
    fn test_limit_is_at_least_one() {
        let mut history = History::new(0);
        history.push(entry(1));
        history.push(entry(2));
        assert_eq!(history.len(), 1);
        assert_eq!(history.get(0).map(|e| e.result.as_str()), Some("2"));
    }
}
