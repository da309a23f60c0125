//! Fixed-capacity FIFO log
//!
//! Appending beyond capacity evicts the oldest entry. Used for both the
//! segment log and the recent skip-event log.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct BoundedLog<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedLog<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Append an entry, returning the evicted oldest entry if the log was full
    pub fn push(&mut self, entry: T) -> Option<T> {
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.entries.iter()
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().rev()
    }

    pub fn first(&self) -> Option<&T> {
        self.entries.front()
    }

    pub fn last(&self) -> Option<&T> {
        self.entries.back()
    }
}

impl<T: Clone> BoundedLog<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity() {
        let mut log = BoundedLog::new(3);
        assert!(log.push(1).is_none());
        assert!(log.push(2).is_none());
        assert_eq!(log.len(), 2);
        assert_eq!(log.to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut log = BoundedLog::new(3);
        for i in 0..3 {
            log.push(i);
        }
        assert_eq!(log.push(3), Some(0));
        assert_eq!(log.push(4), Some(1));
        assert_eq!(log.len(), 3);
        assert_eq!(log.to_vec(), vec![2, 3, 4]);
        assert_eq!(log.first(), Some(&2));
        assert_eq!(log.last(), Some(&4));
    }

    #[test]
    fn test_newest_first_order() {
        let mut log = BoundedLog::new(2);
        log.push("a");
        log.push("b");
        log.push("c");
        let newest: Vec<_> = log.newest_first().copied().collect();
        assert_eq!(newest, vec!["c", "b"]);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut log = BoundedLog::new(0);
        log.push(1);
        log.push(2);
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.to_vec(), vec![2]);
    }

    #[test]
    fn test_order_preserved_after_wraparound() {
        let mut log = BoundedLog::new(4);
        for i in 0..10 {
            log.push(i);
        }
        assert_eq!(log.to_vec(), vec![6, 7, 8, 9]);
        log.clear();
        assert!(log.is_empty());
    }
}
