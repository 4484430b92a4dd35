use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// A bounded FIFO of forbidden entries with constant-time membership.
///
/// Pushing beyond capacity evicts the oldest entry. Membership is exact
/// equality.
#[derive(Debug, Clone)]
pub struct TabuMemory<T>
where
    T: Eq + Hash + Clone,
{
    capacity: usize,
    order: VecDeque<T>,
    counts: HashMap<T, usize>,
}

impl<T> TabuMemory<T>
where
    T: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity + 1),
            counts: HashMap::with_capacity(capacity + 1),
        }
    }

    /// Records `entry` and returns the evicted entry, if any.
    pub fn push(&mut self, entry: T) -> Option<T> {
        *self.counts.entry(entry.clone()).or_insert(0) += 1;
        self.order.push_back(entry);
        if self.order.len() > self.capacity {
            let evicted = self.order.pop_front()?;
            if let Some(count) = self.counts.get_mut(&evicted) {
                *count -= 1;
                if *count == 0 {
                    self.counts.remove(&evicted);
                }
            }
            return Some(evicted);
        }
        None
    }

    pub fn contains(&self, entry: &T) -> bool {
        self.counts.contains_key(entry)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter()
    }
}
