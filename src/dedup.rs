//! Deduplication of generated word lists
//!
//! The pipeline collapses the base word list and the decoration output independently.
//! Without the dedup flag a [`NoOpDeduplicator`] keeps every word verbatim.

use ahash::RandomState;
use hashbrown::HashSet;

/// Decides which words of a list survive the collapse stage
pub trait Deduplicator {
    /// Record `item`, returning true the first time it is seen
    fn insert(&mut self, item: &str) -> bool;
}

/// In-memory HashSet-based deduplicator
pub struct MemoryDeduplicator {
    seen: HashSet<String, RandomState>,
}

impl MemoryDeduplicator {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }
}

impl Deduplicator for MemoryDeduplicator {
    fn insert(&mut self, item: &str) -> bool {
        if self.seen.contains(item) {
            return false;
        }
        self.seen.insert(item.to_string())
    }
}

/// Accepts every word, used when deduplication is disabled
pub struct NoOpDeduplicator;

impl Deduplicator for NoOpDeduplicator {
    fn insert(&mut self, _item: &str) -> bool {
        true
    }
}

/// Deduplicator matching the dedup flag, sized for `expected_items`
pub fn create_deduplicator(enabled: bool, expected_items: usize) -> Box<dyn Deduplicator> {
    if enabled {
        Box::new(MemoryDeduplicator::with_capacity(expected_items))
    } else {
        Box::new(NoOpDeduplicator)
    }
}

/// Keep the words accepted by `dedup`, in first-occurrence order
pub fn collapse(words: Vec<String>, dedup: &mut dyn Deduplicator) -> Vec<String> {
    words.into_iter().filter(|w| dedup.insert(w)).collect()
}
