//! Priority-ordered sibling collection.
//!
//! Every container uses the same insertion algorithm for its tracks,
//! compositions, effects, and groups: priorities form a dense zero-based rank
//! per sibling set, and explicit insertion renumbers everything at or above
//! the requested rank.

/// Sentinel priority meaning "append after the current last sibling".
pub const APPEND: i32 = -1;

/// Implemented by every sibling kind that carries a dense integer rank.
pub trait Prioritized {
    fn priority(&self) -> i32;
    fn set_priority(&mut self, priority: i32);
}

/// An insert/append collection that assigns and renumbers integer priorities
/// among siblings.
///
/// Invariant: at any time the set of priorities held by N items is exactly
/// {0, ..., N-1}. Items are kept sorted ascending by priority.
#[derive(Debug, Clone)]
pub struct PriorityList<T> {
    items: Vec<T>,
}

impl<T: Prioritized> PriorityList<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Insert `item`, resolving the requested priority.
    ///
    /// `requested < 0` appends: the item receives priority = current count.
    /// `requested >= 0` inserts at that rank: every sibling whose priority is
    /// >= `requested` is shifted up by one, and the item receives exactly
    /// `requested` (clamped to the count). Returns the resolved priority and
    /// the item's index; with dense priorities in ascending order the two
    /// always agree, so the index can be used to reach the item directly.
    pub fn insert(&mut self, mut item: T, requested: i32) -> (i32, usize) {
        let resolved = if requested < 0 {
            self.items.len() as i32
        } else {
            for existing in &mut self.items {
                if existing.priority() >= requested {
                    existing.set_priority(existing.priority() + 1);
                }
            }
            requested.min(self.items.len() as i32)
        };

        item.set_priority(resolved);
        self.items.push(item);
        self.items.sort_by_key(|i| i.priority());
        (resolved, resolved as usize)
    }

    /// Items in ascending priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// The last item in priority order, if any.
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Items as a slice, in ascending priority order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Prioritized> Default for PriorityList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Prioritized> std::ops::Index<usize> for PriorityList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T: Prioritized> std::ops::IndexMut<usize> for PriorityList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<'a, T: Prioritized> IntoIterator for &'a PriorityList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
