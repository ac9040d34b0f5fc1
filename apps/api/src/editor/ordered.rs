//! Priority-ordered record collections.
//!
//! Every record in a section carries a `priority` that must equal its array
//! position. `OrderedCollection` owns its vector privately and re-derives
//! priority from position in every constructor and every operation, so a
//! caller can never observe a stale or duplicated priority.
//!
//! All operations take `&self` and return a new collection. The receiver is
//! never modified.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// A record whose position inside its owning collection is mirrored in a
/// `priority` field.
pub trait Prioritized {
    fn priority(&self) -> i32;
    fn set_priority(&mut self, priority: i32);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OrderedCollection<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Prioritized> OrderedCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from raw records, rewriting every priority from
    /// array position.
    fn settle(mut items: Vec<T>) -> Self {
        for (position, item) in items.iter_mut().enumerate() {
            item.set_priority(position as i32);
        }
        Self { items }
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

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// True when `priority == index` for every record.
    pub fn is_dense(&self) -> bool {
        self.items
            .iter()
            .enumerate()
            .all(|(position, item)| item.priority() == position as i32)
    }
}

impl<T: Prioritized + Clone> OrderedCollection<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }

    /// Appends `record` at the end; its priority becomes the new `len - 1`.
    pub fn append(&self, record: T) -> Self {
        let mut items = self.items.clone();
        items.push(record);
        Self::settle(items)
    }

    /// Removes the record at `index` and shifts everything after it down by
    /// one. Out-of-range indices return the collection unchanged.
    pub fn remove_at(&self, index: usize) -> Self {
        if index >= self.items.len() {
            debug!(index, len = self.items.len(), "remove_at out of range; ignored");
            return self.clone();
        }
        let mut items = self.items.clone();
        items.remove(index);
        Self::settle(items)
    }

    /// Applies `patch` to the record at `index`. Whatever the patch does to
    /// `priority` is overwritten afterwards.
    pub fn update_at(&self, index: usize, patch: impl FnOnce(&mut T)) -> Self {
        if index >= self.items.len() {
            debug!(index, len = self.items.len(), "update_at out of range; ignored");
            return self.clone();
        }
        let mut items = self.items.clone();
        patch(&mut items[index]);
        Self::settle(items)
    }

    /// Accepts an externally produced ordering of the same records. Incoming
    /// priority values are ignored; only the array order counts.
    pub fn reorder(&self, new_order: Vec<T>) -> Self {
        Self::settle(new_order)
    }

    /// Reorders by a permutation of current positions: `order[i]` is the old
    /// position of the record that should end up at `i`. Anything that is not
    /// a permutation of `0..len` leaves the collection unchanged.
    pub fn reorder_positions(&self, order: &[usize]) -> Self {
        if !is_permutation(order, self.items.len()) {
            debug!(?order, len = self.items.len(), "reorder is not a permutation; ignored");
            return self.clone();
        }
        let items = order.iter().map(|&from| self.items[from].clone()).collect();
        Self::settle(items)
    }

    /// Moves one record from `from` to `to`, shifting the records in between.
    pub fn move_item(&self, from: usize, to: usize) -> Self {
        let len = self.items.len();
        if from >= len || to >= len {
            debug!(from, to, len, "move_item out of range; ignored");
            return self.clone();
        }
        let mut items = self.items.clone();
        let record = items.remove(from);
        items.insert(to, record);
        Self::settle(items)
    }

    /// Returns a single-record collection built by `factory` when empty;
    /// otherwise returns the collection unchanged.
    pub fn ensure_non_empty(&self, factory: impl FnOnce() -> T) -> Self {
        if self.items.is_empty() {
            Self::settle(vec![factory()])
        } else {
            self.clone()
        }
    }

    /// Applies `f` to every record, then re-derives priorities.
    pub fn map_records(&self, f: impl FnMut(T) -> T) -> Self {
        Self::settle(self.items.iter().cloned().map(f).collect())
    }
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &position in order {
        if position >= len || seen[position] {
            return false;
        }
        seen[position] = true;
    }
    true
}

impl<T: Prioritized> From<Vec<T>> for OrderedCollection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::settle(items)
    }
}

impl<T: Prioritized> FromIterator<T> for OrderedCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::settle(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a OrderedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// Wire input is trusted for order only; priorities are re-derived on the way in.
impl<'de, T> Deserialize<'de> for OrderedCollection<T>
where
    T: Prioritized + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::settle)
    }
}
