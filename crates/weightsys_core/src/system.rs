use std::{collections::HashMap, hash::Hash};

use rand::{thread_rng, Rng};
use tracing::{trace, warn};

use crate::prelude::*;

/// Multiplier applied to an item's weight when it reports a success.
pub const SUCCESS_FACTOR: f64 = 1.1;
/// Multiplier applied to an item's weight when it reports a failure.
pub const FAILURE_FACTOR: f64 = 0.9;

/// Weighted random picker over a set of items.
///
/// Every weight set through [`WeightSystem::add_item`] stays within `[min_weight, max_weight]`.
/// A success reported for an unknown item is the one way to store a weight of zero,
/// see [`WeightSystem::adjust_weight`].
/// The total and average weight are kept up to date on every change instead of
/// being recomputed, so reading them is free.
///
/// Items are kept in a vector ordered by insertion (removal swaps the last item
/// into the hole), with a side index for lookups. Selection walks the vector,
/// so a seeded rng always picks the same items.
#[derive(Clone, Debug)]
pub struct WeightSystem<T> {
    entries: Vec<WeightedItem<T>>,
    index: HashMap<T, usize>,
    min_weight: f64,
    max_weight: f64,
    total_weight: f64,
    avg_weight: f64,
}

impl<T: Eq + Hash + Clone> Default for WeightSystem<T> {
    fn default() -> Self {
        Self::new(NewOptions::default())
    }
}

impl<T: Eq + Hash + Clone> WeightSystem<T> {
    /// Creates an empty system.
    ///
    /// Bounds are normalized so that `1 <= min_weight <= max_weight`, see [`NewOptions`].
    pub fn new(options: NewOptions) -> Self {
        let (min_weight, max_weight) = options.normalized();
        if (min_weight, max_weight) != (options.min_weight, options.max_weight) {
            trace!(target: "weights", "bounds {:?} normalized to [{}, {}]", options, min_weight, max_weight);
        }
        let mut system = Self {
            entries: vec![],
            index: HashMap::new(),
            min_weight,
            max_weight,
            total_weight: 0.0,
            avg_weight: 0.0,
        };
        system.update_avg_weight();
        system
    }

    pub fn min_weight(&self) -> f64 {
        self.min_weight
    }

    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Average weight of the stored items, or the middle of the bounds when empty.
    pub fn avg_weight(&self) -> f64 {
        self.avg_weight
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index.contains_key(item)
    }

    pub fn weight(&self, item: &T) -> Option<f64> {
        self.index.get(item).map(|&i| self.entries[i].weight)
    }

    /// Iterates items and weights in selection order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
        self.entries.iter().map(|entry| (&entry.item, entry.weight))
    }

    fn update_avg_weight(&mut self) {
        self.avg_weight = if self.entries.is_empty() {
            (self.min_weight + self.max_weight) / 2.0
        } else {
            self.total_weight / self.entries.len() as f64
        };
    }

    // NaN weights collapse to max_weight, the same as f64::min would give.
    fn clamp(&self, weight: f64) -> f64 {
        weight.min(self.max_weight).max(self.min_weight)
    }

    fn insert(&mut self, item: T, weight: f64) {
        self.index.insert(item.clone(), self.entries.len());
        self.entries.push(WeightedItem::new(item, weight));
    }

    /// Adds an item, clamping its weight into the bounds.
    ///
    /// Does nothing if the item is already present, the existing weight is kept.
    pub fn add_item(&mut self, item: T, options: AddItemOptions) {
        if self.contains(&item) {
            return;
        }
        let weight = self.clamp(options.weight.unwrap_or(self.avg_weight));
        self.insert(item, weight);
        self.total_weight += weight;
        self.update_avg_weight();
        trace!(target: "weights", "added item with weight {}, total {}", weight, self.total_weight);
    }

    /// Adds every item with the same options. Items already present are skipped.
    pub fn add_items<I: IntoIterator<Item = T>>(&mut self, items: I, options: AddItemOptions) {
        for item in items {
            self.add_item(item, options);
        }
    }

    pub fn remove_item(&mut self, item: &T) {
        let Some(i) = self.index.remove(item) else {
            return;
        };
        let removed = self.entries.swap_remove(i);
        if let Some(moved) = self.entries.get(i) {
            self.index.insert(moved.item.clone(), i);
        }
        self.total_weight -= removed.weight;
        self.update_avg_weight();
        trace!(target: "weights", "removed item with weight {}, total {}", removed.weight, self.total_weight);
    }

    /// Scales the weight of an item by [`SUCCESS_FACTOR`] up to `max_weight`,
    /// or by [`FAILURE_FACTOR`] down to `min_weight`.
    ///
    /// An item that is not present is treated as having a weight of zero and gets
    /// inserted with the adjusted weight: zero on success, `min_weight` on failure.
    pub fn adjust_weight(&mut self, item: T, success: bool) {
        let slot = self.index.get(&item).copied();
        let old_weight = slot.map_or(0.0, |i| self.entries[i].weight);
        let new_weight = if success {
            (old_weight * SUCCESS_FACTOR).min(self.max_weight)
        } else {
            (old_weight * FAILURE_FACTOR).max(self.min_weight)
        };
        match slot {
            Some(i) => self.entries[i].weight = new_weight,
            None => {
                warn!(target: "weights", "adjusting an unknown item, inserting it with weight {}", new_weight);
                self.insert(item, new_weight);
            }
        }
        self.total_weight += new_weight - old_weight;
        self.update_avg_weight();
        trace!(target: "weights", "adjusted weight {} -> {} (success: {})", old_weight, new_weight, success);
    }

    /// Picks an item with probability proportional to its weight.
    ///
    /// Returns `None` only when the system is empty.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<&T> {
        let mut r = rng.gen::<f64>() * self.total_weight;
        for entry in self.entries.iter() {
            r -= entry.weight;
            if r <= 0.0 {
                return Some(&entry.item);
            }
        }
        let first = self.entries.first().map(|entry| &entry.item);
        if first.is_some() {
            warn!(target: "weights", "selection fell through with total {}, r {}", self.total_weight, r);
        }
        first
    }

    /// Picks an item with the thread rng, see [`WeightSystem::choose`].
    ///
    /// An empty system yields `T::default()`.
    pub fn get_item(&self) -> T
    where
        T: Default,
    {
        self.choose(&mut thread_rng()).cloned().unwrap_or_default()
    }

    /// Copy of all weights, changing it doesn't affect the system.
    pub fn weights(&self) -> HashMap<T, f64> {
        self.iter()
            .map(|(item, weight)| (item.clone(), weight))
            .collect()
    }

    /// Snapshot of every item from the highest weight to the lowest.
    /// Items with equal weight keep their selection order.
    pub fn sorted_weights(&self) -> Vec<WeightedItem<T>> {
        let mut items = self.entries.clone();
        items.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        items
    }
}

impl<T: Eq + Hash + Clone> Extend<T> for WeightSystem<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_items(iter, AddItemOptions::default());
    }
}
