use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::types::item::Item;
use crate::types::serial::Serial;

/// Everything listed at one point in time, keyed by serial.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventorySnapshot {
    items: BTreeMap<Serial, Item>,
}

impl InventorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts unless the serial is already present; the first record wins.
    pub fn insert(&mut self, item: Item) -> bool {
        match self.items.entry(item.key()) {
            Entry::Vacant(slot) => {
                slot.insert(item);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn merge(&mut self, other: InventorySnapshot) {
        for item in other.items.into_values() {
            self.insert(item);
        }
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.items.contains_key(&item.key())
    }

    #[cfg(test)]
    pub fn get(&self, serial: Serial) -> Option<&Item> {
        self.items.get(&serial)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in ascending serial order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Items of `self` whose serial is absent from `other`.
    pub fn difference<'a>(
        &'a self,
        other: &'a InventorySnapshot,
    ) -> impl Iterator<Item = &'a Item> {
        self.iter().filter(move |item| !other.contains(item))
    }
}

impl FromIterator<Item> for InventorySnapshot {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let mut snapshot = InventorySnapshot::new();
        for item in iter {
            snapshot.insert(item);
        }
        snapshot
    }
}
