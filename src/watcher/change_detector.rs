use crate::events::ListingEvent;
use crate::types::item::Item;
use crate::types::snapshot::InventorySnapshot;

/// Serial-keyed difference between two snapshots, each side in ascending serial order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryDiff {
    pub sold: Vec<Item>,
    pub new: Vec<Item>,
}

impl InventoryDiff {
    pub fn is_empty(&self) -> bool {
        self.sold.is_empty() && self.new.is_empty()
    }

    /// Sold events first, then new listings.
    pub fn into_events(self) -> Vec<ListingEvent> {
        self.sold
            .into_iter()
            .map(ListingEvent::Sold)
            .chain(self.new.into_iter().map(ListingEvent::Listed))
            .collect()
    }
}

pub fn diff(previous: &InventorySnapshot, current: &InventorySnapshot) -> InventoryDiff {
    InventoryDiff {
        sold: previous.difference(current).cloned().collect(),
        new: current.difference(previous).cloned().collect(),
    }
}
