use crate::types::item::Item;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingEvent {
    /// Present in the previous snapshot, absent now.
    Sold(Item),
    /// Absent from the previous snapshot, present now.
    Listed(Item),
}

impl ListingEvent {
    pub fn item(&self) -> &Item {
        match self {
            Self::Sold(item) | Self::Listed(item) => item,
        }
    }
}
