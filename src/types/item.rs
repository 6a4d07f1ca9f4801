use crate::types::serial::Serial;

/// One serialized unit of a product currently listed for sale.
///
/// `PartialEq` compares every field. Set operations must go through
/// [`Item::key`], since two records with the same serial are the same unit
/// even if the listing text changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Product family name, e.g. "Les Paul Standard".
    pub name: String,
    pub serial: Serial,
    /// Canonical listing URL.
    pub url: String,
    /// Image URLs from a single fixed camera angle.
    pub images: Vec<String>,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        serial: Serial,
        url: impl Into<String>,
        images: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            serial,
            url: url.into(),
            images,
        }
    }

    pub fn key(&self) -> Serial {
        self.serial
    }

    pub fn images_joined(&self) -> String {
        self.images.join("\n")
    }
}
