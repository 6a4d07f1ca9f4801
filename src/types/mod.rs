pub mod item;
pub mod serial;
pub mod snapshot;
