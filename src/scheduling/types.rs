use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Fetch, diff and announce listing changes.
    Scrape,
    /// Daily liveness message.
    Heartbeat,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scrape => write!(f, "scrape"),
            Self::Heartbeat => write!(f, "heartbeat"),
        }
    }
}
