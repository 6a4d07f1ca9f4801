use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Serial number of a single physical unit. This is the only identity of a listing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Serial(u64);

impl Serial {
    pub fn new(value: u64) -> Self {
        Serial(value)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<u64> for Serial {
    fn from(value: u64) -> Self {
        Serial::new(value)
    }
}

impl FromStr for Serial {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Serial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_padded_text() {
        assert_eq!(" 123 ".parse::<Serial>().unwrap(), Serial::new(123));
    }

    #[test]
    fn rejects_non_numeric_text() {
        assert!("12a".parse::<Serial>().is_err());
        assert!("-4".parse::<Serial>().is_err());
    }
}
