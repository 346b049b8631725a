//! The two ways of handing indices of `[0, N)` to workers.

mod blocks;
mod cursor;

use std::fmt;
use std::str::FromStr;

pub use blocks::block_ranges;
pub use cursor::SharedCursor;

/// Work distribution policy for one pool run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Strategy {
    /// Contiguous precomputed block per worker.
    Static,
    /// Workers claim one index at a time from a locked cursor.
    Dynamic,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Static, Strategy::Dynamic];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Static => "static",
            Strategy::Dynamic => "dynamic",
        }
    }

    /// Report label. Static blocks are the unbalanced variant.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Static => "Unbalanced",
            Strategy::Dynamic => "Balanced",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" | "unbalanced" => Ok(Strategy::Static),
            "dynamic" | "balanced" => Ok(Strategy::Dynamic),
            other => Err(format!("unknown strategy: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse() {
        assert_eq!("static".parse::<Strategy>(), Ok(Strategy::Static));
        assert_eq!("Balanced".parse::<Strategy>(), Ok(Strategy::Dynamic));
        assert!("stealing".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Strategy::Static.label(), "Unbalanced");
        assert_eq!(Strategy::Dynamic.to_string(), "dynamic");
    }
}
