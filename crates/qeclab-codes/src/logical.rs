//! The logical basis state a code protects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodeError;

/// A logical Z-basis state, written `"0"` or `"1"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LogicalBit {
    /// Logical |0⟩.
    #[default]
    #[serde(rename = "0")]
    Zero,
    /// Logical |1⟩.
    #[serde(rename = "1")]
    One,
}

impl LogicalBit {
    /// Map a classical bit to a logical state.
    pub fn from_bool(bit: bool) -> Self {
        if bit { LogicalBit::One } else { LogicalBit::Zero }
    }

    /// Whether this is logical |1⟩.
    pub fn is_one(self) -> bool {
        self == LogicalBit::One
    }

    /// The other basis state.
    #[must_use]
    pub fn flipped(self) -> Self {
        Self::from_bool(!self.is_one())
    }
}

impl fmt::Display for LogicalBit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_one() { "1" } else { "0" })
    }
}

impl FromStr for LogicalBit {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(LogicalBit::Zero),
            "1" => Ok(LogicalBit::One),
            other => Err(CodeError::InvalidInput(format!(
                "logical state must be \"0\" or \"1\", got \"{other}\""
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_logical_bit() {
        assert_eq!("0".parse::<LogicalBit>().unwrap(), LogicalBit::Zero);
        assert_eq!("1".parse::<LogicalBit>().unwrap(), LogicalBit::One);
        for bad in ["2", "", "01", "+"] {
            assert!(matches!(
                bad.parse::<LogicalBit>(),
                Err(CodeError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_flip_and_display() {
        assert_eq!(LogicalBit::Zero.flipped(), LogicalBit::One);
        assert_eq!(LogicalBit::One.to_string(), "1");
        assert_eq!(LogicalBit::default(), LogicalBit::Zero);
    }
}
