//! Wire identifiers and named registers.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A qubit, numbered from 0 in allocation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub u32);

/// A classical bit, numbered from 0 in allocation order.
///
/// Bit `i` is character `i` (from the left) of an outcome bitstring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl QubitId {
    /// Position in engine state arrays.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ClbitId {
    /// Position in an outcome bitstring.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// A named, contiguous block of wires.
///
/// Registers are allocated back to back, so member `i` of a register that
/// starts at `start` is wire `start + i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    /// Register name, unique per wire kind within a circuit.
    pub name: String,
    /// First wire.
    pub start: u32,
    /// Number of wires.
    pub size: u32,
}

impl Register {
    /// Wire numbers covered by this register.
    pub fn span(&self) -> Range<u32> {
        self.start..self.start + self.size
    }

    /// Member `i`, if the register is that wide.
    pub fn get(&self, i: u32) -> Option<u32> {
        (i < self.size).then(|| self.start + i)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(QubitId(4).to_string(), "q4");
        assert_eq!(ClbitId(0).to_string(), "c0");
    }

    #[test]
    fn test_register_span() {
        let syndrome = Register {
            name: "syndrome".into(),
            start: 3,
            size: 2,
        };
        assert_eq!(syndrome.span(), 3..5);
        assert_eq!(syndrome.get(1), Some(4));
        assert_eq!(syndrome.get(2), None);
        assert_eq!(syndrome.to_string(), "syndrome[2]");
    }
}
