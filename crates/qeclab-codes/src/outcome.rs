//! Parsed measurement outcomes.

use crate::error::{CodeError, CodeResult};

/// One shot's classical register, indexed by clbit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Outcome {
    bits: Vec<bool>,
}

impl Outcome {
    /// Parse a histogram key. Character `i` is clbit `i`.
    pub fn parse(bitstring: &str, expected_width: usize) -> CodeResult<Self> {
        let malformed = || CodeError::MalformedOutcome {
            bitstring: bitstring.to_string(),
            expected: expected_width,
        };

        if bitstring.len() != expected_width {
            return Err(malformed());
        }
        let bits = bitstring
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(malformed()),
            })
            .collect::<CodeResult<Vec<_>>>()?;
        Ok(Self { bits })
    }

    /// Wrap raw bits. Decoders index by clbit, so callers must supply
    /// exactly `num_clbits()` bits; [`Outcome::parse`] is the checked entry.
    #[cfg(test)]
    pub(crate) fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Value of clbit `i`.
    #[inline]
    pub fn bit(&self, i: usize) -> bool {
        self.bits[i]
    }

    /// Number of clbits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the outcome holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// All bits in clbit order.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// XOR of the listed clbits.
    pub fn parity(&self, positions: &[usize]) -> bool {
        positions.iter().fold(false, |acc, &i| acc ^ self.bits[i])
    }

    /// Syndrome value whose bit `k` is the parity of `checks[k]`.
    pub fn syndrome(&self, checks: &[&[usize]]) -> usize {
        checks
            .iter()
            .enumerate()
            .fold(0, |acc, (k, check)| acc | (usize::from(self.parity(check)) << k))
    }

    /// Little-endian value of `width` consecutive clbits starting at `start`.
    pub fn register_value(&self, start: usize, width: usize) -> usize {
        (0..width).fold(0, |acc, k| acc | (usize::from(self.bits[start + k]) << k))
    }

    /// A copy with clbit `i` inverted.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn flipped(&self, i: usize) -> Self {
        let mut bits = self.bits.clone();
        bits[i] = !bits[i];
        Self { bits }
    }
}

/// True when more than half of `bits` are set.
pub fn majority(bits: impl IntoIterator<Item = bool>) -> bool {
    let (ones, total) = bits
        .into_iter()
        .fold((0usize, 0usize), |(ones, total), b| (ones + usize::from(b), total + 1));
    2 * ones > total
}
