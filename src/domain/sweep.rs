// Bit-depth sweep domain model
use std::fmt;
use thiserror::Error;

/// Finest quantization visited by the sweep.
pub const MAX_BIT_DEPTH: u8 = 15;
/// Coarsest quantization visited by the sweep.
pub const MIN_BIT_DEPTH: u8 = 1;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("bit depth {0} is outside {MIN_BIT_DEPTH}..={MAX_BIT_DEPTH}")]
pub struct BitDepthError(pub u8);

/// Number of bits per quantized sample at one sweep point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitDepth(u8);

impl BitDepth {
    pub fn new(bits: u8) -> Result<Self, BitDepthError> {
        if (MIN_BIT_DEPTH..=MAX_BIT_DEPTH).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(BitDepthError(bits))
        }
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// The full sweep, finest first: 15, 14, ..., 1.
    pub fn sweep() -> impl Iterator<Item = BitDepth> {
        (MIN_BIT_DEPTH..=MAX_BIT_DEPTH).rev().map(BitDepth)
    }

    #[cfg(test)]
    pub fn sweep_len() -> usize {
        usize::from(MAX_BIT_DEPTH - MIN_BIT_DEPTH + 1)
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_is_strictly_descending_without_gaps() {
        let bits: Vec<u8> = BitDepth::sweep().map(BitDepth::bits).collect();
        assert_eq!(bits, (1..=15).rev().collect::<Vec<u8>>());
        assert_eq!(bits.len(), BitDepth::sweep_len());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(BitDepth::new(0), Err(BitDepthError(0)));
        assert_eq!(BitDepth::new(16), Err(BitDepthError(16)));
        assert_eq!(BitDepth::new(1).map(BitDepth::bits), Ok(1));
        assert_eq!(BitDepth::new(15).map(BitDepth::bits), Ok(15));
    }
}
