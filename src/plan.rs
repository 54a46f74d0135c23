use crate::error::{Error, Result};
use num_traits::PrimInt;
use std::f64::consts::LN_2;

/// Bit length and probe count of a filter, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    num_bits: usize,
    num_hashes: usize,
}

impl Dimensions {
    pub fn new(num_bits: usize, num_hashes: usize) -> Result<Self> {
        if num_bits == 0 {
            return Err(Error::invalid_parameter("num_bits must be > 0"));
        }
        Ok(Self {
            num_bits,
            num_hashes,
        })
    }

    /// Plans the optimal dimensions for `num_items` insertions at a target
    /// false-positive `probability`.
    ///
    /// Both values are truncated toward zero. The bit length is raised to 1
    /// when the formula yields 0. The probe count is left as computed and
    /// may be 0 for small `num_items` with a loose `probability`; such a
    /// filter accepts every element. Use [`Dimensions::with_min_hashes`] to
    /// rule that out.
    pub fn plan<N: PrimInt>(num_items: N, probability: f64) -> Result<Self> {
        if num_items <= N::zero() {
            return Err(Error::invalid_parameter("num_items must be > 0"));
        }
        if !(0. < probability && probability < 1.) {
            return Err(Error::invalid_parameter(format!(
                "probability must be in the range (0, 1), got {probability}"
            )));
        }
        let n = num_items
            .to_f64()
            .ok_or_else(|| Error::invalid_parameter("num_items is not representable as f64"))?;

        let bits = (-(n * probability.ln()) / (LN_2 * LN_2)).floor();
        if !bits.is_finite() || bits >= usize::MAX as f64 {
            return Err(Error::invalid_parameter(format!(
                "planned bit count {bits} does not fit in memory"
            )));
        }
        let num_bits = (bits as usize).max(1);
        let num_hashes = (num_bits as f64 * LN_2 / n).floor() as usize;

        tracing::debug!(
            num_items = n,
            probability,
            num_bits,
            num_hashes,
            "planned filter dimensions"
        );
        if num_hashes == 0 {
            tracing::warn!(
                num_items = n,
                probability,
                num_bits,
                "planned zero hash functions, filter will report every element as present"
            );
        }

        Ok(Self {
            num_bits,
            num_hashes,
        })
    }

    pub fn with_min_hashes(self, min: usize) -> Self {
        Self {
            num_hashes: self.num_hashes.max(min),
            ..self
        }
    }

    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    pub fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    /// Expected false-positive rate after `num_items` distinct insertions.
    pub fn false_positive_rate(&self, num_items: usize) -> f64 {
        let m = self.num_bits as f64;
        let k = self.num_hashes as f64;
        let n = num_items as f64;
        (1. - (-k * n / m).exp()).powi(self.num_hashes as i32)
    }
}
