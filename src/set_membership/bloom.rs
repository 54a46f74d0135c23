use crate::bit_vec::{BitStore, BitVec};
use crate::error::{Error, Result};
use crate::hash::{FilterHash, Indices};
use crate::plan::Dimensions;
use crate::set_membership::SetMembership;
use num_traits::PrimInt;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

/// Bloom filter over elements hashed through [`FilterHash`].
///
/// The bit length and number of probes are fixed at construction and bits
/// are never cleared, so an inserted element is reported present for the
/// lifetime of the filter.
pub struct BloomFilter<T: ?Sized, S = BitVec> {
    bits: S,
    dims: Dimensions,
    _phantom: PhantomData<T>,
}

impl<T: ?Sized> BloomFilter<T> {
    pub fn new(dims: Dimensions) -> Self {
        Self::with_store(dims)
    }

    /// Sizes the filter for `num_items` insertions at a false-positive
    /// `probability`. See [`Dimensions::plan`].
    pub fn with_probability<N: PrimInt>(num_items: N, probability: f64) -> Result<Self> {
        Ok(Self::new(Dimensions::plan(num_items, probability)?))
    }
}

impl<T: ?Sized, S: BitStore> BloomFilter<T, S> {
    pub fn with_store(dims: Dimensions) -> Self {
        tracing::debug!(
            num_bits = dims.num_bits(),
            num_hashes = dims.num_hashes(),
            "creating bloom filter"
        );
        Self {
            bits: S::with_len(dims.num_bits()),
            dims,
            _phantom: PhantomData,
        }
    }

    pub fn num_bits(&self) -> usize {
        self.dims.num_bits()
    }

    pub fn num_hashes(&self) -> usize {
        self.dims.num_hashes()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Returns true if no bit has been set yet.
    pub fn is_empty(&self) -> bool {
        self.bits.count_ones() == 0
    }

    /// Estimated number of distinct insertions, from the fraction of set bits.
    ///
    /// Saturates at `usize::MAX` once every bit is set.
    pub fn estimated_len(&self) -> usize {
        if self.dims.num_hashes() == 0 {
            return 0;
        }
        let m = self.dims.num_bits() as f64;
        let k = self.dims.num_hashes() as f64;
        let ones = self.bits.count_ones() as f64;
        (-m / k * (1. - ones / m).ln()) as usize
    }

    /// Probability that a never-inserted element is reported present, given
    /// the bits set so far.
    pub fn false_positive_rate(&self) -> f64 {
        let fill = self.bits.count_ones() as f64 / self.dims.num_bits() as f64;
        fill.powi(self.dims.num_hashes() as i32)
    }
}

impl<T, S> BloomFilter<T, S>
where
    T: FilterHash + ?Sized,
    S: BitStore,
{
    /// Bit positions probed for `item`.
    pub fn indices(&self, item: &T) -> Result<Indices> {
        if item.is_absent() {
            return Err(Error::invalid_parameter("item must be present"));
        }
        Ok(Indices::new(
            item.filter_hash(),
            self.dims.num_bits(),
            self.dims.num_hashes(),
        ))
    }
}

impl<T, S> SetMembership<T> for BloomFilter<T, S>
where
    T: FilterHash + ?Sized,
    S: BitStore,
{
    fn might_contain(&self, item: &T) -> Result<bool> {
        Ok(self.indices(item)?.all(|index| self.bits.get(index)))
    }

    /// Returns true if any probed bit was already set. Every probe is set
    /// regardless, so this is a hint rather than a duplicate check.
    fn insert(&mut self, item: &T) -> Result<bool> {
        let indices = self.indices(item)?;
        Ok(indices.fold(false, |acc, index| self.bits.set(index) | acc))
    }
}

impl<T: ?Sized, S: Clone> Clone for BloomFilter<T, S> {
    fn clone(&self) -> Self {
        Self {
            bits: self.bits.clone(),
            dims: self.dims,
            _phantom: PhantomData,
        }
    }
}

impl<T: ?Sized, S> Debug for BloomFilter<T, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BloomFilter {{ num_bits: {}, num_hashes: {} }}",
            self.dims.num_bits(),
            self.dims.num_hashes()
        )
    }
}
