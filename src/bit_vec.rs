use fixedbitset::FixedBitSet;
use num_traits::{PrimInt, Unsigned};

/// Fixed-length bit array backing a filter.
///
/// Bits can only be set, never cleared.
pub trait BitStore {
    fn with_len(len: usize) -> Self;
    fn len(&self) -> usize;
    /// Sets bit `index` and returns its previous value.
    fn set(&mut self, index: usize) -> bool;
    fn get(&self, index: usize) -> bool;
    fn count_ones(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bits packed LSB-first into unsigned words of type `W`.
#[derive(Clone, PartialEq, Eq)]
pub struct BitVec<W = u64> {
    buf: Vec<W>,
    size: usize,
}

impl<W> BitVec<W>
where
    W: PrimInt + Unsigned,
{
    const WORD_SIZE: usize = 8 * size_of::<W>();

    pub fn new(size: usize) -> Self {
        let num_words = size.div_ceil(Self::WORD_SIZE);
        Self {
            buf: vec![W::zero(); num_words],
            size,
        }
    }

    pub fn words(&self) -> &[W] {
        &self.buf
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.size).map(move |index| {
            let (word_index, mask) = Self::index_and_mask(index);
            self.buf[word_index] & mask != W::zero()
        })
    }

    fn index_and_mask(index: usize) -> (usize, W) {
        (
            index / Self::WORD_SIZE,
            W::one() << (index % Self::WORD_SIZE),
        )
    }
}

impl<W> BitStore for BitVec<W>
where
    W: PrimInt + Unsigned,
{
    fn with_len(len: usize) -> Self {
        Self::new(len)
    }

    fn len(&self) -> usize {
        self.size
    }

    fn set(&mut self, index: usize) -> bool {
        assert!(index < self.size, "index out of bounds");
        let (word_index, mask) = Self::index_and_mask(index);
        let word = &mut self.buf[word_index];
        let previous = *word & mask != W::zero();
        *word = *word | mask;
        previous
    }

    fn get(&self, index: usize) -> bool {
        assert!(index < self.size, "index out of bounds");
        let (word_index, mask) = Self::index_and_mask(index);
        self.buf[word_index] & mask != W::zero()
    }

    fn count_ones(&self) -> usize {
        // Bits past `size` in the last word are never set.
        self.buf.iter().map(|w| w.count_ones() as usize).sum()
    }
}

impl<W> std::fmt::Debug for BitVec<W>
where
    W: PrimInt + Unsigned,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BitVec {{ size: {}, words: {}, ones: {} }}",
            self.size,
            self.buf.len(),
            self.count_ones()
        )
    }
}

impl BitStore for FixedBitSet {
    fn with_len(len: usize) -> Self {
        FixedBitSet::with_capacity(len)
    }

    fn len(&self) -> usize {
        FixedBitSet::len(self)
    }

    fn set(&mut self, index: usize) -> bool {
        assert!(index < FixedBitSet::len(self), "index out of bounds");
        self.put(index)
    }

    fn get(&self, index: usize) -> bool {
        assert!(index < FixedBitSet::len(self), "index out of bounds");
        self.contains(index)
    }

    fn count_ones(&self) -> usize {
        FixedBitSet::count_ones(self, ..)
    }
}
