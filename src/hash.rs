use std::hash::{DefaultHasher, Hash, Hasher};
use std::iter::FusedIterator;

/// Deterministic 32-bit hash used to derive filter indices.
///
/// Equal values must hash equally. Values for which [`FilterHash::is_absent`]
/// returns true are rejected by the filter.
pub trait FilterHash {
    fn filter_hash(&self) -> i32;

    fn is_absent(&self) -> bool {
        false
    }
}

/// Murmur3 32-bit finalizer.
fn fmix32(mut h: u32) -> i32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h as i32
}

fn fold64(v: u64) -> u32 {
    (v ^ (v >> 32)) as u32
}

macro_rules! impl_filter_hash_32 {
    ($($t:ty),*) => {$(
        impl FilterHash for $t {
            fn filter_hash(&self) -> i32 {
                fmix32(*self as u32)
            }
        }
    )*};
}

macro_rules! impl_filter_hash_64 {
    ($($t:ty),*) => {$(
        impl FilterHash for $t {
            fn filter_hash(&self) -> i32 {
                fmix32(fold64(*self as u64))
            }
        }
    )*};
}

impl_filter_hash_32!(i8, i16, i32, u8, u16, u32, char);
impl_filter_hash_64!(i64, u64, isize, usize);

impl FilterHash for i128 {
    fn filter_hash(&self) -> i32 {
        (*self as u128).filter_hash()
    }
}

impl FilterHash for u128 {
    fn filter_hash(&self) -> i32 {
        fmix32(fold64(*self as u64 ^ (*self >> 64) as u64))
    }
}

impl FilterHash for bool {
    fn filter_hash(&self) -> i32 {
        fmix32(if *self { 1231 } else { 1237 })
    }
}

impl FilterHash for f32 {
    fn filter_hash(&self) -> i32 {
        let bits = if *self == 0. {
            0
        } else if self.is_nan() {
            f32::NAN.to_bits()
        } else {
            self.to_bits()
        };
        fmix32(bits)
    }
}

impl FilterHash for f64 {
    fn filter_hash(&self) -> i32 {
        let bits = if *self == 0. {
            0
        } else if self.is_nan() {
            f64::NAN.to_bits()
        } else {
            self.to_bits()
        };
        fmix32(fold64(bits))
    }
}

impl FilterHash for str {
    fn filter_hash(&self) -> i32 {
        let h = self
            .chars()
            .fold(0u32, |h, c| h.wrapping_mul(31).wrapping_add(c as u32));
        fmix32(h)
    }
}

impl FilterHash for String {
    fn filter_hash(&self) -> i32 {
        self.as_str().filter_hash()
    }
}

impl<T: FilterHash> FilterHash for [T] {
    fn filter_hash(&self) -> i32 {
        let h = self.iter().fold(1u32, |h, item| {
            h.wrapping_mul(31).wrapping_add(item.filter_hash() as u32)
        });
        fmix32(h)
    }
}

impl<T: FilterHash> FilterHash for Vec<T> {
    fn filter_hash(&self) -> i32 {
        self.as_slice().filter_hash()
    }
}

impl<T: FilterHash, const N: usize> FilterHash for [T; N] {
    fn filter_hash(&self) -> i32 {
        self.as_slice().filter_hash()
    }
}

impl<T: FilterHash + ?Sized> FilterHash for &T {
    fn filter_hash(&self) -> i32 {
        (**self).filter_hash()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: FilterHash + ?Sized> FilterHash for Box<T> {
    fn filter_hash(&self) -> i32 {
        (**self).filter_hash()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

/// `None` is the absent value.
impl<T: FilterHash> FilterHash for Option<T> {
    fn filter_hash(&self) -> i32 {
        self.as_ref().map_or(0, T::filter_hash)
    }

    fn is_absent(&self) -> bool {
        self.as_ref().map_or(true, T::is_absent)
    }
}

/// Adapts any [`Hash`] type by hashing it with an unkeyed [`DefaultHasher`].
///
/// The resulting indices are stable for a given build of the standard
/// library, not across Rust releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hashed<T>(pub T);

impl<T: Hash> FilterHash for Hashed<T> {
    fn filter_hash(&self) -> i32 {
        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        fold64(hasher.finish()) as i32
    }
}

/// Bit positions probed for one element, by double hashing of `h1`.
#[derive(Debug, Clone)]
pub struct Indices {
    h1: i32,
    h2: i32,
    num_bits: usize,
    num_hashes: usize,
    i: usize,
}

impl Indices {
    pub fn new(h1: i32, num_bits: usize, num_hashes: usize) -> Self {
        assert!(num_bits > 0, "num_bits must be > 0");
        Self {
            h1,
            h2: ((h1 as u32) >> 16) as i32,
            num_bits,
            num_hashes,
            i: 0,
        }
    }
}

impl Iterator for Indices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.i >= self.num_hashes {
            return None;
        }
        // Wraps at 32 bits; a wider type would change the distribution.
        let combined = self.h1.wrapping_add((self.i as i32).wrapping_mul(self.h2));
        let combined = if combined < 0 { !combined } else { combined };
        self.i += 1;
        Some(combined as usize % self.num_bits)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.num_hashes - self.i;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Indices {}

impl FusedIterator for Indices {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices() {
        let cases: [(i32, [usize; 6]); 5] = [
            (0x1234_5678, [3456, 8116, 3191, 7851, 2926, 7586]),
            (-1, [0, 8024, 6464, 4904, 3344, 1784]),
            (i32::MIN, [2737, 8309, 4296, 283, 5855, 1842]),
            (i32::MAX, [2737, 8311, 4299, 287, 5860, 1848]),
            (-123_456_789, [1988, 5431, 8874, 2732, 6175, 33]),
        ];
        for (h1, expected) in cases {
            assert_eq!(
                Indices::new(h1, 9585, 6).collect::<Vec<_>>(),
                expected,
                "h1 = {h1}"
            );
        }
        assert_eq!(
            Indices::new(0x1234_5678, 1000, 4).collect::<Vec<_>>(),
            vec![896, 556, 216, 876]
        );
    }

    #[test]
    fn test_indices_in_range() {
        for h1 in [i32::MIN, -65_536, -1, 0, 1, 65_535, 65_536, i32::MAX] {
            for num_bits in [1, 2, 63, 64, 9585] {
                let indices = Indices::new(h1, num_bits, 20);
                assert_eq!(indices.len(), 20);
                assert!(indices.clone().all(|index| index < num_bits));
            }
        }
    }

    #[test]
    fn test_indices_zero_hashes() {
        let mut indices = Indices::new(42, 14, 0);
        assert_eq!(indices.len(), 0);
        assert_eq!(indices.next(), None);
    }

    #[test]
    fn test_small_values_spread() {
        // Identity hashes would leave h2 = 0 and collapse every probe onto one bit.
        let indices = Indices::new(42i32.filter_hash(), 9585, 6).collect::<Vec<_>>();
        assert_eq!(indices, vec![6912, 9087, 1677, 3852, 6027, 8202]);
    }

    #[test]
    fn test_filter_hash_values() {
        assert_eq!(42i32.filter_hash(), 142_593_372);
        assert_eq!(7u8.filter_hash(), 415_870_660);
        assert_eq!((-1i32).filter_hash(), -2_114_883_783);
        assert_eq!((-1i64).filter_hash(), 0);
        assert_eq!(((1u64 << 40) + 5).filter_hash(), -1_186_717_723);
        assert_eq!(true.filter_hash(), 262_886_248);
        assert_eq!(false.filter_hash(), -878_682_501);
        assert_eq!("ab".filter_hash(), 1_868_774_452);
        assert_eq!([1i32, 2].filter_hash(), 998_775_201);
    }

    #[test]
    fn test_equal_values_hash_equally() {
        assert_eq!("bloom".filter_hash(), String::from("bloom").filter_hash());
        assert_eq!(vec![1u16, 2, 3].filter_hash(), [1u16, 2, 3].filter_hash());
        assert_eq!(Box::new(5u64).filter_hash(), 5u64.filter_hash());
        assert_eq!((&&'x').filter_hash(), 'x'.filter_hash());
        assert_eq!(Some(9i32).filter_hash(), 9i32.filter_hash());
        assert_eq!(0.0f64.filter_hash(), (-0.0f64).filter_hash());
        assert_eq!(f32::NAN.filter_hash(), (-f32::NAN).filter_hash());
        assert_eq!(
            Hashed(("a", 1)).filter_hash(),
            Hashed(("a", 1)).filter_hash()
        );
    }

    #[test]
    fn test_is_absent() {
        assert!(None::<i32>.is_absent());
        assert!(Some(None::<i32>).is_absent());
        assert!((&None::<String>).is_absent());
        assert!(!Some(0i32).is_absent());
        assert!(!0u64.is_absent());
        assert!(!"".is_absent());
        assert!(!Hashed(None::<i32>).is_absent());
    }
}
