//! Bloom filter with planned dimensions and double-hashed probes.
//!
//! ```
//! use bitbloom::{BloomFilter, SetMembership};
//!
//! let mut filter = BloomFilter::<u64>::with_probability(1000, 0.01)?;
//! filter.insert(&17)?;
//! assert!(filter.might_contain(&17)?);
//! # Ok::<(), bitbloom::Error>(())
//! ```

pub mod bit_vec;
pub mod error;
pub mod hash;
pub mod plan;
pub mod set_membership;

pub use bit_vec::{BitStore, BitVec};
pub use error::{Error, Result};
pub use hash::{FilterHash, Hashed, Indices};
pub use plan::Dimensions;
pub use set_membership::bloom::BloomFilter;
pub use set_membership::SetMembership;
