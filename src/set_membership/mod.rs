use crate::error::Result;

pub mod bloom;
pub mod hash_set;

pub trait SetMembership<T: ?Sized> {
    /// Returns false only if `item` was never inserted.
    fn might_contain(&self, item: &T) -> Result<bool>;

    /// Inserts `item` and reports whether it was probably present already.
    fn insert(&mut self, item: &T) -> Result<bool>;
}
