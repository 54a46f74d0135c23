use crate::error::{Error, Result};
use crate::hash::FilterHash;
use crate::set_membership::SetMembership;
use std::collections::HashSet;
use std::hash::Hash;

/// Exact membership, for comparing filters against ground truth.
impl<T> SetMembership<T> for HashSet<T>
where
    T: Clone + Eq + Hash + FilterHash,
{
    fn might_contain(&self, item: &T) -> Result<bool> {
        if item.is_absent() {
            return Err(Error::invalid_parameter("item must be present"));
        }
        Ok(HashSet::<T>::contains(self, item))
    }

    fn insert(&mut self, item: &T) -> Result<bool> {
        if item.is_absent() {
            return Err(Error::invalid_parameter("item must be present"));
        }
        Ok(!HashSet::<T>::insert(self, item.clone()))
    }
}
