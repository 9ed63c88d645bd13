//! Shared storage behind heap values.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Immutable heap payload. Cloning shares the allocation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Heap<T: ?Sized>(Arc<T>);

impl<T> Heap<T> {
    pub(crate) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }
}

impl<T: ?Sized> Heap<T> {
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Mutable heap payload. Cloning shares the allocation, so a write through
/// one handle is seen through every other.
pub struct Shared<T>(Arc<RwLock<T>>);

impl<T> Shared<T> {
    pub(crate) fn new(value: T) -> Self {
        Shared(Arc::new(RwLock::new(value)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Clone> Shared<T> {
    /// Fresh allocation holding a copy of the current contents.
    pub fn snapshot(&self) -> Self {
        Shared::new(self.read().clone())
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Shared(Arc::clone(&self.0))
    }
}

impl<T: PartialEq> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.read() == *other.read()
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_clone_shares_allocation() {
        let a = Heap::new(String::from("x"));
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(&*a, "x");
    }

    #[test]
    fn shared_writes_are_visible_through_clones() {
        let a = Shared::new(vec![1, 2]);
        let b = a.clone();
        b.write().push(3);
        assert_eq!(*a.read(), vec![1, 2, 3]);
    }

    #[test]
    fn snapshot_is_detached() {
        let a = Shared::new(vec![1]);
        let copy = a.snapshot();
        a.write().push(2);
        assert_eq!(*copy.read(), vec![1]);
        assert!(!copy.ptr_eq(&a));
    }
}
