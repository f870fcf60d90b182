//! Append-only typed buffer with geometric growth.

use crate::error::{RefineError, RefineResult};

/// A growable numeric array backing vertex attributes and indices while a
/// mesh is being refined.
///
/// Appends that do not fit grow the allocation to
/// `max(len + additional, 2 * capacity)`, so pushes are amortized O(1).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrowableBuffer<T> {
    data: Vec<T>,
}

impl<T: Copy + Default> GrowableBuffer<T> {
    /// Create an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create an empty buffer with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Logical length.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Allocated capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Append one value.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.grow_for(1);
        self.data.push(value);
    }

    /// Append a run of values.
    pub fn extend_from_slice(&mut self, values: &[T]) {
        self.grow_for(values.len());
        self.data.extend_from_slice(values);
    }

    /// Read the value at `index`, or `None` past the logical length.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.data.get(index).copied()
    }

    /// Read the value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`, like slice indexing.
    #[inline]
    #[must_use]
    pub fn at(&self, index: usize) -> T {
        self.data[index]
    }

    /// Overwrite the value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`, like slice indexing.
    #[inline]
    pub fn set(&mut self, index: usize, value: T) {
        self.data[index] = value;
    }

    /// Shorten the logical length. No-op if `len` is not smaller.
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    /// Set the logical length without reallocating.
    ///
    /// Growing fills new slots with `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`RefineError::BufferOverrun`] if `len` exceeds the capacity.
    pub fn resize(&mut self, len: usize) -> RefineResult<()> {
        if len > self.data.capacity() {
            return Err(RefineError::BufferOverrun {
                requested: len,
                capacity: self.data.capacity(),
            });
        }
        self.data.resize(len, T::default());
        Ok(())
    }

    /// View the logical contents.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Take the logical contents, dropping spare capacity.
    #[must_use]
    pub fn into_vec(mut self) -> Vec<T> {
        self.data.shrink_to_fit();
        self.data
    }

    fn grow_for(&mut self, additional: usize) {
        let len = self.data.len();
        let capacity = self.data.capacity();
        if len + additional > capacity {
            let target = (len + additional).max(capacity * 2);
            self.data.reserve_exact(target - len);
        }
    }
}

impl<T> From<Vec<T>> for GrowableBuffer<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T: Copy> From<&[T]> for GrowableBuffer<T> {
    fn from(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}
