use core::{
    fmt::{self, Debug, Formatter},
    marker::PhantomData,
    mem::{align_of, size_of},
    ptr::{self, NonNull},
    slice,
};

use std::io;

use crate::{
    allocator::Allocator,
    global_alloc::{GlobalAlloc, GLOBAL_ALLOC},
};

use super::{ByteVec, Describe, Result};

/// Typed view over a [`ByteVec`] sized for `T`.
///
/// The first `len` elements are treated as initialized: they are exposed
/// through [`as_slice`](Self::as_slice) and dropped in place when the vector
/// is dropped. Everything past `len` is uninitialized memory owned by the
/// vector.
pub struct RawVec<'alloc, T, Alloc: Allocator> {
    inner: ByteVec<'alloc, Alloc>,
    _marker: PhantomData<T>,
}

pub type GlobalRawVec<T> = RawVec<'static, T, GlobalAlloc>;

const_assert!(size_of!(GlobalRawVec<u32>) == size_of!(Option<GlobalRawVec<u32>>));

unsafe impl<'alloc, T: Send, Alloc: Allocator + Sync> Send for RawVec<'alloc, T, Alloc> {}

impl<'alloc, T, Alloc: Allocator> RawVec<'alloc, T, Alloc> {

    const NOT_ZERO_SIZED: () = assert!(size_of::<T>() != 0, "zero-sized element types are not supported");

    pub fn new_in(alloc: &'alloc Alloc) -> Self {
        let () = Self::NOT_ZERO_SIZED;
        Self {
            inner: unsafe { ByteVec::new_unchecked(size_of::<T>(), align_of::<T>(), alloc) },
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    #[inline(always)]
    pub fn item_size(&self) -> usize {
        self.inner.item_size()
    }

    #[inline(always)]
    pub fn is_allocated(&self) -> bool {
        self.inner.is_allocated()
    }

    #[inline(always)]
    pub fn as_non_null(&self) -> NonNull<T> {
        self.inner.items().map_or(NonNull::dangling(), |items| items.cast())
    }

    /// Dangling when nothing is allocated.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.as_non_null().as_ptr()
    }

    /// Dangling when nothing is allocated.
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.as_non_null().as_ptr()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len()) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len()) }
    }

    /// # Safety
    /// The first `len` elements must be initialized.
    ///
    /// # Panics
    /// If `len` is larger than the capacity.
    #[inline(always)]
    pub unsafe fn set_len(&mut self, len: usize) {
        self.inner.set_len(len)
    }

    /// See [`ByteVec::reserve`].
    #[inline(always)]
    pub fn reserve(&mut self, new_capacity: usize) -> Result<usize> {
        self.inner.reserve(new_capacity)
    }

    #[inline(always)]
    pub fn describe(&self) -> Describe {
        self.inner.describe()
    }

    #[inline(always)]
    pub fn debug_describe(&self, out: &mut impl io::Write) -> io::Result<()> {
        self.inner.debug_describe(out)
    }
}

impl<T> GlobalRawVec<T> {

    pub fn new() -> Self {
        Self::new_in(&GLOBAL_ALLOC)
    }
}

impl<T> Default for GlobalRawVec<T> {

    fn default() -> Self {
        Self::new()
    }
}

impl<'alloc, T: Debug, Alloc: Allocator> Debug for RawVec<'alloc, T, Alloc> {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawVec")
            .field("items", &self.as_slice())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl<'alloc, T, Alloc: Allocator> Drop for RawVec<'alloc, T, Alloc> {

    fn drop(&mut self) {
        unsafe { ptr::drop_in_place(self.as_mut_slice()) }
    }
}
