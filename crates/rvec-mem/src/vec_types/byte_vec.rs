use core::{
    fmt::{self, Debug, Formatter},
    ptr::{self, NonNull},
};

use std::io;

use crate::{
    allocator::Allocator,
    errors::CapacityError,
    global_alloc::{GlobalAlloc, GLOBAL_ALLOC},
    const_fn::natural_align,
};

use super::{Describe, Result};

use CapacityError::{InvalidReservation, AllocFailed, MaxCapacityExceeded, ZeroSizedElement, InvalidAlignment};

/// Untyped buffer of `capacity` elements, each `item_size` bytes wide.
///
/// Nothing is allocated until the first [`reserve`](Self::reserve). Every
/// later reservation resizes the block to exactly the requested capacity.
/// `len` is bookkeeping for the caller and is never changed by the buffer
/// itself.
pub struct ByteVec<'alloc, Alloc: Allocator> {
    items: Option<NonNull<u8>>,
    item_size: usize,
    align: usize,
    len: usize,
    capacity: usize,
    alloc: &'alloc Alloc,
}

pub type GlobalByteVec = ByteVec<'static, GlobalAlloc>;

unsafe impl<'alloc, Alloc: Allocator + Sync> Send for ByteVec<'alloc, Alloc> {}

impl<'alloc, Alloc: Allocator> ByteVec<'alloc, Alloc> {

    pub fn new_in(item_size: usize, alloc: &'alloc Alloc) -> Result<Self> {
        Self::with_align_in(item_size, natural_align(item_size), alloc)
    }

    pub fn with_align_in(item_size: usize, align: usize, alloc: &'alloc Alloc) -> Result<Self> {
        if item_size == 0 {
            return Err(ZeroSizedElement)
        }
        if !align.is_power_of_two() || item_size % align != 0 {
            return Err(InvalidAlignment { align })
        }
        Ok(unsafe { Self::new_unchecked(item_size, align, alloc) })
    }

    /// # Safety
    /// `item_size` must be non-zero and a multiple of `align`, which must be a
    /// power of two.
    #[inline(always)]
    pub(crate) const unsafe fn new_unchecked(
        item_size: usize,
        align: usize,
        alloc: &'alloc Alloc,
    ) -> Self
    {
        Self {
            items: None,
            item_size,
            align,
            len: 0,
            capacity: 0,
            alloc,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn item_size(&self) -> usize {
        self.item_size
    }

    #[inline(always)]
    pub fn align(&self) -> usize {
        self.align
    }

    #[inline(always)]
    pub fn is_allocated(&self) -> bool {
        self.items.is_some()
    }

    #[inline(always)]
    pub fn items(&self) -> Option<NonNull<u8>> {
        self.items
    }

    /// Null when nothing is allocated.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const u8 {
        self.items.map_or(ptr::null(), |items| items.as_ptr())
    }

    /// Null when nothing is allocated.
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.items.map_or(ptr::null_mut(), |items| items.as_ptr())
    }

    #[inline(always)]
    pub fn size_in_bytes(&self) -> usize {
        self.capacity * self.item_size
    }

    /// Largest capacity whose byte size still fits in `isize`.
    #[inline(always)]
    pub fn max_capacity(&self) -> usize {
        isize::MAX as usize / self.item_size
    }

    #[inline(always)]
    pub fn set_len(&mut self, len: usize) {
        if len > self.capacity { panic!("len was larger than capacity") }
        self.len = len;
    }

    /// Allocates or resizes the buffer to hold exactly `new_capacity` elements.
    ///
    /// Fails without touching any state when `new_capacity` is zero, below
    /// [`len`](Self::len), too large to address, or when the allocator
    /// refuses the request.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<usize> {
        if new_capacity == 0 || new_capacity < self.len {
            return Err(InvalidReservation { len: self.len, requested: new_capacity })
        }
        let max_capacity = self.max_capacity();
        if new_capacity > max_capacity {
            return Err(MaxCapacityExceeded { max_capacity })
        }
        let new_size = new_capacity * self.item_size;
        let items = match self.items {
            None => unsafe {
                self.alloc.allocate_raw(new_size, self.align)
            },
            Some(items) => unsafe {
                self.alloc.reallocate_raw(items, self.size_in_bytes(), new_size, self.align)
            },
        };
        let items = items.ok_or(AllocFailed { new_capacity })?;
        self.items = Some(items);
        self.capacity = new_capacity;
        Ok(new_capacity)
    }

    pub fn describe(&self) -> Describe {
        Describe {
            items: self.items,
            item_size: self.item_size,
            len: self.len,
            capacity: self.capacity,
        }
    }

    pub fn debug_describe(&self, out: &mut impl io::Write) -> io::Result<()> {
        writeln!(out, "{}", self.describe())
    }
}

impl GlobalByteVec {

    pub fn new(item_size: usize) -> Result<Self> {
        Self::new_in(item_size, &GLOBAL_ALLOC)
    }

    pub fn with_align(item_size: usize, align: usize) -> Result<Self> {
        Self::with_align_in(item_size, align, &GLOBAL_ALLOC)
    }
}

impl<'alloc, Alloc: Allocator> Debug for ByteVec<'alloc, Alloc> {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteVec")
            .field("items", &self.as_ptr())
            .field("item_size", &self.item_size)
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<'alloc, Alloc: Allocator> Drop for ByteVec<'alloc, Alloc> {

    fn drop(&mut self) {
        if let Some(items) = self.items.take() {
            unsafe { self.alloc.free_raw(items, self.size_in_bytes(), self.align) }
        }
        self.capacity = 0;
    }
}

#[cfg(test)]
mod tests {
    use core::slice;

    use proptest::prelude::*;

    use super::*;
    use crate::test_alloc::{CountingAlloc, FailingAlloc};

    #[test]
    fn new_vector_is_empty() {
        for item_size in [1, 2, 3, 4, 8, 24] {
            let vec = GlobalByteVec::new(item_size).unwrap();
            assert_eq!(vec.capacity(), 0);
            assert_eq!(vec.len(), 0);
            assert_eq!(vec.item_size(), item_size);
            assert!(!vec.is_allocated());
            assert!(vec.as_ptr().is_null());
        }
    }

    #[test]
    fn zero_item_size_is_rejected() {
        assert_eq!(GlobalByteVec::new(0).unwrap_err(), ZeroSizedElement);
    }

    #[test]
    fn alignment_must_divide_item_size() {
        assert_eq!(GlobalByteVec::with_align(8, 3).unwrap_err(), InvalidAlignment { align: 3 });
        assert_eq!(GlobalByteVec::with_align(6, 4).unwrap_err(), InvalidAlignment { align: 4 });
        assert_eq!(GlobalByteVec::with_align(16, 16).unwrap().align(), 16);
    }

    #[test]
    fn first_reservation_allocates_fresh() {
        let alloc = CountingAlloc::default();
        let mut vec = ByteVec::new_in(8, &alloc).unwrap();
        assert_eq!(vec.reserve(5), Ok(5));
        assert_eq!(vec.capacity(), 5);
        assert!(vec.is_allocated());
        assert_eq!(alloc.allocations(), 1);
        assert_eq!(alloc.reallocations(), 0);
        assert_eq!(alloc.last_size(), 40);
    }

    #[test]
    fn later_reservations_resize() {
        let alloc = CountingAlloc::default();
        let mut vec = ByteVec::new_in(4, &alloc).unwrap();
        vec.reserve(2).unwrap();
        vec.reserve(10).unwrap();
        vec.reserve(3).unwrap();
        assert_eq!(vec.capacity(), 3);
        assert_eq!(alloc.allocations(), 1);
        assert_eq!(alloc.reallocations(), 2);
        assert_eq!(alloc.last_size(), 12);
    }

    #[test]
    fn zero_reservation_is_invalid_in_any_state() {
        let mut vec = GlobalByteVec::new(4).unwrap();
        assert_eq!(vec.reserve(0), Err(InvalidReservation { len: 0, requested: 0 }));
        assert!(!vec.is_allocated());
        vec.reserve(4).unwrap();
        assert_eq!(vec.reserve(0), Err(InvalidReservation { len: 0, requested: 0 }));
        assert_eq!(vec.capacity(), 4);
    }

    #[test]
    fn reservation_below_len_is_invalid() {
        let mut vec = GlobalByteVec::new(2).unwrap();
        vec.reserve(8).unwrap();
        vec.set_len(6);
        assert_eq!(vec.reserve(5), Err(InvalidReservation { len: 6, requested: 5 }));
        assert_eq!(vec.capacity(), 8);
        assert_eq!(vec.reserve(6), Ok(6));
        assert_eq!(vec.len(), 6);
    }

    #[test]
    #[should_panic(expected = "len was larger than capacity")]
    fn len_cannot_exceed_capacity() {
        let mut vec = GlobalByteVec::new(1).unwrap();
        vec.reserve(2).unwrap();
        vec.set_len(3);
    }

    #[test]
    fn shrinking_keeps_len_and_prefix() {
        let mut vec = GlobalByteVec::new(4).unwrap();
        vec.reserve(4).unwrap();
        unsafe {
            ptr::copy_nonoverlapping([7u8, 0, 0, 9, 1, 1, 1, 1].as_ptr(), vec.as_mut_ptr(), 8);
        }
        vec.set_len(1);
        assert_eq!(vec.reserve(1), Ok(1));
        assert_eq!(vec.len(), 1);
        let bytes = unsafe { slice::from_raw_parts(vec.as_ptr(), 4) };
        assert_eq!(bytes, &[7, 0, 0, 9]);
    }

    #[test]
    fn oversized_reservation_is_refused() {
        let mut vec = GlobalByteVec::new(16).unwrap();
        let max_capacity = vec.max_capacity();
        assert_eq!(vec.reserve(max_capacity + 1), Err(MaxCapacityExceeded { max_capacity }));
        assert!(!vec.is_allocated());
    }

    #[test]
    fn failed_allocation_leaves_state_untouched() {
        let alloc = FailingAlloc::new(0);
        let mut vec = ByteVec::new_in(4, &alloc).unwrap();
        assert_eq!(vec.reserve(3), Err(AllocFailed { new_capacity: 3 }));
        assert!(!vec.is_allocated());
        assert_eq!(vec.capacity(), 0);
    }

    #[test]
    fn failed_resize_keeps_old_block() {
        let alloc = FailingAlloc::new(1);
        let mut vec = ByteVec::new_in(1, &alloc).unwrap();
        vec.reserve(2).unwrap();
        unsafe { ptr::copy_nonoverlapping([5u8, 6].as_ptr(), vec.as_mut_ptr(), 2) };
        let before = vec.items();
        assert_eq!(vec.reserve(64), Err(AllocFailed { new_capacity: 64 }));
        assert_eq!(vec.items(), before);
        assert_eq!(vec.capacity(), 2);
        assert_eq!(unsafe { slice::from_raw_parts(vec.as_ptr(), 2) }, &[5, 6]);
    }

    #[test]
    fn drop_releases_once() {
        let alloc = CountingAlloc::default();
        {
            let mut vec = ByteVec::new_in(4, &alloc).unwrap();
            vec.reserve(2).unwrap();
            vec.reserve(1).unwrap();
        }
        assert_eq!(alloc.frees(), 1);
        assert_eq!(alloc.live_bytes(), 0);
        {
            let _vec = ByteVec::new_in(4, &alloc).unwrap();
        }
        assert_eq!(alloc.frees(), 1);
    }

    #[test]
    fn debug_describe_writes_fields() {
        let mut vec = GlobalByteVec::new(4).unwrap();
        vec.reserve(2).unwrap();
        let mut out = Vec::new();
        vec.debug_describe(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Vector {\n"));
        assert!(text.contains("\titem_size: 4\n"));
        assert!(text.contains("\tlength: 0\n"));
        assert!(text.ends_with("\tcapacity: 2\n}\n"));
    }

    proptest! {
        #[test]
        fn reservation_sequence_preserves_overlap(
            item_size in 1usize..=16,
            capacities in prop::collection::vec(1usize..=64, 1..16),
        ) {
            let mut vec = GlobalByteVec::new(item_size).unwrap();
            let mut expected: Vec<u8> = Vec::new();
            for (step, &capacity) in capacities.iter().enumerate() {
                prop_assert_eq!(vec.reserve(capacity), Ok(capacity));
                let bytes = capacity * item_size;
                let keep = expected.len().min(bytes);
                let kept = unsafe { slice::from_raw_parts(vec.as_ptr(), keep) };
                prop_assert_eq!(kept, &expected[..keep]);
                expected = (0..bytes)
                    .map(|i| (i as u8).wrapping_mul(31).wrapping_add(step as u8))
                    .collect();
                unsafe { ptr::copy_nonoverlapping(expected.as_ptr(), vec.as_mut_ptr(), bytes) };
            }
            prop_assert_eq!(vec.capacity(), *capacities.last().unwrap());
            prop_assert_eq!(vec.len(), 0);
        }
    }
}
