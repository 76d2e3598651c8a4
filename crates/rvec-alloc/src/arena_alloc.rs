use std::alloc::{alloc, dealloc, Layout};

use core::{
    cell::Cell,
    ptr::{self, NonNull},
};

use rvec_mem::{Allocator, align_up};

/// Alignment of the arena block itself. Requests with a larger alignment
/// are still honored, they just waste more padding.
const BLOCK_ALIGN: usize = 16;

/// Fixed-size bump allocator.
///
/// Frees are no-ops and memory only comes back through [`reset`](Self::reset).
/// Resizing the most recent block grows or shrinks it in place, so a single
/// vector reserving over and over never copies.
pub struct ArenaAlloc {
    block: NonNull<u8>,
    layout: Layout,
    top: Cell<usize>,
}

impl ArenaAlloc {

    /// `None` if `size` is zero or the block cannot be allocated.
    pub fn new(size: usize) -> Option<Self> {
        if size == 0 {
            return None
        }
        let layout = Layout::from_size_align(size, BLOCK_ALIGN).ok()?;
        let block = NonNull::new(unsafe { alloc(layout) })?;
        Some(Self {
            block,
            layout,
            top: Cell::new(0),
        })
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.layout.size()
    }

    #[inline(always)]
    pub fn used(&self) -> usize {
        self.top.get()
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.size() - self.used()
    }

    /// Hands the whole block out again.
    ///
    /// Vectors borrow the arena for their lifetime, so none can be alive here.
    #[inline(always)]
    pub fn reset(&mut self) {
        self.top.set(0);
    }

    #[inline(always)]
    fn addr(&self) -> usize {
        self.block.as_ptr() as usize
    }

    /// Moves the top to `end` (an address) if it lies within the block.
    fn bump_to(&self, end: usize) -> bool {
        let offset = end - self.addr();
        if offset > self.size() {
            return false
        }
        self.top.set(offset);
        true
    }

    #[inline(always)]
    fn is_top(&self, ptr: NonNull<u8>, size: usize) -> bool {
        ptr.as_ptr() as usize + size == self.addr() + self.used()
    }
}

impl Allocator for ArenaAlloc {

    unsafe fn allocate_raw(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        let start = align_up(self.addr() + self.used(), align);
        let end = start.checked_add(size)?;
        if !self.bump_to(end) {
            return None
        }
        let offset = start - self.addr();
        Some(unsafe { self.block.add(offset) })
    }

    unsafe fn reallocate_raw(
        &self,
        ptr: NonNull<u8>,
        old_size: usize,
        new_size: usize,
        align: usize,
    ) -> Option<NonNull<u8>>
    {
        if self.is_top(ptr, old_size) {
            let end = (ptr.as_ptr() as usize).checked_add(new_size)?;
            return self.bump_to(end).then_some(ptr)
        }
        let new = unsafe { self.allocate_raw(new_size, align)? };
        unsafe { ptr::copy_nonoverlapping(ptr.as_ptr(), new.as_ptr(), old_size.min(new_size)) };
        Some(new)
    }

    #[inline(always)]
    unsafe fn free_raw(&self, _ptr: NonNull<u8>, _size: usize, _align: usize) {}
}

impl Drop for ArenaAlloc {

    fn drop(&mut self) {
        unsafe { dealloc(self.block.as_ptr(), self.layout) }
    }
}
