use core::ptr::{self, NonNull};

/// Source of raw memory for the vectors in this crate.
///
/// Every method returns `None` when the request cannot be satisfied. Callers
/// never pass a zero `size`.
pub trait Allocator {

    unsafe fn allocate_raw(&self, size: usize, align: usize) -> Option<NonNull<u8>>;

    /// Resizes the block at `ptr` to `new_size` bytes, keeping the first
    /// `min(old_size, new_size)` bytes.
    ///
    /// On failure the old block is left untouched and still owned by the caller.
    unsafe fn reallocate_raw(
        &self,
        ptr: NonNull<u8>,
        old_size: usize,
        new_size: usize,
        align: usize,
    ) -> Option<NonNull<u8>>
    {
        let new = unsafe { self.allocate_raw(new_size, align)? };
        unsafe {
            ptr::copy_nonoverlapping(ptr.as_ptr(), new.as_ptr(), old_size.min(new_size));
            self.free_raw(ptr, old_size, align);
        }
        Some(new)
    }

    unsafe fn free_raw(&self, ptr: NonNull<u8>, size: usize, align: usize);
}
