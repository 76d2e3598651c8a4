use std::alloc::{Layout, alloc, dealloc, realloc};

use core::ptr::NonNull;

use crate::Allocator;

/// Forwards to the process-global allocator.
pub struct GlobalAlloc;

pub static GLOBAL_ALLOC: GlobalAlloc = GlobalAlloc;

impl Allocator for GlobalAlloc {

    unsafe fn allocate_raw(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        let layout = Layout::from_size_align(size, align).ok()?;
        if layout.size() == 0 {
            return None
        }
        NonNull::new(unsafe { alloc(layout) })
    }

    unsafe fn reallocate_raw(
        &self,
        ptr: NonNull<u8>,
        old_size: usize,
        new_size: usize,
        align: usize,
    ) -> Option<NonNull<u8>>
    {
        let layout = Layout::from_size_align(old_size, align).ok()?;
        let new_layout = Layout::from_size_align(new_size, align).ok()?;
        if new_layout.size() == 0 {
            return None
        }
        NonNull::new(unsafe { realloc(ptr.as_ptr(), layout, new_layout.size()) })
    }

    unsafe fn free_raw(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        let layout = match Layout::from_size_align(size, align) {
            Ok(l) => l,
            Err(_) => return,
        };
        unsafe { dealloc(ptr.as_ptr(), layout) }
    }
}
