use core::{
    cell::Cell,
    ptr::NonNull,
};

use crate::{Allocator, GLOBAL_ALLOC};

/// Records every request before forwarding it to the global allocator.
#[derive(Default)]
pub struct CountingAlloc {
    allocations: Cell<usize>,
    reallocations: Cell<usize>,
    frees: Cell<usize>,
    last_size: Cell<usize>,
    live_bytes: Cell<usize>,
}

impl CountingAlloc {

    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }

    pub fn reallocations(&self) -> usize {
        self.reallocations.get()
    }

    pub fn frees(&self) -> usize {
        self.frees.get()
    }

    pub fn last_size(&self) -> usize {
        self.last_size.get()
    }

    pub fn live_bytes(&self) -> usize {
        self.live_bytes.get()
    }
}

impl Allocator for CountingAlloc {

    unsafe fn allocate_raw(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        self.allocations.set(self.allocations.get() + 1);
        self.last_size.set(size);
        let ptr = unsafe { GLOBAL_ALLOC.allocate_raw(size, align)? };
        self.live_bytes.set(self.live_bytes.get() + size);
        Some(ptr)
    }

    unsafe fn reallocate_raw(
        &self,
        ptr: NonNull<u8>,
        old_size: usize,
        new_size: usize,
        align: usize,
    ) -> Option<NonNull<u8>>
    {
        self.reallocations.set(self.reallocations.get() + 1);
        self.last_size.set(new_size);
        let ptr = unsafe { GLOBAL_ALLOC.reallocate_raw(ptr, old_size, new_size, align)? };
        self.live_bytes.set(self.live_bytes.get() - old_size + new_size);
        Some(ptr)
    }

    unsafe fn free_raw(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        self.frees.set(self.frees.get() + 1);
        self.live_bytes.set(self.live_bytes.get() - size);
        unsafe { GLOBAL_ALLOC.free_raw(ptr, size, align) }
    }
}

/// Grants `budget` allocation or resize requests, then refuses the rest.
pub struct FailingAlloc {
    budget: Cell<usize>,
}

impl FailingAlloc {

    pub fn new(budget: usize) -> Self {
        Self { budget: Cell::new(budget) }
    }

    fn take(&self) -> bool {
        let budget = self.budget.get();
        if budget == 0 {
            return false
        }
        self.budget.set(budget - 1);
        true
    }
}

impl Allocator for FailingAlloc {

    unsafe fn allocate_raw(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        if !self.take() {
            return None
        }
        unsafe { GLOBAL_ALLOC.allocate_raw(size, align) }
    }

    unsafe fn reallocate_raw(
        &self,
        ptr: NonNull<u8>,
        old_size: usize,
        new_size: usize,
        align: usize,
    ) -> Option<NonNull<u8>>
    {
        if !self.take() {
            return None
        }
        unsafe { GLOBAL_ALLOC.reallocate_raw(ptr, old_size, new_size, align) }
    }

    unsafe fn free_raw(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        unsafe { GLOBAL_ALLOC.free_raw(ptr, size, align) }
    }
}
