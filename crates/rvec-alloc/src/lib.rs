//! Bounded allocators for rvec vectors.

mod arena_alloc;

pub use arena_alloc::ArenaAlloc;
