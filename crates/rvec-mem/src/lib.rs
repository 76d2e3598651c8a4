//! Raw-memory vectors whose capacity is changed only on request.
//!
//! [`ByteVec`] is the untyped buffer: a fixed element size, a caller-kept
//! length and a capacity that [`reserve`](ByteVec::reserve) sets exactly.
//! [`RawVec`] puts an element type on top of it. Both draw memory from an
//! [`Allocator`] and release it when dropped.

#[macro_use]
mod macros;

pub mod vec_types;
pub mod const_fn;

mod errors;
mod allocator;
mod global_alloc;

#[cfg(test)]
mod test_alloc;

pub use errors::CapacityError;
pub use allocator::Allocator;
pub use global_alloc::{GlobalAlloc, GLOBAL_ALLOC};
pub use vec_types::{ByteVec, GlobalByteVec, RawVec, GlobalRawVec, Describe};
pub use const_fn::align_up;
