mod describe;
mod byte_vec;
mod raw_vec;

pub use describe::Describe;
pub use byte_vec::{ByteVec, GlobalByteVec};
pub use raw_vec::{RawVec, GlobalRawVec};

pub type Result<T> = core::result::Result<T, crate::CapacityError>;
