#[macro_use]

mod log;
mod error;
mod filter;
pub mod fmt;

pub use error::LogError;
pub use filter::Filter;
pub use fmt::{LogFmt, LogFmtBuilder, LogSpec};

pub type Result<T> = core::result::Result<T, LogError>;

pub use log::*;
