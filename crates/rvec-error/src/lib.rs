//! Provides [`AnyError`] for errors carrying context and a call site.

#[macro_use]
pub mod location;
mod any;
mod context;

pub use location::{Location, Tracked};
pub use any::{AnyError, chain};
pub use context::Context;

pub type Result<T> = core::result::Result<T, AnyError>;
