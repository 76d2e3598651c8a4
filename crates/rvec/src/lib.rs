pub mod config;
pub mod demo;
pub mod dump;

pub use config::{RunConfig, Command, USAGE};
pub use demo::DemoError;
pub use dump::DumpError;
