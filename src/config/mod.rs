//! Configuration for the address tooling.

pub mod address;

pub use address::{AppConfig, ResolvedConfig};
