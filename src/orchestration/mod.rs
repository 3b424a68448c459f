//! Request orchestration: catalog snapshot in, filtered and ordered results out.

pub mod discovery;

pub use discovery::{DiscoveryEngine, DiscoveryError};
