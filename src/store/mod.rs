//! Per-class storage of decorator records.
pub mod registry;
pub mod types;

pub use registry::{DecoratorRegistry, SharedRegistry};
pub use types::{DecoratorRecord, MethodKey, MethodLevel};
