//! Search engine module
//!
//! Defines engine parameters and provides a registry that maps engine names
//! to the URL-building data needed to hand a query to the browser.

mod engines;
mod registry;

pub use registry::{default_registry, EngineParam, EngineRegistry, DEFAULT_ENGINE};
