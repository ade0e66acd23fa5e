//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod analytics;
pub mod budget;
pub mod categorize;
pub mod expenses;
pub mod export;
pub mod health;
pub mod predict;
pub mod salary;

// Re-export all handlers for use in router
pub use analytics::*;
pub use budget::*;
pub use categorize::*;
pub use expenses::*;
pub use export::*;
pub use health::*;
pub use predict::*;
pub use salary::*;
