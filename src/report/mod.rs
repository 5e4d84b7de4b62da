//! Report module - console output and file exports

pub mod importance_export;
pub mod json_export;
pub mod summary;

pub use importance_export::*;
pub use json_export::*;
pub use summary::*;
