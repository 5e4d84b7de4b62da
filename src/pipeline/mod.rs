//! Pipeline module - loading, encoding, ranking and validation steps

pub mod analysis;
pub mod correlation;
pub mod encoder;
pub mod error;
pub mod forest;
pub mod loader;
pub mod ranking;
pub mod validation;

pub use analysis::*;
pub use correlation::*;
pub use encoder::*;
pub use error::{RankError, Result};
pub use forest::*;
pub use loader::*;
pub use ranking::*;
pub use validation::*;
