//! Featrank: Feature Ranking Library
//!
//! Ranks the features of a tabular classification dataset by random-forest
//! impurity importance, Spearman's rho and Kendall's tau-b, on the full feature
//! set and on each method's own shortlist, then cross-validates a forest on
//! every resulting subset.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
