//! Automated play: equity estimation and the built-in betting policy.

pub mod equity;
pub mod policy;

pub use equity::EquityEstimator;
pub use policy::{AutoPolicy, hole_score};
