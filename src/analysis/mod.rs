//! Relationship analysis over profiled datasets: pairwise correlations and
//! outlier detection. Both operate read-only on rows plus an inferred schema.

mod correlation;
mod outliers;

pub use correlation::correlations;
pub use outliers::{OutlierBounds, OutlierDetector};
