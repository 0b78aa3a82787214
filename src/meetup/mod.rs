mod error;
mod fairness;
mod midpoint;

pub use error::InvalidInput;
pub use fairness::{Fairness, FairnessThresholds, FairnessTier, compute_fairness, compute_fairness_with};
pub use midpoint::compute_midpoint;
