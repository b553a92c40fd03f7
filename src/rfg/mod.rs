pub mod engine;
pub mod rng;

pub use engine::{rf_group, RfgOptions, DEFAULT_MAX_SUBSETS};
