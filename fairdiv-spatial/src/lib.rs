//! Spatial indices for the fair max-min diversification solver: a weighted
//! ball-sum index (§4.A) and a ball-count index (§4.B), both built on top of
//! a small array-backed k-d tree.

mod ballcount;
mod error;
mod kdtree;
mod weighted;

pub use ballcount::BallCountIndex;
pub use error::SpatialError;
pub use weighted::WeightedIndex;
