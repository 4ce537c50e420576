//! Core of the fair max-min diversification solver: the MWU fractional
//! solver, the gamma-falloff driver that calls it, diversity measurement,
//! color interning, quota construction, and the coreset/rounding contracts.

mod color;
mod coreset;
mod diversity;
mod driver;
mod error;
mod geom;
mod mwu;
mod quota;
mod rounding;

pub use color::{color_index_lists, intern_all, ColorId, ColorTable};
pub use coreset::{Coreset, IdentityCoreset};
pub use diversity::maxmin;
pub use driver::{run, DriverConfig, DriverResult};
pub use error::CoreError;
pub use mwu::{EarlyStopCadence, MwuSolver, SolveStatus};
pub use quota::QuotaMap;
pub use rounding::{Rounder, WeightedSampleRounder};
