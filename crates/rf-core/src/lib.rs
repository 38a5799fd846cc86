//! rf-core: stable foundation for reagentflow.
//!
//! Contains:
//! - units (uom quantities + constructors for lab-scale amounts)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{RfError, RfResult};
pub use numeric::*;
pub use units::*;
