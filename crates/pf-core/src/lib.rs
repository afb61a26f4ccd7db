//! pf-core: shared foundation for plungerflow.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{PfError, PfResult};
pub use numeric::*;
pub use units::*;
