//! pf-components: physical models for spring-piston launchers.
//!
//! Provides:
//! - `DartPlunger`: dart and plunger coupled through an adiabatic air chamber
//! - `LaunchState` / `DerivedQuantities`: state vector and per-state outputs
//! - `LaunchDynamics`: the trait integrators and result builders depend on
//!
//! Models are deterministic functions of state and parameters, safe to
//! evaluate concurrently.
//!
//! # Example
//!
//! ```
//! use pf_components::{DartPlunger, DartPlungerSpec, LaunchDynamics, LaunchState};
//! use pf_core::units::{kg, m, pa};
//!
//! let launcher = DartPlunger::new(
//!     "springer",
//!     DartPlungerSpec {
//!         initial_pressure: pa(101_325.0),
//!         ambient_pressure: pa(101_325.0),
//!         barrel_diameter: m(0.0127),
//!         plunger_diameter: m(0.035052),
//!         gamma: 1.4,
//!         dart_mass: kg(0.0012),
//!         plunger_mass: kg(0.06),
//!         spring_precompression: m(0.0254),
//!         chamber_length: m(0.1016),
//!         spring_rate: 1150.6,
//!     },
//! )
//! .unwrap();
//!
//! let rest = LaunchState::at_rest();
//! assert_eq!(launcher.derive(&rest).pressure, 101_325.0);
//! assert!(launcher.derivative(&rest).plunger_velocity > 0.0);
//! ```

pub mod common;
pub mod dart_plunger;
pub mod error;
pub mod state;
pub mod traits;

// Re-exports
pub use common::VOLUME_RATIO_FLOOR;
pub use dart_plunger::{DartPlunger, DartPlungerSpec};
pub use error::{ComponentError, ComponentResult};
pub use state::{DerivedQuantities, LaunchState};
pub use traits::LaunchDynamics;
