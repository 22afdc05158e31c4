//! circuit-calc - Circuit formula library
//!
//! Pure, stateless formulas for simple resistor networks and Ohm's law.
//!
//! # Example
//!
//! ```rust
//! use circuit_calc::{
//!     combined_calculation, equivalent_resistance, ohms_law, power, CalculationRequest,
//!     OhmsLawInput, OhmsQuantity, Topology,
//! };
//!
//! assert_eq!(equivalent_resistance(&[2.0, 2.0], Topology::Series).unwrap(), 4.0);
//! assert_eq!(equivalent_resistance(&[2.0, 2.0], Topology::Parallel).unwrap(), 1.0);
//!
//! let solved = ohms_law(OhmsLawInput::new(None, Some(10.0), Some(2.0))).unwrap();
//! assert_eq!(solved.quantity, OhmsQuantity::Voltage);
//! assert_eq!(solved.value, 20.0);
//!
//! assert_eq!(power(5.0, 3.0), 15.0);
//!
//! let request = CalculationRequest {
//!     voltage: Some(10.0),
//!     resistance: Some(5.0),
//!     ..Default::default()
//! };
//! assert!(!combined_calculation(&request).unwrap().is_empty());
//! ```
//!
//! # Operations
//!
//! | Function | Failure modes |
//! |----------|---------------|
//! | `equivalent_resistance` | empty list, zero parallel element, non-finite result |
//! | `ohms_law` | not exactly two inputs, zero divisor, non-finite result |
//! | `power` | none (`checked_power` rejects a non-finite product) |
//! | `combined_calculation` | zero parallel element, non-finite result |

pub mod arithmetic;
pub mod combined;
pub mod error;
pub mod ohms_law;
pub mod resistance;
pub mod topology;

// Re-exports for convenience
pub use combined::{combined_calculation, CalculationRequest, CalculationResult, ResultKey};
pub use error::{CalcError, Result};
pub use ohms_law::{checked_power, ohms_law, power, OhmsLawInput, OhmsLawResult, OhmsQuantity};
pub use resistance::{equivalent_resistance, equivalent_resistance_for};
pub use topology::{LenientTopology, StrictTopology, Topology, TopologyPolicy};
