//! Deterministic Simulation Testing (DST) infrastructure.
//!
//! This module provides tools for testing the index with:
//! - Reproducible random operation generation
//! - A reference model mirroring every operation
//! - Invariant checking after each operation
//!
//! # Design Principles
//!
//! 1. All randomness is seeded for reproducibility
//! 2. Given the same seed, execution is identical
//! 3. Every operation's result is compared against the model, not only the
//!    final state
//!
//! # Usage
//!
//! ```
//! use catalog::simulation::{Simulator, SimulatorConfig};
//!
//! let mut sim = Simulator::new(SimulatorConfig::new(12345));
//! let result = sim.run(200);
//!
//! assert!(result.invariant_violations.is_empty());
//! ```

mod invariants;
mod op_gen;
mod simulator;

pub use invariants::{InvariantChecker, InvariantViolation, ReferenceModel};
pub use op_gen::{OpGenConfig, Operation, OperationGenerator};
pub use simulator::{SimulationResult, Simulator, SimulatorConfig};
