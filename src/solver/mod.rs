//! This module contains the solver components for performing charge equilibration calculations.
//!
//! It includes the `EqeqSolver` implementation and `SolverOptions` for configuring the solver,
//! providing the core functionality for the EQeq method in the `eqeq` library.

mod householder;
mod implementation;
mod options;
mod rounding;

pub use implementation::EqeqSolver;
pub use options::{SolverOptions, SummationMethod};
