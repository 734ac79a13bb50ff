pub mod error;
pub mod geometry;
pub mod interaction;
pub mod params;
pub mod solver;
pub mod types;

pub use crate::error::EqeqError;
pub use crate::geometry::{Cell, ImageRange};
pub use crate::params::{ElementData, Parameters};
pub use crate::solver::{EqeqSolver, SolverOptions, SummationMethod};
pub use crate::types::{Atom, AtomView, CalculationResult};

use std::sync::OnceLock;

static DEFAULT_PARAMETERS: OnceLock<Parameters> = OnceLock::new();

pub fn get_default_parameters() -> &'static Parameters {
    DEFAULT_PARAMETERS.get_or_init(|| {
        const DEFAULT_PARAMS_TOML: &str = include_str!("../resources/eqeq.data.toml");
        Parameters::load_from_str(DEFAULT_PARAMS_TOML)
            .expect("Failed to parse embedded default parameters. This is a library bug.")
    })
}
