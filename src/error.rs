use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all fallible operations in the `eqeq` library.
///
/// This enum is designed to be comprehensive, providing clear and actionable
/// information for each potential failure mode, from malformed reference data to
/// a rank-deficient equilibration system. It implements `std::error::Error`,
/// allowing it to be composed with other error types in application code.
#[derive(Error, Debug)]
pub enum EqeqError {
    /// Indicates that the reference data table has no entry for an element
    /// symbol present in the input structure.
    ///
    /// This is a common error when attempting to calculate charges for a
    /// structure containing an element not defined in the parameter file.
    #[error("Element parameters not found for symbol: '{0}'")]
    ParameterNotFound(String),

    /// Occurs when an element's ionization-energy ladder is too short for its
    /// charge center.
    ///
    /// Deriving electronegativity and hardness for a charge center `c` requires
    /// the tabulated energies at indices `c` and `c + 1`. If either is missing,
    /// the assignment fails instead of silently producing non-finite values.
    #[error("Element '{symbol}' has no tabulated energy at index {index} (charge center is {center})")]
    MissingEnergyLevel {
        /// The element symbol whose energy ladder is incomplete.
        symbol: String,
        /// The energy index that was requested but not tabulated.
        index: usize,
        /// The charge center the element is parameterized for.
        center: usize,
    },

    /// Indicates that the six lattice parameters do not describe a valid
    /// three-dimensional unit cell.
    #[error("Degenerate unit cell: {0}")]
    DegenerateCell(String),

    /// Occurs when a periodic summation method is requested for a structure
    /// that has no unit cell.
    #[error("The '{method}' summation method requires a unit cell, but none was provided")]
    MissingCell {
        /// The name of the requested summation method.
        method: &'static str,
    },

    /// Indicates that the assembled equilibration system is rank-deficient.
    ///
    /// Householder elimination reports this when a column has zero or non-finite
    /// norm, or when a reflection coefficient vanishes. Non-finite norms arise
    /// from non-finite interaction values, for example two atoms placed at
    /// coincident positions.
    #[error("Charge equilibration system is rank-deficient at elimination column {column}")]
    SingularSystem {
        /// The zero-based elimination column where rank deficiency was detected.
        column: usize,
    },

    /// An I/O error that occurred while attempting to read a parameter file.
    ///
    /// The path to the file and the underlying I/O error are provided for context.
    #[error("I/O error at path '{path}': {source}")]
    IoError {
        /// The path of the file that caused the I/O error.
        path: PathBuf,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    /// An error that occurred while parsing a parameter file, typically indicating
    /// invalid TOML or a structural mismatch with the expected `Parameters` format.
    #[error("Failed to deserialize TOML parameters: {0}")]
    DeserializationError(#[from] toml::de::Error),

    /// A validation error indicating that the input slice of atoms was empty.
    /// At least one atom is required to perform a calculation.
    #[error("Input validation failed: at least one atom is required for a calculation")]
    NoAtoms,

    /// A validation error indicating that two atoms in the input share a label.
    /// Labels identify atoms in the output and must be unique per structure.
    #[error("Input validation failed: duplicate atom label '{0}'")]
    DuplicateLabel(String),
}
