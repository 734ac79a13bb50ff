//! This module defines the core types used in the eqeq library for representing atoms and calculation results.
//!
//! It includes the `AtomView` trait for abstracting atom data access, the `Atom` struct for concrete atom
//! representation, and the `CalculationResult` struct for storing the outcome of a charge equilibration
//! calculation. These types form the foundation for the decoupled design that allows integration with
//! various molecular data structures.

use std::collections::BTreeMap;

/// A trait for viewing atom data without owning it.
///
/// This trait provides a common interface for accessing an atom's element symbol, label, and 3D
/// position, enabling the charge equilibration solver to work with different atom representations.
/// By decoupling the solver from specific data structures, users can integrate the `eqeq` library
/// with their own molecular representations without data conversion overhead.
pub trait AtomView {
    /// Returns the element symbol of the atom in canonical capitalization (e.g. `"Zn"`).
    ///
    /// The symbol identifies the chemical element and is used to look up the tabulated
    /// electron affinity and ionization energies.
    fn symbol(&self) -> &str;

    /// Returns the label that uniquely identifies this atom within its structure.
    ///
    /// Labels carry no chemical meaning; they connect each computed charge back to a
    /// named site in the input (e.g. `"Zn3"` from a crystallographic file).
    fn label(&self) -> &str;

    /// Returns the 3D position of the atom in Cartesian coordinates, in angstroms.
    ///
    /// The position is represented as an array of three `f64` values corresponding to x, y, and z
    /// coordinates. For periodic structures the position must already be expressed in Cartesian
    /// form; fractional coordinates are converted by the caller.
    fn position(&self) -> [f64; 3];
}

/// A concrete representation of an atom with label, element symbol, and position.
///
/// This struct provides a simple, owned implementation of the `AtomView` trait. It can be used
/// directly for basic atom representations or as a building block for more complex atom types
/// that include additional properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The unique label of the atom within its structure.
    pub label: String,
    /// The element symbol of the atom in canonical capitalization.
    pub symbol: String,
    /// The 3D position of the atom in Cartesian coordinates, in angstroms.
    pub position: [f64; 3],
}

impl Atom {
    /// Creates a new atom from a label, an element symbol, and a Cartesian position.
    pub fn new(label: impl Into<String>, symbol: impl Into<String>, position: [f64; 3]) -> Self {
        Self {
            label: label.into(),
            symbol: symbol.into(),
            position,
        }
    }
}

impl AtomView for Atom {
    #[inline(always)]
    fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline(always)]
    fn label(&self) -> &str {
        &self.label
    }

    #[inline(always)]
    fn position(&self) -> [f64; 3] {
        self.position
    }
}

/// The result of a charge equilibration calculation.
///
/// This struct encapsulates the output of a successful charge equilibration run: the computed
/// partial atomic charges, rounded to the configured precision with the total charge conserved
/// exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult {
    /// The computed partial atomic charges for each atom in the system.
    ///
    /// Charges are stored in the same order as the input atoms. The sum of all charges equals
    /// the total system charge specified in the calculation.
    pub charges: Vec<f64>,
}

impl CalculationResult {
    /// Returns the sum of all partial charges.
    pub fn total_charge(&self) -> f64 {
        self.charges.iter().sum()
    }

    /// Maps each charge back to its atom label, sorted by label.
    ///
    /// The `atoms` slice must be the one the calculation was performed on; charges are
    /// paired with labels by position.
    pub fn charges_by_label<A: AtomView>(&self, atoms: &[A]) -> BTreeMap<String, f64> {
        atoms
            .iter()
            .map(AtomView::label)
            .zip(self.charges.iter().copied())
            .map(|(label, charge)| (label.to_string(), charge))
            .collect()
    }
}
