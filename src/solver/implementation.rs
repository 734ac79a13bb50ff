//! This module implements the core `EqeqSolver` for performing extended charge
//! equilibration calculations.
//!
//! A solve proceeds in four stages: per-atom electronegativity and hardness are derived
//! from the element reference data, the pairwise interaction matrix is filled in parallel
//! by the selected summation kernel, the equilibration system is assembled from
//! electronegativity and interaction differences, and the resulting linear system is
//! solved and rounded. The solver integrates with the broader `eqeq` architecture by
//! using the `AtomView` trait for atom data and `Parameters` for element reference
//! values, enabling decoupled and flexible structure representations.

use super::householder;
use super::options::{SolverOptions, SummationMethod};
use super::rounding;
use crate::{
    error::EqeqError,
    geometry::Cell,
    interaction::{DirectKernel, EwaldKernel, InteractionKernel, NonPeriodicKernel},
    params::Parameters,
    types::{AtomView, CalculationResult},
};
use faer::{Col, Mat};
use rayon::prelude::*;
use std::collections::HashSet;

/// A thread-safe wrapper for raw matrix access to enable parallel filling.
///
/// This struct allows multiple threads to write to disjoint parts of a matrix
/// without locking, which is safe because we ensure unique indices in the parallel iterator.
struct UnsafeMatView {
    ptr: *mut f64,
    row_stride: isize,
    col_stride: isize,
}

unsafe impl Send for UnsafeMatView {}
unsafe impl Sync for UnsafeMatView {}

impl UnsafeMatView {
    /// Writes a value to the matrix at the specified (row, col) index.
    ///
    /// # Safety
    ///
    /// The caller must ensure that:
    /// 1. The (row, col) indices are within bounds.
    /// 2. No other thread is writing to the same address simultaneously.
    unsafe fn write(&self, row: usize, col: usize, val: f64) {
        let offset = (row as isize) * self.row_stride + (col as isize) * self.col_stride;
        unsafe {
            *self.ptr.offset(offset) = val;
        }
    }
}

/// The main solver for extended charge equilibration calculations.
///
/// This struct holds references to element reference data and solver options, providing
/// methods to compute partial atomic charges for molecular and periodic systems in a
/// single linear solve, with no iterative refinement.
pub struct EqeqSolver<'p> {
    /// Reference to the element data used in calculations.
    parameters: &'p Parameters,
    /// Configuration options for the solver, such as the summation method and image bounds.
    options: SolverOptions,
}

impl<'p> EqeqSolver<'p> {
    /// Creates a new `EqeqSolver` with default options.
    ///
    /// # Arguments
    ///
    /// * `parameters` - A reference to the `Parameters` containing element data.
    ///
    /// # Returns
    ///
    /// A new `EqeqSolver` instance with default `SolverOptions`.
    ///
    /// # Examples
    ///
    /// ```
    /// use eqeq::get_default_parameters;
    /// use eqeq::EqeqSolver;
    ///
    /// let params = get_default_parameters();
    /// let solver = EqeqSolver::new(params);
    /// ```
    pub fn new(parameters: &'p Parameters) -> Self {
        Self {
            parameters,
            options: SolverOptions::default(),
        }
    }

    /// Configures the solver with custom options.
    ///
    /// This method allows setting non-default solver parameters such as the summation
    /// method and the image bounds. It consumes the solver and returns a new instance
    /// with the updated options.
    ///
    /// # Arguments
    ///
    /// * `options` - The `SolverOptions` to apply to the solver.
    ///
    /// # Returns
    ///
    /// A new `EqeqSolver` instance with the specified options.
    ///
    /// # Examples
    ///
    /// ```
    /// use eqeq::get_default_parameters;
    /// use eqeq::{EqeqSolver, SolverOptions, SummationMethod};
    ///
    /// let params = get_default_parameters();
    /// let options = SolverOptions {
    ///     method: SummationMethod::NonPeriodic,
    ///     charge_precision: 4,
    ///     ..Default::default()
    /// };
    ///
    /// let solver = EqeqSolver::new(params).with_options(options);
    /// ```
    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Computes equilibrated partial charges for a structure.
    ///
    /// The charges minimize the total electrostatic energy subject to the fixed total
    /// charge: one constraint row fixes the sum, and the remaining rows equate the
    /// marginal electronegativities of consecutive atoms. The system is assembled and
    /// solved once; the charges are then rounded to the configured precision with the
    /// total restored exactly.
    ///
    /// # Arguments
    ///
    /// * `atoms` - A slice of atom data implementing the `AtomView` trait.
    /// * `cell` - The unit cell for periodic structures; required by the periodic
    ///   summation methods and ignored by the non-periodic one.
    /// * `total_charge` - The desired total charge of the system.
    ///
    /// # Returns
    ///
    /// A `Result` containing a `CalculationResult` with the computed charges on
    /// success, or an `EqeqError` on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use eqeq::get_default_parameters;
    /// use eqeq::{Atom, EqeqSolver, SolverOptions, SummationMethod};
    ///
    /// // 1. Setup parameters and a non-periodic solver
    /// let params = get_default_parameters();
    /// let options = SolverOptions {
    ///     method: SummationMethod::NonPeriodic,
    ///     ..Default::default()
    /// };
    /// let solver = EqeqSolver::new(params).with_options(options);
    ///
    /// // 2. Define a molecule (e.g., NaCl)
    /// let atoms = vec![
    ///     Atom::new("Na1", "Na", [0.0, 0.0, 0.0]),
    ///     Atom::new("Cl1", "Cl", [2.36, 0.0, 0.0]),
    /// ];
    ///
    /// // 3. Run calculation
    /// let result = solver.solve(&atoms, None, 0.0).unwrap();
    ///
    /// assert_eq!(result.charges.len(), 2);
    /// assert!(result.total_charge().abs() < 1e-9);
    /// ```
    pub fn solve<A: AtomView>(
        &self,
        atoms: &[A],
        cell: Option<&Cell>,
        total_charge: f64,
    ) -> Result<CalculationResult, EqeqError> {
        if atoms.is_empty() {
            return Err(EqeqError::NoAtoms);
        }
        validate_unique_labels(atoms)?;

        let sites = self.prepare_sites(atoms)?;
        let kernel = self.build_kernel(cell)?;

        let (matrix, rhs) = assemble_system(&sites, &kernel, total_charge);
        let solution = householder::solve(matrix, rhs)?;

        let mut charges: Vec<f64> = solution.as_ref().iter().cloned().collect();
        rounding::round_charges(&mut charges, total_charge, self.options.charge_precision);

        Ok(CalculationResult { charges })
    }

    /// Derives the charge site for every atom from the reference data.
    ///
    /// Hydrogen bypasses its tabulated ladder and uses the affinity and ionization
    /// overrides from the options.
    fn prepare_sites<A: AtomView>(&self, atoms: &[A]) -> Result<Vec<ChargeSite>, EqeqError> {
        atoms
            .iter()
            .map(|atom| {
                let symbol = atom.symbol();
                let (electronegativity, hardness) = if symbol == "H" {
                    let affinity = self.options.hydrogen_affinity;
                    let ionization = self.options.hydrogen_ionization;
                    (0.5 * (ionization + affinity), ionization - affinity)
                } else {
                    self.parameters
                        .elements
                        .get(symbol)
                        .ok_or_else(|| EqeqError::ParameterNotFound(symbol.to_string()))?
                        .electronegativity_and_hardness(symbol)?
                };

                Ok(ChargeSite {
                    position: atom.position(),
                    electronegativity,
                    hardness,
                })
            })
            .collect()
    }

    /// Builds the interaction kernel requested by the options.
    fn build_kernel(&self, cell: Option<&Cell>) -> Result<InteractionKernel, EqeqError> {
        let options = &self.options;
        match options.method {
            SummationMethod::NonPeriodic => Ok(InteractionKernel::NonPeriodic(
                NonPeriodicKernel::new(options.lambda, options.coulomb_constant),
            )),
            SummationMethod::Direct => {
                let cell = cell.ok_or(EqeqError::MissingCell { method: "Direct" })?;
                Ok(InteractionKernel::Direct(DirectKernel::new(
                    options.lambda,
                    options.coulomb_constant,
                    *cell,
                    options.real_space_images,
                )))
            }
            SummationMethod::Ewald => {
                let cell = cell.ok_or(EqeqError::MissingCell { method: "Ewald" })?;
                Ok(InteractionKernel::Ewald(EwaldKernel::new(
                    options.lambda,
                    options.coulomb_constant,
                    options.eta,
                    *cell,
                    options.real_space_images,
                    options.reciprocal_space_images,
                )))
            }
        }
    }
}

/// Rejects inputs where two atoms carry the same label.
fn validate_unique_labels<A: AtomView>(atoms: &[A]) -> Result<(), EqeqError> {
    let mut seen = HashSet::with_capacity(atoms.len());
    for atom in atoms {
        if !seen.insert(atom.label()) {
            return Err(EqeqError::DuplicateLabel(atom.label().to_string()));
        }
    }
    Ok(())
}

/// Fills the symmetric interaction matrix and assembles the equilibration system.
///
/// Row 0 of the system fixes the total charge; row i (i ≥ 1) equates the marginal
/// electronegativities of atoms i - 1 and i by differencing their interaction rows, so
/// the image-independent constant shared by all entries of a conditionally convergent
/// lattice sum cancels. The interaction matrix is filled once per unordered pair and
/// mirrored.
fn assemble_system(
    sites: &[ChargeSite],
    kernel: &InteractionKernel,
    total_charge: f64,
) -> (Mat<f64>, Col<f64>) {
    let n_atoms = sites.len();

    let mut interactions = Mat::zeros(n_atoms, n_atoms);
    let mat_view = UnsafeMatView {
        ptr: interactions.as_ptr_mut(),
        row_stride: interactions.row_stride(),
        col_stride: interactions.col_stride(),
    };

    (0..n_atoms).into_par_iter().for_each(|i| {
        let site_i = &sites[i];

        // SAFETY: The diagonal entry (i, i) and each mirrored pair (i, j)/(j, i) with
        // i < j are written only by the thread handling row i, so no two threads write
        // the same entries.
        unsafe {
            mat_view.write(i, i, kernel.self_interaction(site_i.hardness));
        }

        for j in (i + 1)..n_atoms {
            let site_j = &sites[j];
            let separation = [
                site_i.position[0] - site_j.position[0],
                site_i.position[1] - site_j.position[1],
                site_i.position[2] - site_j.position[2],
            ];
            let value = kernel.pair(separation, site_i.hardness, site_j.hardness);

            unsafe {
                mat_view.write(i, j, value);
                mat_view.write(j, i, value);
            }
        }
    });

    let mut matrix = Mat::zeros(n_atoms, n_atoms);
    let mut rhs = Col::zeros(n_atoms);

    for j in 0..n_atoms {
        matrix[(0, j)] = 1.0;
    }
    rhs[0] = total_charge;

    for i in 1..n_atoms {
        rhs[i] = sites[i].electronegativity - sites[i - 1].electronegativity;
        for j in 0..n_atoms {
            matrix[(i, j)] = interactions[(i - 1, j)] - interactions[(i, j)];
        }
    }

    (matrix, rhs)
}

/// A charge site: the Cartesian position of an atom plus its derived energy parameters.
struct ChargeSite {
    position: [f64; 3],
    electronegativity: f64,
    hardness: f64,
}
