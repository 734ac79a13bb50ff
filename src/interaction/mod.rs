//! This module provides the pairwise electrostatic interaction kernels.
//!
//! Every equilibration run selects one kernel up front: `NonPeriodicKernel` for isolated
//! molecules, `DirectKernel` for explicitly summed periodic systems, and `EwaldKernel` for
//! Ewald-split periodic electrostatics. Each kernel computes the effective hardness between
//! two charge sites in electron volts from positions in angstroms; the diagonal (self) value
//! combines the atom's own hardness with its interaction with its periodic images.

/// Explicit lattice summation of the screened Coulomb interaction.
pub mod direct;

/// Ewald-split lattice summation with real- and reciprocal-space series.
pub mod ewald;

/// Direct pairwise interactions for structures without a unit cell.
pub mod nonperiodic;

pub use direct::DirectKernel;
pub use ewald::EwaldKernel;
pub use nonperiodic::NonPeriodicKernel;

/// The interaction kernel selected for one equilibration run.
///
/// Dispatching through this enum keeps the matrix-filling loop free of per-method
/// branching beyond a single match per entry.
#[derive(Debug, Clone, Copy)]
pub enum InteractionKernel {
    /// Interactions at direct separations only.
    NonPeriodic(NonPeriodicKernel),
    /// Explicitly summed periodic interactions.
    Direct(DirectKernel),
    /// Ewald-split periodic interactions.
    Ewald(EwaldKernel),
}

impl InteractionKernel {
    /// Computes the effective hardness between two distinct sites, in eV.
    ///
    /// `separation` is the Cartesian difference of the two site positions within the
    /// cell; periodic kernels add their image translations internally.
    pub fn pair(&self, separation: [f64; 3], hardness_i: f64, hardness_j: f64) -> f64 {
        match self {
            InteractionKernel::NonPeriodic(kernel) => {
                kernel.pair(separation, hardness_i, hardness_j)
            }
            InteractionKernel::Direct(kernel) => kernel.pair(separation, hardness_i, hardness_j),
            InteractionKernel::Ewald(kernel) => kernel.pair(separation, hardness_i, hardness_j),
        }
    }

    /// Computes the effective hardness of a site with itself, in eV.
    pub fn self_interaction(&self, hardness: f64) -> f64 {
        match self {
            InteractionKernel::NonPeriodic(kernel) => kernel.self_interaction(hardness),
            InteractionKernel::Direct(kernel) => kernel.self_interaction(hardness),
            InteractionKernel::Ewald(kernel) => kernel.self_interaction(hardness),
        }
    }
}

/// Orbital-overlap correction to the bare Coulomb interaction.
///
/// `width` is the combined hardness scale `sqrt(J_i * J_j) / k` in inverse angstroms and
/// `distance` the site separation in angstroms. The Gaussian factor suppresses the
/// correction beyond a few bond lengths, leaving pure 1/R behavior at long range.
pub(crate) fn orbital_overlap(width: f64, distance: f64) -> f64 {
    (-(width * width) * distance * distance).exp()
        * (2.0 * width - width * width * distance - 1.0 / distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbital_overlap_decays_with_distance() {
        let width = 0.6;
        assert!(orbital_overlap(width, 10.0).abs() < 1e-10);
        assert!(orbital_overlap(width, 20.0).abs() < 1e-30);
    }

    #[test]
    fn test_orbital_overlap_finite_at_bonding_distance() {
        let value = orbital_overlap(0.57, 1.5);
        assert!(value.is_finite());
        assert!(value.abs() < 2.0);
    }
}
