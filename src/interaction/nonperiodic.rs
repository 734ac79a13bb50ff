//! Direct pairwise interactions for isolated structures.

use super::orbital_overlap;
use crate::geometry::norm;

/// Interaction kernel for structures without a unit cell.
///
/// Each pair of sites interacts once, through the screened Coulomb term at their direct
/// separation; the self term is the bare atomic hardness.
#[derive(Debug, Clone, Copy)]
pub struct NonPeriodicKernel {
    lambda: f64,
    coulomb_constant: f64,
}

impl NonPeriodicKernel {
    /// Creates a kernel with the given dielectric screening scale and Coulomb constant.
    pub fn new(lambda: f64, coulomb_constant: f64) -> Self {
        NonPeriodicKernel {
            lambda,
            coulomb_constant,
        }
    }

    /// Computes the effective hardness between two distinct sites, in eV.
    pub fn pair(&self, separation: [f64; 3], hardness_i: f64, hardness_j: f64) -> f64 {
        let distance = norm(separation);
        let width = (hardness_i * hardness_j).sqrt() / self.coulomb_constant;
        self.lambda
            * (self.coulomb_constant / 2.0)
            * (1.0 / distance + orbital_overlap(width, distance))
    }

    /// Computes the effective hardness of a site with itself, in eV.
    pub fn self_interaction(&self, hardness: f64) -> f64 {
        hardness
    }
}
