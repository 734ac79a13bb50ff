//! Explicit lattice summation of the screened Coulomb interaction.

use super::orbital_overlap;
use crate::geometry::{Cell, ImageRange, norm};

/// Interaction kernel that sums the screened Coulomb term over a finite block of
/// lattice images.
///
/// The bare 1/R series is conditionally convergent, so the absolute kernel values
/// shift with the image bounds; only the differences between kernel rows, which are
/// what the equilibration system is assembled from, converge as the bounds grow.
#[derive(Debug, Clone, Copy)]
pub struct DirectKernel {
    lambda: f64,
    coulomb_constant: f64,
    cell: Cell,
    images: ImageRange,
}

impl DirectKernel {
    /// Creates a kernel summing over `images` of `cell`.
    pub fn new(lambda: f64, coulomb_constant: f64, cell: Cell, images: ImageRange) -> Self {
        DirectKernel {
            lambda,
            coulomb_constant,
            cell,
            images,
        }
    }

    /// Computes the effective hardness between two distinct sites, in eV.
    ///
    /// Sums the screened Coulomb term at the separation shifted by every image in the
    /// range, the zero offset included.
    pub fn pair(&self, separation: [f64; 3], hardness_i: f64, hardness_j: f64) -> f64 {
        let width = (hardness_i * hardness_j).sqrt() / self.coulomb_constant;
        let mut sum = 0.0;
        for offset in self.images.offsets() {
            let image = self.cell.lattice_translation(offset);
            let distance = norm([
                separation[0] + image[0],
                separation[1] + image[1],
                separation[2] + image[2],
            ]);
            sum += 1.0 / distance + orbital_overlap(width, distance);
        }
        self.lambda * (self.coulomb_constant / 2.0) * sum
    }

    /// Computes the effective hardness of a site with itself, in eV.
    ///
    /// The atom does not interact with its own origin copy, so the sum runs over the
    /// nonzero offsets only, on top of the bare hardness.
    pub fn self_interaction(&self, hardness: f64) -> f64 {
        let width = hardness / self.coulomb_constant;
        let mut sum = 0.0;
        for offset in self.images.nonzero_offsets() {
            let distance = norm(self.cell.lattice_translation(offset));
            sum += 1.0 / distance + orbital_overlap(width, distance);
        }
        hardness + self.lambda * (self.coulomb_constant / 2.0) * sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::NonPeriodicKernel;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn cubic_cell(a: f64) -> Cell {
        Cell::from_parameters([a, a, a], [FRAC_PI_2; 3]).unwrap()
    }

    #[test]
    fn test_zero_range_matches_non_periodic_pair() {
        let cell = cubic_cell(5.0);
        let direct = DirectKernel::new(1.2, 14.4, cell, ImageRange::uniform(0));
        let non_periodic = NonPeriodicKernel::new(1.2, 14.4);
        let separation = [1.3, 0.4, -0.8];
        assert_relative_eq!(
            direct.pair(separation, 7.2, 12.9),
            non_periodic.pair(separation, 7.2, 12.9),
            max_relative = 1e-15
        );
    }

    #[test]
    fn test_zero_range_self_is_bare_hardness() {
        let cell = cubic_cell(5.0);
        let direct = DirectKernel::new(1.2, 14.4, cell, ImageRange::uniform(0));
        assert_eq!(direct.self_interaction(9.32), 9.32);
    }

    #[test]
    fn test_images_add_positive_contributions() {
        let cell = cubic_cell(4.5);
        let separation = [1.0, 0.5, 0.25];
        let coarse = DirectKernel::new(1.2, 14.4, cell, ImageRange::uniform(0));
        let fine = DirectKernel::new(1.2, 14.4, cell, ImageRange::uniform(1));
        assert!(fine.pair(separation, 10.0, 10.0) > coarse.pair(separation, 10.0, 10.0));
        assert!(fine.self_interaction(10.0) > coarse.self_interaction(10.0));
    }

    #[test]
    fn test_pair_even_in_separation() {
        let cell = cubic_cell(4.5);
        let direct = DirectKernel::new(1.2, 14.4, cell, ImageRange::uniform(2));
        let forward = direct.pair([1.0, 0.5, 0.25], 9.0, 11.0);
        let backward = direct.pair([-1.0, -0.5, -0.25], 9.0, 11.0);
        assert_relative_eq!(forward, backward, max_relative = 1e-12);
    }
}
