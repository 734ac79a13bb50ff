//! Ewald-split lattice summation of the screened Coulomb interaction.

use super::orbital_overlap;
use crate::geometry::{Cell, ImageRange, dot, norm};
use std::f64::consts::PI;

/// Interaction kernel using the Ewald decomposition of the periodic Coulomb sum.
///
/// The bare 1/R series is split into a short-ranged real-space part, screened by
/// `erfc(R/η)`, and a damped reciprocal-space series over nonzero wave vectors, plus a
/// constant self-term correction. Both series converge absolutely, so the kernel values
/// themselves stabilize as the image bounds grow, not just their differences. The
/// orbital-overlap correction is short-ranged and is summed directly over the
/// real-space images.
#[derive(Debug, Clone, Copy)]
pub struct EwaldKernel {
    lambda: f64,
    coulomb_constant: f64,
    eta: f64,
    cell: Cell,
    real_images: ImageRange,
    reciprocal_images: ImageRange,
}

impl EwaldKernel {
    /// Creates a kernel with splitting width `eta` (in angstroms) over `cell`.
    pub fn new(
        lambda: f64,
        coulomb_constant: f64,
        eta: f64,
        cell: Cell,
        real_images: ImageRange,
        reciprocal_images: ImageRange,
    ) -> Self {
        EwaldKernel {
            lambda,
            coulomb_constant,
            eta,
            cell,
            real_images,
            reciprocal_images,
        }
    }

    /// Computes the effective hardness between two distinct sites, in eV.
    pub fn pair(&self, separation: [f64; 3], hardness_i: f64, hardness_j: f64) -> f64 {
        let width = (hardness_i * hardness_j).sqrt() / self.coulomb_constant;

        let mut screened = 0.0;
        let mut overlap = 0.0;
        for offset in self.real_images.offsets() {
            let image = self.cell.lattice_translation(offset);
            let distance = norm([
                separation[0] + image[0],
                separation[1] + image[1],
                separation[2] + image[2],
            ]);
            screened += libm::erfc(distance / self.eta) / distance;
            overlap += orbital_overlap(width, distance);
        }

        let reciprocal = self.reciprocal_sum(Some(separation));

        self.lambda * (self.coulomb_constant / 2.0) * (screened + reciprocal + overlap)
    }

    /// Computes the effective hardness of a site with itself, in eV.
    ///
    /// The origin copy is excluded from both real-space series, and the constant
    /// `2 / (η √π)` removes the screening charge's interaction with its own center.
    pub fn self_interaction(&self, hardness: f64) -> f64 {
        let width = hardness / self.coulomb_constant;

        let mut screened = 0.0;
        let mut overlap = 0.0;
        for offset in self.real_images.nonzero_offsets() {
            let distance = norm(self.cell.lattice_translation(offset));
            screened += libm::erfc(distance / self.eta) / distance;
            overlap += orbital_overlap(width, distance);
        }

        let reciprocal = self.reciprocal_sum(None);
        let center_correction = 2.0 / (self.eta * PI.sqrt());

        hardness
            + self.lambda
                * (self.coulomb_constant / 2.0)
                * (screened + reciprocal + overlap - center_correction)
    }

    /// Damped reciprocal-space series over the nonzero wave vectors.
    ///
    /// For distinct sites the in-cell separation enters through the phase factor
    /// `cos(G · ΔR)`; the self series carries unit phase.
    fn reciprocal_sum(&self, separation: Option<[f64; 3]>) -> f64 {
        let mut sum = 0.0;
        for offset in self.reciprocal_images.nonzero_offsets() {
            let wave_vector = self.cell.reciprocal_translation(offset);
            let magnitude = norm(wave_vector);
            let damping = 0.5 * magnitude * self.eta;
            let phase = match separation {
                Some(delta) => dot(wave_vector, delta).cos(),
                None => 1.0,
            };
            sum += phase * (-damping * damping).exp() / (magnitude * magnitude);
        }
        4.0 * PI / self.cell.volume() * sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::DirectKernel;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn cubic_cell(a: f64) -> Cell {
        Cell::from_parameters([a, a, a], [FRAC_PI_2; 3]).unwrap()
    }

    #[test]
    fn test_pair_even_in_separation() {
        let cell = cubic_cell(4.11);
        let kernel = EwaldKernel::new(
            1.2,
            14.4,
            50.0,
            cell,
            ImageRange::uniform(2),
            ImageRange::uniform(2),
        );
        let forward = kernel.pair([2.055, 2.055, 2.055], 7.2, 12.9);
        let backward = kernel.pair([-2.055, -2.055, -2.055], 7.2, 12.9);
        assert_relative_eq!(forward, backward, max_relative = 1e-12);
    }

    #[test]
    fn test_large_eta_deficit_uniform_across_entries() {
        // As η grows, erfc(R/η) → 1 and the reciprocal series underflows, so the
        // Ewald kernel reproduces the explicit sum shifted by a constant: each of
        // the N image terms loses 2/(η √π), and the self entry loses the same
        // amount through N - 1 images plus the center correction. The shift must
        // therefore be identical for pair and self entries.
        let cell = cubic_cell(4.11);
        let eta = 1e6;
        let real = ImageRange::uniform(2);
        let ewald = EwaldKernel::new(1.2, 14.4, eta, cell, real, ImageRange::uniform(2));
        let direct = DirectKernel::new(1.2, 14.4, cell, real);

        let separation = [2.055, 2.055, 2.055];
        let pair_deficit = direct.pair(separation, 7.2, 12.9) - ewald.pair(separation, 7.2, 12.9);
        let self_deficit = direct.self_interaction(7.2) - ewald.self_interaction(7.2);

        assert!(pair_deficit > 0.0);
        assert_relative_eq!(pair_deficit, self_deficit, max_relative = 1e-6);
    }

    #[test]
    fn test_small_eta_center_correction_dominates() {
        let cell = cubic_cell(4.11);
        let kernel = EwaldKernel::new(
            1.2,
            14.4,
            1.5,
            cell,
            ImageRange::uniform(2),
            ImageRange::uniform(2),
        );
        // With a small η the center correction dominates every lattice term and the
        // self entry drops below the bare hardness.
        assert!(kernel.self_interaction(10.0) < 10.0);
    }
}
