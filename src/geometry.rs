//! This module provides the lattice geometry used by periodic calculations.
//!
//! It defines the `Cell` struct, which derives the real-space basis, reciprocal basis, and
//! volume of a triclinic unit cell from its six lattice parameters, and the `ImageRange`
//! struct, which enumerates the integer lattice offsets visited by every periodic summation.
//! Both are consumed by the interaction kernels and are independent of the solver itself.

use crate::error::EqeqError;
use std::f64::consts::PI;

/// Fraction of the naive volume `a * b * c` below which a cell is considered degenerate.
const DEGENERATE_VOLUME_FRACTION: f64 = 1e-10;

/// A triclinic unit cell with precomputed reciprocal vectors and volume.
///
/// The basis follows the standard crystallographic convention: the `a` vector lies along
/// the x axis, the `b` vector lies in the xy plane, and the `c` vector completes a
/// right-handed system. The reciprocal vectors satisfy `h_a · a = 2π` and
/// `h_a · b = h_a · c = 0` (and cyclic permutations), so reciprocal-space sums need no
/// further normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    basis: [[f64; 3]; 3],
    reciprocal: [[f64; 3]; 3],
    volume: f64,
}

impl Cell {
    /// Constructs a cell from lattice lengths (in angstroms) and angles (in radians).
    ///
    /// # Arguments
    ///
    /// * `lengths` - The lattice lengths `[a, b, c]`.
    /// * `angles` - The lattice angles `[α, β, γ]` in radians, where α is the angle
    ///   between `b` and `c`, β between `a` and `c`, and γ between `a` and `b`.
    ///
    /// # Returns
    ///
    /// Returns the constructed `Cell` on success.
    ///
    /// # Errors
    ///
    /// Returns an `EqeqError::DegenerateCell` if any length is non-positive, any angle
    /// lies outside the open interval (0, π), the angle combination leaves `c` with no
    /// out-of-plane component, or the resulting volume vanishes.
    pub fn from_parameters(lengths: [f64; 3], angles: [f64; 3]) -> Result<Self, EqeqError> {
        let [a, b, c] = lengths;
        let [alpha, beta, gamma] = angles;

        if !(a > 0.0 && b > 0.0 && c > 0.0) {
            return Err(EqeqError::DegenerateCell(format!(
                "lattice lengths must be positive, got [{}, {}, {}]",
                a, b, c
            )));
        }
        if !angles.iter().all(|&angle| angle > 0.0 && angle < PI) {
            return Err(EqeqError::DegenerateCell(format!(
                "lattice angles must lie strictly between 0 and π radians, got [{}, {}, {}]",
                alpha, beta, gamma
            )));
        }

        let a_vector = [a, 0.0, 0.0];
        let b_vector = [b * gamma.cos(), b * gamma.sin(), 0.0];

        let c_x = c * beta.cos();
        let c_y = (c * b * alpha.cos() - b_vector[0] * c_x) / b_vector[1];
        let c_z_squared = c * c - c_x * c_x - c_y * c_y;
        if c_z_squared <= 0.0 {
            return Err(EqeqError::DegenerateCell(format!(
                "angle combination leaves no out-of-plane component for the c vector (c_z² = {:.3e})",
                c_z_squared
            )));
        }
        let c_vector = [c_x, c_y, c_z_squared.sqrt()];

        // With b_y > 0 and c_z > 0 the basis is right-handed and the determinant positive.
        let volume = dot(a_vector, cross(b_vector, c_vector));
        if volume < DEGENERATE_VOLUME_FRACTION * a * b * c {
            return Err(EqeqError::DegenerateCell(format!(
                "cell volume {:.3e} Å³ is vanishingly small",
                volume
            )));
        }

        let scale = 2.0 * PI / volume;
        let reciprocal = [
            scaled(cross(b_vector, c_vector), scale),
            scaled(cross(c_vector, a_vector), scale),
            scaled(cross(a_vector, b_vector), scale),
        ];

        Ok(Cell {
            basis: [a_vector, b_vector, c_vector],
            reciprocal,
            volume,
        })
    }

    /// Returns the real-space basis vectors `[a, b, c]` in angstroms.
    pub fn basis(&self) -> &[[f64; 3]; 3] {
        &self.basis
    }

    /// Returns the reciprocal basis vectors in inverse angstroms (with the 2π factor).
    pub fn reciprocal(&self) -> &[[f64; 3]; 3] {
        &self.reciprocal
    }

    /// Returns the cell volume in cubic angstroms.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Returns the real-space translation vector for an integer offset `[u, v, w]`.
    pub fn lattice_translation(&self, offset: [i32; 3]) -> [f64; 3] {
        self.combination(self.basis, [offset[0] as f64, offset[1] as f64, offset[2] as f64])
    }

    /// Returns the reciprocal-space vector for an integer offset `[u, v, w]`.
    pub fn reciprocal_translation(&self, offset: [i32; 3]) -> [f64; 3] {
        self.combination(
            self.reciprocal,
            [offset[0] as f64, offset[1] as f64, offset[2] as f64],
        )
    }

    /// Converts fractional coordinates to Cartesian coordinates in angstroms.
    pub fn to_cartesian(&self, fractional: [f64; 3]) -> [f64; 3] {
        self.combination(self.basis, fractional)
    }

    /// Converts Cartesian coordinates in angstroms to fractional coordinates.
    ///
    /// The basis has zero y and z components on `a` and zero z component on `b`, so the
    /// conversion is a back-substitution rather than a full matrix inversion.
    pub fn to_fractional(&self, cartesian: [f64; 3]) -> [f64; 3] {
        let [a_vector, b_vector, c_vector] = self.basis;
        let w = cartesian[2] / c_vector[2];
        let v = (cartesian[1] - w * c_vector[1]) / b_vector[1];
        let u = (cartesian[0] - v * b_vector[0] - w * c_vector[0]) / a_vector[0];
        [u, v, w]
    }

    fn combination(&self, vectors: [[f64; 3]; 3], coefficients: [f64; 3]) -> [f64; 3] {
        let mut result = [0.0; 3];
        for (vector, coefficient) in vectors.iter().zip(coefficients) {
            result[0] += coefficient * vector[0];
            result[1] += coefficient * vector[1];
            result[2] += coefficient * vector[2];
        }
        result
    }
}

/// Per-axis bounds for a block of integer lattice offsets.
///
/// An `ImageRange` with bounds `(a, b, c)` covers every offset `[u, v, w]` with
/// `|u| ≤ a`, `|v| ≤ b`, and `|w| ≤ c`. Offsets are always visited in the same
/// lexicographic order, so repeated walks accumulate lattice sums identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRange {
    /// The inclusive bound along the `a` axis.
    pub a: u32,
    /// The inclusive bound along the `b` axis.
    pub b: u32,
    /// The inclusive bound along the `c` axis.
    pub c: u32,
}

impl ImageRange {
    /// Creates a range with independent per-axis bounds.
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        ImageRange { a, b, c }
    }

    /// Creates a range with the same bound on all three axes.
    pub fn uniform(extent: u32) -> Self {
        Self::new(extent, extent, extent)
    }

    /// Returns an iterator over every offset in the range, including the origin.
    ///
    /// Offsets are produced in lexicographic order from `[-a, -b, -c]` to `[a, b, c]`.
    pub fn offsets(self) -> impl Iterator<Item = [i32; 3]> {
        let (bound_a, bound_b, bound_c) = (self.a as i32, self.b as i32, self.c as i32);
        (-bound_a..=bound_a).flat_map(move |u| {
            (-bound_b..=bound_b)
                .flat_map(move |v| (-bound_c..=bound_c).map(move |w| [u, v, w]))
        })
    }

    /// Returns an iterator over every offset in the range except the origin.
    ///
    /// Used for sums over the periodic images of a site with itself, where the origin
    /// term is excluded or handled separately.
    pub fn nonzero_offsets(self) -> impl Iterator<Item = [i32; 3]> {
        self.offsets().filter(|&offset| offset != [0, 0, 0])
    }
}

pub(crate) fn dot(u: [f64; 3], v: [f64; 3]) -> f64 {
    u[0] * v[0] + u[1] * v[1] + u[2] * v[2]
}

pub(crate) fn norm(v: [f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

fn cross(u: [f64; 3], v: [f64; 3]) -> [f64; 3] {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

fn scaled(v: [f64; 3], factor: f64) -> [f64; 3] {
    [v[0] * factor, v[1] * factor, v[2] * factor]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::FRAC_PI_2;

    fn cubic(a: f64) -> Cell {
        Cell::from_parameters([a, a, a], [FRAC_PI_2; 3]).unwrap()
    }

    fn triclinic() -> Cell {
        let degrees = PI / 180.0;
        Cell::from_parameters(
            [6.5, 7.2, 8.1],
            [80.0 * degrees, 95.0 * degrees, 103.0 * degrees],
        )
        .unwrap()
    }

    #[test]
    fn test_cubic_cell_basis_and_volume() {
        let cell = cubic(2.0);
        let basis = cell.basis();
        assert_abs_diff_eq!(basis[0][0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(basis[1][1], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(basis[2][2], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(basis[0][1], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(basis[1][0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(basis[2][0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(cell.volume(), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cubic_reciprocal_vectors() {
        let cell = cubic(2.0);
        let reciprocal = cell.reciprocal();
        for axis in 0..3 {
            for component in 0..3 {
                let expected = if axis == component { PI } else { 0.0 };
                assert_abs_diff_eq!(reciprocal[axis][component], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_reciprocal_biorthogonality_triclinic() {
        let cell = triclinic();
        for i in 0..3 {
            for j in 0..3 {
                let product = dot(cell.reciprocal()[i], cell.basis()[j]);
                let expected = if i == j { 2.0 * PI } else { 0.0 };
                assert_abs_diff_eq!(product, expected, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_fractional_cartesian_round_trip() {
        let cell = triclinic();
        let fractional = [0.25, 0.75, 0.5];
        let cartesian = cell.to_cartesian(fractional);
        let recovered = cell.to_fractional(cartesian);
        for axis in 0..3 {
            assert_abs_diff_eq!(recovered[axis], fractional[axis], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_lattice_translation_matches_basis() {
        let cell = triclinic();
        let translation = cell.lattice_translation([1, -2, 3]);
        let basis = cell.basis();
        for axis in 0..3 {
            let expected = basis[0][axis] - 2.0 * basis[1][axis] + 3.0 * basis[2][axis];
            assert_abs_diff_eq!(translation[axis], expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_degenerate_zero_length() {
        let result = Cell::from_parameters([0.0, 5.0, 5.0], [FRAC_PI_2; 3]);
        assert!(matches!(result, Err(EqeqError::DegenerateCell(_))));
    }

    #[test]
    fn test_degenerate_flat_angle() {
        let result = Cell::from_parameters([5.0, 5.0, 5.0], [FRAC_PI_2, FRAC_PI_2, PI]);
        assert!(matches!(result, Err(EqeqError::DegenerateCell(_))));
    }

    #[test]
    fn test_degenerate_angle_combination() {
        // α > β + γ cannot be realized by any c vector.
        let degrees = PI / 180.0;
        let result = Cell::from_parameters(
            [5.0, 5.0, 5.0],
            [50.0 * degrees, 30.0 * degrees, 15.0 * degrees],
        );
        assert!(matches!(result, Err(EqeqError::DegenerateCell(_))));
    }

    #[test]
    fn test_offsets_order_and_count() {
        let range = ImageRange::uniform(1);
        let offsets: Vec<[i32; 3]> = range.offsets().collect();
        assert_eq!(offsets.len(), 27);
        assert_eq!(offsets[0], [-1, -1, -1]);
        assert_eq!(offsets[13], [0, 0, 0]);
        assert_eq!(offsets[26], [1, 1, 1]);
    }

    #[test]
    fn test_offsets_anisotropic() {
        let range = ImageRange::new(1, 0, 2);
        let offsets: Vec<[i32; 3]> = range.offsets().collect();
        assert_eq!(offsets.len(), 3 * 1 * 5);
        assert!(offsets.iter().all(|o| o[1] == 0));
        assert!(offsets.iter().any(|&o| o == [-1, 0, 2]));
    }

    #[test]
    fn test_nonzero_offsets_excludes_origin() {
        let range = ImageRange::uniform(1);
        let offsets: Vec<[i32; 3]> = range.nonzero_offsets().collect();
        assert_eq!(offsets.len(), 26);
        assert!(offsets.iter().all(|&o| o != [0, 0, 0]));
    }

    #[test]
    fn test_offsets_restartable() {
        let range = ImageRange::uniform(2);
        let first: Vec<[i32; 3]> = range.offsets().collect();
        let second: Vec<[i32; 3]> = range.offsets().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_range_is_origin_only() {
        let range = ImageRange::uniform(0);
        let offsets: Vec<[i32; 3]> = range.offsets().collect();
        assert_eq!(offsets, vec![[0, 0, 0]]);
        assert_eq!(range.nonzero_offsets().count(), 0);
    }
}
