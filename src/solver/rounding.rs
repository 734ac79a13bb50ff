//! This module provides fixed-precision rounding of charges with exact conservation
//! of the total charge.

/// Rounds every charge to `digits` decimal places, half away from zero, then restores
/// the exact total charge.
///
/// Independent rounding leaves a residual of up to half a unit in the last place per
/// atom. The residual is itself a whole number of last-place steps, and it is removed
/// by adding or subtracting one step on that many leading charges, in index order.
/// Applying the function to already-rounded charges is a no-op.
pub(crate) fn round_charges(charges: &mut [f64], total_charge: f64, digits: u32) {
    let factor = 10f64.powi(digits as i32);

    for charge in charges.iter_mut() {
        *charge = (*charge * factor).round() / factor;
    }

    let residual = charges.iter().sum::<f64>() - total_charge;
    let steps = (residual.abs() * factor).round() as usize;
    if steps == 0 {
        return;
    }

    let correction = residual.signum() / factor;
    for charge in charges.iter_mut().take(steps) {
        *charge -= correction;
    }
}
