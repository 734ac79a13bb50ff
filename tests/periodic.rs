mod common;

use common::{diatomic, solve_with};
use eqeq::{
    Atom, Cell, EqeqError, EqeqSolver, ImageRange, SolverOptions, SummationMethod,
    get_default_parameters,
};
use std::f64::consts::FRAC_PI_2;

fn cubic_cell(edge: f64) -> Cell {
    Cell::from_parameters([edge, edge, edge], [FRAC_PI_2; 3]).expect("valid cubic cell")
}

/// The CsCl structure: one ion at the corner, the counter-ion at the body center.
fn cscl() -> (Vec<Atom>, Cell) {
    let edge = 4.11;
    let half = edge / 2.0;
    let atoms = vec![
        Atom::new("Cs1", "Cs", [0.0, 0.0, 0.0]),
        Atom::new("Cl1", "Cl", [half, half, half]),
    ];
    (atoms, cubic_cell(edge))
}

fn fine_options(method: SummationMethod) -> SolverOptions {
    SolverOptions {
        method,
        charge_precision: 9,
        ..SolverOptions::default()
    }
}

#[test]
fn test_ewald_agrees_with_direct_at_large_eta() {
    let (atoms, cell) = cscl();
    let direct = solve_with(
        &atoms,
        Some(&cell),
        0.0,
        fine_options(SummationMethod::Direct),
    );

    // A huge splitting width empties the reciprocal series and reduces the
    // real-space series to the bare sum, so the two methods must agree.
    let wide = SolverOptions {
        eta: 1e6,
        ..fine_options(SummationMethod::Ewald)
    };
    let ewald = solve_with(&atoms, Some(&cell), 0.0, wide);

    for (d, e) in direct.charges.iter().zip(ewald.charges.iter()) {
        assert!((d - e).abs() < 1e-6, "direct {} vs ewald {}", d, e);
    }
}

#[test]
fn test_cscl_sign_pattern() {
    let (atoms, cell) = cscl();
    let result = solve_with(
        &atoms,
        Some(&cell),
        0.0,
        fine_options(SummationMethod::Ewald),
    );

    assert!(
        result.charges[0] > 0.0,
        "cesium should be the cation, got {}",
        result.charges[0]
    );
    assert!(result.charges[1] < 0.0);
    assert!(result.total_charge().abs() < 1e-9);
}

#[test]
fn test_periodic_identical_atoms_share_charge() {
    let edge = 4.11;
    let half = edge / 2.0;
    let atoms = vec![
        Atom::new("Cs1", "Cs", [0.0, 0.0, 0.0]),
        Atom::new("Cs2", "Cs", [half, half, half]),
    ];
    let cell = cubic_cell(edge);
    let result = solve_with(
        &atoms,
        Some(&cell),
        0.0,
        fine_options(SummationMethod::Ewald),
    );

    assert_eq!(result.charges, vec![0.0, 0.0]);
}

#[test]
fn test_periodic_methods_require_cell() {
    let atoms = diatomic("Cs", "Cl", 3.5);
    let params = get_default_parameters();

    let err = EqeqSolver::new(params)
        .with_options(fine_options(SummationMethod::Ewald))
        .solve(&atoms, None, 0.0)
        .unwrap_err();
    assert!(matches!(err, EqeqError::MissingCell { method: "Ewald" }));

    let err = EqeqSolver::new(params)
        .with_options(fine_options(SummationMethod::Direct))
        .solve(&atoms, None, 0.0)
        .unwrap_err();
    assert!(matches!(err, EqeqError::MissingCell { method: "Direct" }));
}

#[test]
fn test_non_periodic_run_ignores_cell() {
    let atoms = diatomic("Na", "Cl", 2.361);
    let options = fine_options(SummationMethod::NonPeriodic);

    let with_cell = solve_with(&atoms, Some(&cubic_cell(10.0)), 0.0, options);
    let without_cell = solve_with(&atoms, None, 0.0, options);

    assert_eq!(with_cell.charges, without_cell.charges);
}

#[test]
fn test_zero_image_block_matches_non_periodic() {
    let atoms = diatomic("Na", "Cl", 2.361);
    let cell = cubic_cell(20.0);

    let collapsed = SolverOptions {
        real_space_images: ImageRange::uniform(0),
        ..fine_options(SummationMethod::Direct)
    };
    let direct = solve_with(&atoms, Some(&cell), 0.0, collapsed);
    let non_periodic = solve_with(&atoms, None, 0.0, fine_options(SummationMethod::NonPeriodic));

    // With no images left the direct sum degenerates to the bare pair term.
    assert_eq!(direct.charges, non_periodic.charges);
}

#[test]
fn test_charged_cell_conserves_total() {
    let (atoms, cell) = cscl();
    let result = solve_with(
        &atoms,
        Some(&cell),
        2.0,
        fine_options(SummationMethod::Ewald),
    );

    assert!((result.total_charge() - 2.0).abs() < 1e-9);
}
