use eqeq::{Atom, CalculationResult, Cell, EqeqSolver, SolverOptions, get_default_parameters};

/// Runs a calculation with the built-in parameter table, panicking on failure.
pub fn solve_with(
    atoms: &[Atom],
    cell: Option<&Cell>,
    total_charge: f64,
    options: SolverOptions,
) -> CalculationResult {
    let params = get_default_parameters();
    EqeqSolver::new(params)
        .with_options(options)
        .solve(atoms, cell, total_charge)
        .expect("charge equilibration failed")
}

/// Two atoms on the x axis at the given separation in angstroms.
pub fn diatomic(first: &str, second: &str, separation: f64) -> Vec<Atom> {
    vec![
        Atom::new(format!("{}1", first), first, [0.0, 0.0, 0.0]),
        Atom::new(format!("{}2", second), second, [separation, 0.0, 0.0]),
    ]
}
