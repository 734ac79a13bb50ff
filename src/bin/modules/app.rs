use super::cli::{Cli, Method};
use super::error::CliError;
use super::io;
use eqeq::{EqeqSolver, ImageRange, SolverOptions, SummationMethod, get_default_parameters};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;

pub fn run(args: Cli) -> Result<(), CliError> {
    let params = if let Some(params_path) = &args.calculation.params {
        let content = fs::read_to_string(params_path).map_err(|e| CliError::Io {
            path: params_path.clone(),
            source: e,
        })?;
        toml::from_str(&content)?
    } else {
        get_default_parameters().clone()
    };

    let structure = io::read_structure(&args.input, &args.input_format)?;

    // Periodic inputs default to Ewald summation, molecular inputs to the bare sum.
    let method = match &args.summation.method {
        Some(Method::NonPeriodic) => SummationMethod::NonPeriodic,
        Some(Method::Direct) => SummationMethod::Direct,
        Some(Method::Ewald) => SummationMethod::Ewald,
        None if structure.lattice.is_some() => SummationMethod::Ewald,
        None => SummationMethod::NonPeriodic,
    };

    let solver_options = SolverOptions {
        method,
        lambda: args.summation.lambda,
        eta: args.summation.eta,
        real_space_images: ImageRange::uniform(args.summation.real_cutoff),
        reciprocal_space_images: ImageRange::uniform(args.summation.reciprocal_cutoff),
        charge_precision: args.calculation.digits,
        hydrogen_affinity: args.calculation.hydrogen_affinity,
        hydrogen_ionization: args.calculation.hydrogen_ionization,
        ..SolverOptions::default()
    };
    let solver = EqeqSolver::new(&params).with_options(solver_options);

    let source_name = if args.input == "-" {
        "stdin".to_string()
    } else {
        args.input.clone()
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("Equilibrating charges...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let cell = structure.lattice.as_ref().map(|lattice| &lattice.cell);
    let result = solver.solve(&structure.atoms, cell, args.calculation.total_charge)?;

    pb.finish_and_clear();

    let writer = io::get_writer(&args.output.output)?;
    io::write_results(
        writer,
        &structure,
        &result,
        &args.output.format,
        args.output.precision,
        &source_name,
        &solver_options,
    )?;

    Ok(())
}
