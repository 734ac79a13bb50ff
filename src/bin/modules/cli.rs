use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

const AUTHORS: &str = "Tony Kan, Ted Yu, William A. Goddard III";
const ABOUT: &str =
    "A command-line tool for calculating partial atomic charges of periodic and molecular structures using the extended charge equilibration (EQeq) method.";
const COPYRIGHT: &str = "Copyright (c) 2025 California Institute of Technology, Materials and Process Simulation Center (MSC)";
const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser)]
#[command(
    author = AUTHORS,
    version,
    about = ABOUT,
    after_help = COPYRIGHT,
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Input file containing a crystal or molecular structure.
    ///
    /// Use '-' to read from standard input. CIF inputs provide the unit cell and
    /// fractional coordinates; XYZ inputs provide Cartesian coordinates with the
    /// number of atoms on the first line, a comment on the second line, followed
    /// by lines with element symbol (or atomic number) and x, y, z coordinates.
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Format of the input structure.
    #[arg(short = 'i', long, value_enum, default_value_t = InputFormat::Auto)]
    pub input_format: InputFormat,

    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub calculation: CalculationOptions,

    #[command(flatten)]
    pub summation: SummationOptions,
}

/// Options for controlling the output format and destination.
#[derive(Args)]
#[command(next_help_heading = "Output Options")]
pub struct OutputOptions {
    /// Output file path.
    ///
    /// If not specified, results are written to standard output.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format for the results.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Number of decimal places to display for floating-point values.
    #[arg(short, long, default_value_t = 6)]
    pub precision: usize,
}

/// Options for controlling the calculation parameters.
#[derive(Args)]
#[command(next_help_heading = "Calculation Options")]
pub struct CalculationOptions {
    /// Custom ionization energy table in TOML format.
    ///
    /// If not specified, built-in parameters from the published EQeq
    /// parameterization are used.
    #[arg(short = 'P', long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Total charge of the structure.
    #[arg(short = 'q', long, default_value_t = 0.0)]
    pub total_charge: f64,

    /// Number of decimal digits the output charges are rounded to.
    ///
    /// Rounding preserves the total charge exactly.
    #[arg(long, default_value_t = 3)]
    pub digits: u32,

    /// Electron affinity of hydrogen in eV.
    #[arg(long, default_value_t = -2.0, allow_hyphen_values = true)]
    pub hydrogen_affinity: f64,

    /// Ionization energy of hydrogen in eV.
    #[arg(long, default_value_t = 13.598)]
    pub hydrogen_ionization: f64,
}

/// Options for controlling how pairwise interactions are summed.
#[derive(Args)]
#[command(next_help_heading = "Summation Options")]
pub struct SummationOptions {
    /// Summation method for the interaction matrix.
    ///
    /// Defaults to ewald when the input provides a unit cell and to
    /// non-periodic otherwise.
    #[arg(short, long, value_enum)]
    pub method: Option<Method>,

    /// Dielectric screening factor applied to off-diagonal interactions.
    #[arg(long, default_value_t = 1.2)]
    pub lambda: f64,

    /// Ewald splitting parameter in angstroms.
    #[arg(long, default_value_t = 50.0)]
    pub eta: f64,

    /// Number of periodic images summed along each lattice vector in real space.
    #[arg(long, default_value_t = 2)]
    pub real_cutoff: u32,

    /// Number of reciprocal lattice vectors summed along each axis.
    #[arg(long, default_value_t = 2)]
    pub reciprocal_cutoff: u32,
}

/// Format of the input structure file.
#[derive(Clone, ValueEnum)]
pub enum InputFormat {
    /// Detect the format from the file extension, falling back to CIF.
    Auto,
    /// Crystallographic Information File with a unit cell.
    Cif,
    /// XYZ coordinates without periodicity.
    Xyz,
}

/// Summation method selectable on the command line.
#[derive(Clone, ValueEnum)]
pub enum Method {
    /// Sum interactions once, with no periodic images.
    NonPeriodic,
    /// Sum interactions over a truncated block of periodic images.
    Direct,
    /// Ewald summation split between real and reciprocal space.
    Ewald,
}

/// Output format for the calculation results.
#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table with atom labels, elements, positions, and charges.
    Pretty,
    /// CIF file with an _atom_site_charge column appended.
    Cif,
    /// Comma-separated values with columns: label, element, x, y, z, charge.
    Csv,
    /// JSON object containing atoms array and metadata.
    Json,
}
