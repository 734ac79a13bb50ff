use super::cli::{InputFormat, OutputFormat};
use super::error::CliError;
use eqeq::{Atom, CalculationResult, Cell, SolverOptions, SummationMethod};
use prettytable::*;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// A parsed input structure. Periodic when a lattice is present.
#[derive(Debug)]
pub struct Structure {
    pub name: String,
    pub atoms: Vec<Atom>,
    pub lattice: Option<Lattice>,
}

/// The unit cell as read from the input, kept alongside the derived Cartesian cell.
#[derive(Debug)]
pub struct Lattice {
    /// Lattice lengths [a, b, c] in angstroms.
    pub lengths: [f64; 3],
    /// Lattice angles [α, β, γ] in degrees, as written in CIF.
    pub angles: [f64; 3],
    /// The Cartesian cell built from the lengths and angles.
    pub cell: Cell,
}

/// The six cell tags a CIF input must provide, with their slot in the parse buffer.
const CELL_TAGS: [(&str, usize); 6] = [
    ("_cell_length_a", 0),
    ("_cell_length_b", 1),
    ("_cell_length_c", 2),
    ("_cell_angle_alpha", 3),
    ("_cell_angle_beta", 4),
    ("_cell_angle_gamma", 5),
];

pub fn read_structure(input_spec: &str, format: &InputFormat) -> Result<Structure, CliError> {
    let text = if input_spec == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(input_spec).map_err(|e| CliError::Io {
            path: PathBuf::from(input_spec),
            source: e,
        })?
    };

    match format {
        InputFormat::Xyz => parse_xyz(&text, input_spec),
        InputFormat::Cif => parse_cif(&text, input_spec),
        InputFormat::Auto if has_xyz_extension(input_spec) => parse_xyz(&text, input_spec),
        InputFormat::Auto => parse_cif(&text, input_spec),
    }
}

fn has_xyz_extension(input_spec: &str) -> bool {
    Path::new(input_spec)
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("xyz"))
}

/// Parses a CIF document into a periodic structure.
///
/// The parser is deliberately minimal: it reads the six `_cell_*` tags, any
/// `loop_` that carries `_atom_site_fract_x`, and ignores everything else. Symmetry
/// operations are not expanded; the file must list every atom of the cell (P1).
fn parse_cif(text: &str, source_name: &str) -> Result<Structure, CliError> {
    let mut name = String::new();
    let mut cell_values = [None::<f64>; 6];
    let mut sites: Vec<RawSite> = Vec::new();

    let mut lines = text.lines().peekable();
    while let Some(line) = lines.next() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(block) = trimmed.strip_prefix("data_") {
            name = block.to_string();
            continue;
        }

        if trimmed == "loop_" {
            let mut headers: Vec<&str> = Vec::new();
            while let Some(next) = lines.peek() {
                let candidate = next.trim();
                if !candidate.starts_with('_') {
                    break;
                }
                headers.push(candidate.split_whitespace().next().unwrap_or(candidate));
                lines.next();
            }

            let x_index = match headers.iter().position(|h| *h == "_atom_site_fract_x") {
                Some(index) => index,
                // Not the atom loop. Its data rows match no tag below and fall through.
                None => continue,
            };
            let y_index = headers
                .iter()
                .position(|h| *h == "_atom_site_fract_y")
                .ok_or_else(|| cif_error(source_name, "Atom site loop is missing _atom_site_fract_y"))?;
            let z_index = headers
                .iter()
                .position(|h| *h == "_atom_site_fract_z")
                .ok_or_else(|| cif_error(source_name, "Atom site loop is missing _atom_site_fract_z"))?;
            let label_index = headers.iter().position(|h| *h == "_atom_site_label");
            let symbol_index = headers.iter().position(|h| *h == "_atom_site_type_symbol");
            if label_index.is_none() && symbol_index.is_none() {
                return Err(cif_error(
                    source_name,
                    "Atom site loop provides neither _atom_site_label nor _atom_site_type_symbol",
                ));
            }

            let width = x_index
                .max(y_index)
                .max(z_index)
                .max(label_index.unwrap_or(0))
                .max(symbol_index.unwrap_or(0))
                + 1;

            while let Some(next) = lines.peek() {
                let row = next.trim();
                if row.is_empty()
                    || row.starts_with('_')
                    || row.starts_with('#')
                    || row.starts_with("loop_")
                    || row.starts_with("data_")
                {
                    break;
                }
                lines.next();

                let fields: Vec<&str> = row.split_whitespace().collect();
                if fields.len() < width {
                    return Err(cif_error(
                        source_name,
                        format!(
                            "Atom site row '{}' has {} fields, expected at least {}",
                            row,
                            fields.len(),
                            width
                        ),
                    ));
                }

                let symbol_field = match symbol_index {
                    Some(index) => fields[index],
                    None => fields[label_index.unwrap_or(0)],
                };
                let symbol = canonical_symbol(symbol_field).ok_or_else(|| {
                    cif_error(
                        source_name,
                        format!("Unknown element in atom site: {}", symbol_field),
                    )
                })?;

                let mut fractional = [0.0; 3];
                for (slot, index) in [x_index, y_index, z_index].into_iter().enumerate() {
                    fractional[slot] = parse_numeric(fields[index]).ok_or_else(|| {
                        cif_error(
                            source_name,
                            format!("Invalid fractional coordinate: {}", fields[index]),
                        )
                    })?;
                }

                sites.push(RawSite {
                    label: label_index.map(|index| fields[index].to_string()),
                    symbol,
                    fractional,
                });
            }
            continue;
        }

        if let Some((tag, value)) = split_tag(trimmed) {
            if let Some(&(_, slot)) = CELL_TAGS.iter().find(|(cell_tag, _)| *cell_tag == tag) {
                cell_values[slot] = Some(parse_numeric(value).ok_or_else(|| {
                    cif_error(source_name, format!("Invalid value for {}: '{}'", tag, value))
                })?);
            }
        }
    }

    let mut resolved = [0.0; 6];
    for (slot, value) in cell_values.into_iter().enumerate() {
        resolved[slot] = value.ok_or_else(|| {
            cif_error(source_name, format!("Missing {} tag", CELL_TAGS[slot].0))
        })?;
    }
    let lengths = [resolved[0], resolved[1], resolved[2]];
    let angles = [resolved[3], resolved[4], resolved[5]];
    let cell = Cell::from_parameters(lengths, angles.map(f64::to_radians))?;

    if sites.is_empty() {
        return Err(cif_error(source_name, "No atom sites found"));
    }

    let atoms = sites
        .into_iter()
        .enumerate()
        .map(|(index, site)| {
            let label = site
                .label
                .unwrap_or_else(|| format!("{}{}", site.symbol, index + 1));
            Atom::new(label, site.symbol, cell.to_cartesian(site.fractional))
        })
        .collect();

    Ok(Structure {
        name,
        atoms,
        lattice: Some(Lattice {
            lengths,
            angles,
            cell,
        }),
    })
}

/// One `_atom_site_*` row before the cell is known.
struct RawSite {
    label: Option<String>,
    symbol: &'static str,
    fractional: [f64; 3],
}

/// Splits a CIF tag line into the tag and the rest of the line.
fn split_tag(line: &str) -> Option<(&str, &str)> {
    if !line.starts_with('_') {
        return None;
    }
    let mut parts = line.splitn(2, char::is_whitespace);
    let tag = parts.next()?;
    let value = parts.next().unwrap_or("").trim();
    Some((tag, value))
}

/// Parses a CIF numeric field, stripping a trailing standard uncertainty like `4.913(2)`.
fn parse_numeric(field: &str) -> Option<f64> {
    let bare = match field.find('(') {
        Some(open) => &field[..open],
        None => field,
    };
    bare.parse().ok()
}

fn parse_xyz(text: &str, source_name: &str) -> Result<Structure, CliError> {
    let mut lines = text.lines();

    let num_atoms_line = lines
        .next()
        .ok_or_else(|| xyz_error(source_name, "Missing number of atoms line"))?;
    let num_atoms: usize = num_atoms_line.trim().parse().map_err(|_| {
        xyz_error(
            source_name,
            format!("Invalid number of atoms: {}", num_atoms_line),
        )
    })?;

    let comment = lines
        .next()
        .ok_or_else(|| xyz_error(source_name, "Missing comment line"))?;

    let mut atoms = Vec::with_capacity(num_atoms);
    for (i, line) in lines.enumerate() {
        if i >= num_atoms {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(xyz_error(
                source_name,
                format!(
                    "Line {}: expected at least 4 fields, got {}",
                    i + 3,
                    parts.len()
                ),
            ));
        }
        let symbol = canonical_symbol(parts[0])
            .ok_or_else(|| xyz_error(source_name, format!("Unknown element: {}", parts[0])))?;
        let mut position = [0.0; 3];
        for (axis, field) in parts[1..4].iter().enumerate() {
            position[axis] = field.parse().map_err(|_| {
                xyz_error(
                    source_name,
                    format!("Invalid {} coordinate: {}", ["x", "y", "z"][axis], field),
                )
            })?;
        }
        atoms.push(Atom::new(format!("{}{}", symbol, i + 1), symbol, position));
    }

    if atoms.len() != num_atoms {
        return Err(xyz_error(
            source_name,
            format!("Expected {} atoms, got {}", num_atoms, atoms.len()),
        ));
    }

    Ok(Structure {
        name: comment.trim().to_string(),
        atoms,
        lattice: None,
    })
}

fn cif_error(source_name: &str, details: impl Into<String>) -> CliError {
    CliError::CifParse {
        source_name: source_name.to_string(),
        details: details.into(),
    }
}

fn xyz_error(source_name: &str, details: impl Into<String>) -> CliError {
    CliError::XyzParse {
        source_name: source_name.to_string(),
        details: details.into(),
    }
}

const ELEMENT_SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn",
    "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Resolves an element field to its canonical symbol.
///
/// Accepts an atomic number ("8"), a symbol in any capitalization ("FE"), or a
/// crystallographic site field with a trailing oxidation state or site index
/// ("Fe3+", "O1").
fn canonical_symbol(field: &str) -> Option<&'static str> {
    if let Ok(number) = field.parse::<usize>() {
        return match number {
            1..=118 => Some(ELEMENT_SYMBOLS[number - 1]),
            _ => None,
        };
    }

    let prefix: String = field.chars().take_while(char::is_ascii_alphabetic).collect();
    if prefix.is_empty() {
        return None;
    }
    ELEMENT_SYMBOLS
        .iter()
        .find(|symbol| symbol.eq_ignore_ascii_case(&prefix))
        .copied()
}

pub fn get_writer(output_path: &Option<PathBuf>) -> Result<Box<dyn Write>, CliError> {
    match output_path {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| CliError::Io {
                path: path.clone(),
                source: e,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

pub fn write_results(
    mut writer: Box<dyn Write>,
    structure: &Structure,
    result: &CalculationResult,
    format: &OutputFormat,
    precision: usize,
    source_name: &str,
    options: &SolverOptions,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Pretty => {
            write_pretty_table(&mut writer, structure, result, precision, source_name, options)
        }
        OutputFormat::Cif => write_cif(&mut writer, structure, result, precision),
        OutputFormat::Csv => write_csv(&mut writer, structure, result, precision),
        OutputFormat::Json => write_json(&mut writer, structure, result, precision, options),
    }
}

fn method_name(method: SummationMethod) -> &'static str {
    match method {
        SummationMethod::NonPeriodic => "non-periodic",
        SummationMethod::Direct => "direct",
        SummationMethod::Ewald => "ewald",
    }
}

fn write_pretty_table(
    writer: &mut dyn Write,
    structure: &Structure,
    result: &CalculationResult,
    precision: usize,
    source_name: &str,
    options: &SolverOptions,
) -> Result<(), CliError> {
    let box_format = format::FormatBuilder::new()
        .column_separator('│')
        .borders('│')
        .separators(
            &[format::LinePosition::Top],
            format::LineSeparator::new('─', '┬', '╭', '╮'),
        )
        .separators(
            &[format::LinePosition::Title],
            format::LineSeparator::new('═', '╪', '╞', '╡'),
        )
        .separators(
            &[format::LinePosition::Intern],
            format::LineSeparator::new('─', '┼', '├', '┤'),
        )
        .separators(
            &[format::LinePosition::Bottom],
            format::LineSeparator::new('─', '┴', '╰', '╯'),
        )
        .padding(1, 1)
        .build();

    let no_intern_format = format::FormatBuilder::new()
        .column_separator('│')
        .borders('│')
        .separators(
            &[format::LinePosition::Top],
            format::LineSeparator::new('─', '┬', '╭', '╮'),
        )
        .separators(
            &[format::LinePosition::Bottom],
            format::LineSeparator::new('─', '┴', '╰', '╯'),
        )
        .padding(1, 1)
        .build();

    let total_charge = result.total_charge();

    let mut title_table = Table::new();
    title_table.set_format(box_format);
    title_table.add_row(row![bc->"EQeq Charge Equilibration Results"]);
    title_table.print(writer)?;
    writeln!(writer)?;

    let mut summary_table = Table::new();
    summary_table.set_format(no_intern_format);
    summary_table.add_row(row![b->"Source File:", source_name]);
    summary_table.add_row(row![b->"Total Atoms:", structure.atoms.len()]);
    summary_table.add_row(row![b->"Summation Method:", method_name(options.method)]);
    if let Some(lattice) = &structure.lattice {
        summary_table.add_row(row![b->"Cell Lengths:", format!(
            "{:.4}  {:.4}  {:.4} Å",
            lattice.lengths[0], lattice.lengths[1], lattice.lengths[2]
        )]);
        summary_table.add_row(row![b->"Cell Angles:", format!(
            "{:.2}  {:.2}  {:.2} deg",
            lattice.angles[0], lattice.angles[1], lattice.angles[2]
        )]);
    }
    if options.method == SummationMethod::Ewald {
        summary_table.add_row(row![b->"Splitting Width:", format!("{} Å", options.eta)]);
    }
    summary_table
        .add_row(row![b->"Total Charge:", format!("{:.prec$} e", total_charge, prec = precision)]);
    summary_table.print(writer)?;
    writeln!(writer)?;

    let mut data_table = Table::new();
    data_table.set_format(box_format);
    data_table.set_titles(
        row![bc->"Label", bc->"Element", bc->"X (Å)", bc->"Y (Å)", bc->"Z (Å)", bc->"Charge (e)"],
    );

    for (atom, &charge) in structure.atoms.iter().zip(result.charges.iter()) {
        data_table.add_row(row![
            l->atom.label,
            l->atom.symbol,
            r->format!("{:.prec$}", atom.position[0], prec = precision),
            r->format!("{:.prec$}", atom.position[1], prec = precision),
            r->format!("{:.prec$}", atom.position[2], prec = precision),
            r->format!("{:.prec$}", charge, prec = precision)
        ]);
    }

    data_table.print(writer)?;

    Ok(())
}

fn write_cif(
    writer: &mut dyn Write,
    structure: &Structure,
    result: &CalculationResult,
    precision: usize,
) -> Result<(), CliError> {
    let lattice = structure
        .lattice
        .as_ref()
        .ok_or_else(|| CliError::UnsupportedOutput {
            format: "CIF".to_string(),
            details: "the input provided no unit cell".to_string(),
        })?;

    let name = if structure.name.is_empty() {
        "structure"
    } else {
        &structure.name
    };
    writeln!(writer, "data_{}", name.replace(char::is_whitespace, "_"))?;
    writeln!(writer, "_symmetry_space_group_name_H-M    'P 1'")?;
    writeln!(writer, "_cell_length_a    {:.*}", precision, lattice.lengths[0])?;
    writeln!(writer, "_cell_length_b    {:.*}", precision, lattice.lengths[1])?;
    writeln!(writer, "_cell_length_c    {:.*}", precision, lattice.lengths[2])?;
    writeln!(writer, "_cell_angle_alpha    {:.*}", precision, lattice.angles[0])?;
    writeln!(writer, "_cell_angle_beta    {:.*}", precision, lattice.angles[1])?;
    writeln!(writer, "_cell_angle_gamma    {:.*}", precision, lattice.angles[2])?;
    writeln!(writer, "loop_")?;
    writeln!(writer, "_atom_site_label")?;
    writeln!(writer, "_atom_site_type_symbol")?;
    writeln!(writer, "_atom_site_fract_x")?;
    writeln!(writer, "_atom_site_fract_y")?;
    writeln!(writer, "_atom_site_fract_z")?;
    writeln!(writer, "_atom_site_charge")?;
    for (atom, &charge) in structure.atoms.iter().zip(result.charges.iter()) {
        let fractional = lattice.cell.to_fractional(atom.position);
        writeln!(
            writer,
            "{} {} {:.*} {:.*} {:.*} {:.*}",
            atom.label,
            atom.symbol,
            precision,
            fractional[0],
            precision,
            fractional[1],
            precision,
            fractional[2],
            precision,
            charge
        )?;
    }
    Ok(())
}

fn write_csv(
    writer: &mut dyn Write,
    structure: &Structure,
    result: &CalculationResult,
    precision: usize,
) -> Result<(), CliError> {
    writeln!(writer, "label,element,x,y,z,charge")?;
    for (atom, &charge) in structure.atoms.iter().zip(result.charges.iter()) {
        writeln!(
            writer,
            "{},{},{:.*},{:.*},{:.*},{:.*}",
            atom.label,
            atom.symbol,
            precision,
            atom.position[0],
            precision,
            atom.position[1],
            precision,
            atom.position[2],
            precision,
            charge
        )?;
    }
    Ok(())
}

fn write_json(
    writer: &mut dyn Write,
    structure: &Structure,
    result: &CalculationResult,
    precision: usize,
    options: &SolverOptions,
) -> Result<(), CliError> {
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"structure\": \"{}\",", structure.name)?;
    writeln!(writer, "  \"method\": \"{}\",", method_name(options.method))?;
    writeln!(writer, "  \"periodic\": {},", structure.lattice.is_some())?;
    writeln!(writer, "  \"atoms\": [")?;
    for (i, (atom, &charge)) in structure
        .atoms
        .iter()
        .zip(result.charges.iter())
        .enumerate()
    {
        let comma = if i < structure.atoms.len() - 1 { "," } else { "" };
        writeln!(writer, "    {{")?;
        writeln!(writer, "      \"label\": \"{}\",", atom.label)?;
        writeln!(writer, "      \"element\": \"{}\",", atom.symbol)?;
        writeln!(
            writer,
            "      \"position\": [{:.*}, {:.*}, {:.*}],",
            precision, atom.position[0], precision, atom.position[1], precision, atom.position[2]
        )?;
        writeln!(writer, "      \"charge\": {:.*}", precision, charge)?;
        writeln!(writer, "    }}{}", comma)?;
    }
    writeln!(writer, "  ],")?;
    writeln!(
        writer,
        "  \"total_charge\": {:.*}",
        precision,
        result.total_charge()
    )?;
    writeln!(writer, "}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUARTZ_CIF: &str = "\
data_quartz
_cell_length_a 4.9137(2)
_cell_length_b 4.9137(2)
_cell_length_c 5.4047(3)
_cell_angle_alpha 90.0
_cell_angle_beta 90.0
_cell_angle_gamma 120.0
loop_
_atom_site_label
_atom_site_type_symbol
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Si1 Si 0.4697 0.0000 0.0000
O1 O 0.4135 0.2669 0.1191
";

    #[test]
    fn test_parse_cif_quartz() {
        let structure = parse_cif(QUARTZ_CIF, "quartz.cif").unwrap();

        assert_eq!(structure.name, "quartz");
        assert_eq!(structure.atoms.len(), 2);
        assert_eq!(structure.atoms[0].label, "Si1");
        assert_eq!(structure.atoms[0].symbol, "Si");
        assert_eq!(structure.atoms[1].symbol, "O");

        let lattice = structure.lattice.unwrap();
        assert!((lattice.lengths[0] - 4.9137).abs() < 1e-12);
        assert!((lattice.angles[2] - 120.0).abs() < 1e-12);

        // The a vector lies along x, so fract_x of the first atom maps onto x directly.
        assert!((structure.atoms[0].position[0] - 0.4697 * 4.9137).abs() < 1e-9);
        assert!(structure.atoms[0].position[1].abs() < 1e-12);
    }

    #[test]
    fn test_parse_cif_symbol_from_label() {
        let text = "\
data_rocksalt
_cell_length_a 5.64
_cell_length_b 5.64
_cell_length_c 5.64
_cell_angle_alpha 90
_cell_angle_beta 90
_cell_angle_gamma 90
loop_
_atom_site_label
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Na1 0.0 0.0 0.0
Cl1 0.5 0.5 0.5
";
        let structure = parse_cif(text, "rocksalt.cif").unwrap();
        assert_eq!(structure.atoms[0].symbol, "Na");
        assert_eq!(structure.atoms[0].label, "Na1");
        assert_eq!(structure.atoms[1].symbol, "Cl");
    }

    #[test]
    fn test_parse_cif_cell_after_atom_loop() {
        let text = "\
data_late_cell
loop_
_atom_site_type_symbol
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Cs 0.0 0.0 0.0
Cl 0.5 0.5 0.5

_cell_length_a 4.11
_cell_length_b 4.11
_cell_length_c 4.11
_cell_angle_alpha 90
_cell_angle_beta 90
_cell_angle_gamma 90
";
        let structure = parse_cif(text, "late.cif").unwrap();
        assert_eq!(structure.atoms.len(), 2);
        // Labels are generated when the loop has no _atom_site_label column.
        assert_eq!(structure.atoms[0].label, "Cs1");
        assert_eq!(structure.atoms[1].label, "Cl2");
    }

    #[test]
    fn test_parse_cif_missing_angle() {
        let text = "\
data_broken
_cell_length_a 4.0
_cell_length_b 4.0
_cell_length_c 4.0
_cell_angle_alpha 90
_cell_angle_beta 90
loop_
_atom_site_type_symbol
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Na 0.0 0.0 0.0
";
        let err = parse_cif(text, "broken.cif").unwrap_err();
        assert!(matches!(err, CliError::CifParse { .. }));
        assert!(err.to_string().contains("_cell_angle_gamma"));
    }

    #[test]
    fn test_parse_cif_no_atoms() {
        let text = "\
data_empty
_cell_length_a 4.0
_cell_length_b 4.0
_cell_length_c 4.0
_cell_angle_alpha 90
_cell_angle_beta 90
_cell_angle_gamma 90
";
        let err = parse_cif(text, "empty.cif").unwrap_err();
        assert!(err.to_string().contains("No atom sites"));
    }

    #[test]
    fn test_parse_xyz_water() {
        let text = "\
3
water molecule
O 0.000 0.000 0.119
H 0.000 0.763 -0.477
H 0.000 -0.763 -0.477
";
        let structure = parse_xyz(text, "water.xyz").unwrap();
        assert_eq!(structure.name, "water molecule");
        assert_eq!(structure.atoms.len(), 3);
        assert!(structure.lattice.is_none());
        assert_eq!(structure.atoms[0].label, "O1");
        assert_eq!(structure.atoms[1].label, "H2");
        assert_eq!(structure.atoms[2].symbol, "H");
    }

    #[test]
    fn test_parse_xyz_atomic_numbers() {
        let text = "\
2
carbon monoxide
6 0.0 0.0 0.0
8 0.0 0.0 1.128
";
        let structure = parse_xyz(text, "co.xyz").unwrap();
        assert_eq!(structure.atoms[0].symbol, "C");
        assert_eq!(structure.atoms[1].symbol, "O");
    }

    #[test]
    fn test_parse_xyz_truncated() {
        let text = "\
3
too short
O 0.0 0.0 0.0
H 0.0 0.0 1.0
";
        let err = parse_xyz(text, "short.xyz").unwrap_err();
        assert!(matches!(err, CliError::XyzParse { .. }));
        assert!(err.to_string().contains("Expected 3 atoms, got 2"));
    }

    #[test]
    fn test_canonical_symbol_forms() {
        assert_eq!(canonical_symbol("Fe"), Some("Fe"));
        assert_eq!(canonical_symbol("FE"), Some("Fe"));
        assert_eq!(canonical_symbol("fe"), Some("Fe"));
        assert_eq!(canonical_symbol("26"), Some("Fe"));
        assert_eq!(canonical_symbol("Fe3+"), Some("Fe"));
        assert_eq!(canonical_symbol("O1"), Some("O"));
        assert_eq!(canonical_symbol("Xx"), None);
        assert_eq!(canonical_symbol("0"), None);
        assert_eq!(canonical_symbol("119"), None);
    }
}
