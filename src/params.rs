//! This module provides element reference data and utilities for loading it from TOML files.
//!
//! It defines the `ElementData` struct holding the per-element ionization-energy ladder used in
//! charge equilibration, and the `Parameters` struct for managing collections of these entries.
//! The module includes deserialization logic to support flexible key formats (atomic numbers or
//! element symbols) in TOML configuration files, enabling user-friendly parameter specification.

use super::error::EqeqError;
use serde::Deserialize;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Reference energy data for one element.
///
/// The ladder starts with the electron affinity and continues with successive ionization
/// energies, all in electron volts: `energies[0]` is the affinity and `energies[n]` (n ≥ 1)
/// the n-th ionization energy. The charge center selects the oxidation state the
/// electronegativity expansion is centered on; most elements use the neutral state.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ElementData {
    /// The electron affinity followed by successive ionization energies, in electron volts.
    ///
    /// The list stops at the last tabulated value; requesting an energy past the end is an
    /// error rather than an extrapolation.
    pub energies: Vec<f64>,
    /// The oxidation state the element's charge-energy expansion is centered on.
    ///
    /// A center of `c` derives electronegativity and hardness from the energies at indices
    /// `c` and `c + 1`. Defaults to 0 (the neutral atom) when omitted.
    #[serde(rename = "center", default)]
    pub charge_center: usize,
}

impl ElementData {
    /// Returns the tabulated energy at `index`, or `None` past the end of the ladder.
    pub fn energy(&self, index: usize) -> Option<f64> {
        self.energies.get(index).copied()
    }

    /// Derives the electronegativity and hardness for this element's charge center.
    ///
    /// With `c` the charge center, hardness is `E[c + 1] - E[c]` and electronegativity is
    /// `(E[c + 1] + E[c]) / 2 - c * hardness`, which recenters the quadratic charge-energy
    /// expansion on the assumed oxidation state. Both values are in electron volts.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The element symbol, used only for error reporting.
    ///
    /// # Returns
    ///
    /// Returns the `(electronegativity, hardness)` pair on success.
    ///
    /// # Errors
    ///
    /// Returns an `EqeqError::MissingEnergyLevel` if either required energy is not tabulated.
    ///
    /// # Examples
    ///
    /// ```
    /// use eqeq::ElementData;
    ///
    /// let oxygen = ElementData {
    ///     energies: vec![1.46111, 13.618],
    ///     charge_center: 0,
    /// };
    ///
    /// let (chi, j) = oxygen.electronegativity_and_hardness("O").unwrap();
    /// assert!((chi - 7.539555).abs() < 1e-9);
    /// assert!((j - 12.15689).abs() < 1e-9);
    /// ```
    pub fn electronegativity_and_hardness(&self, symbol: &str) -> Result<(f64, f64), EqeqError> {
        let center = self.charge_center;
        let lower = self
            .energy(center)
            .ok_or_else(|| EqeqError::MissingEnergyLevel {
                symbol: symbol.to_string(),
                index: center,
                center,
            })?;
        let upper = self
            .energy(center + 1)
            .ok_or_else(|| EqeqError::MissingEnergyLevel {
                symbol: symbol.to_string(),
                index: center + 1,
                center,
            })?;

        let hardness = upper - lower;
        let electronegativity = 0.5 * (upper + lower) - center as f64 * hardness;
        Ok((electronegativity, hardness))
    }
}

/// A collection of element reference data for multiple elements.
///
/// This struct serves as a container for the element-specific energy ladders required by the
/// charge equilibration solver. Entries are indexed by canonical element symbol for direct
/// lookup during calculations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameters {
    /// A mapping from canonical element symbol to the corresponding reference data.
    ///
    /// The keys are capitalized symbols ("H" for hydrogen, "Fe" for iron, etc.); input files
    /// may also use atomic numbers, which are converted to symbols on load.
    #[serde(deserialize_with = "deserialize_element_map")]
    pub elements: HashMap<String, ElementData>,
}

impl Parameters {
    /// Loads element reference data from a TOML file.
    ///
    /// This method reads the contents of a TOML file and parses it into a `Parameters`
    /// instance. The file should contain an `[elements]` table with element data keyed by
    /// atomic number or element symbol.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the TOML file containing the reference data.
    ///
    /// # Returns
    ///
    /// Returns a `Parameters` instance on success.
    ///
    /// # Errors
    ///
    /// Returns an `EqeqError::IoError` if the file cannot be read, or an
    /// `EqeqError::DeserializationError` if the TOML content is invalid or contains
    /// unrecognized element keys.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use eqeq::Parameters;
    /// use std::path::Path;
    ///
    /// let params = Parameters::load_from_file(Path::new("parameters.toml")).unwrap();
    /// ```
    pub fn load_from_file(path: &Path) -> Result<Self, EqeqError> {
        let content = std::fs::read_to_string(path).map_err(|io_error| EqeqError::IoError {
            path: path.to_path_buf(),
            source: io_error,
        })?;

        Self::load_from_str(&content)
    }

    /// Parses element reference data from a TOML string.
    ///
    /// This method deserializes TOML-formatted reference data into a `Parameters` instance.
    /// The string should contain an `[elements]` table with element data keyed by atomic
    /// number or element symbol.
    ///
    /// # Arguments
    ///
    /// * `toml_str` - A string slice containing valid TOML reference data.
    ///
    /// # Returns
    ///
    /// Returns a `Parameters` instance on success.
    ///
    /// # Errors
    ///
    /// Returns an `EqeqError::DeserializationError` if the TOML content is invalid or
    /// contains unrecognized element keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use eqeq::Parameters;
    ///
    /// let toml_data = r#"
    /// [elements]
    /// "8" = { energies = [1.46111, 13.618, 35.121] }
    /// "Zn" = { energies = [0.0, 9.394, 17.964, 39.722], center = 2 }
    /// "#;
    ///
    /// let params = Parameters::load_from_str(toml_data).unwrap();
    /// assert_eq!(params.elements.len(), 2);
    /// assert!(params.elements.contains_key("O"));
    /// assert!(params.elements.contains_key("Zn"));
    /// ```
    pub fn load_from_str(toml_str: &str) -> Result<Self, EqeqError> {
        toml::from_str(toml_str).map_err(EqeqError::from)
    }

    /// Creates a new empty `Parameters` instance.
    ///
    /// This constructor initializes a `Parameters` struct with an empty elements map. Entries
    /// can be added programmatically or loaded from a file/string.
    ///
    /// # Returns
    ///
    /// Returns a new `Parameters` instance with no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use eqeq::Parameters;
    ///
    /// let params = Parameters::new();
    /// assert_eq!(params.elements.len(), 0);
    /// ```
    pub fn new() -> Self {
        Parameters {
            elements: HashMap::new(),
        }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::new()
    }
}

/// Deserializes a map of element data with flexible key types.
///
/// This function enables TOML deserialization where element keys can be either element symbols
/// or atomic numbers (as strings). Atomic numbers are converted to their canonical symbols for
/// internal storage, so lookups during a calculation always go through symbols.
///
/// # Arguments
///
/// * `deserializer` - The Serde deserializer to use for parsing the map.
///
/// # Returns
///
/// Returns a `HashMap<String, ElementData>` on successful deserialization.
///
/// # Errors
///
/// Returns a deserialization error if the map contains invalid keys or malformed data.
fn deserialize_element_map<'de, D>(
    deserializer: D,
) -> Result<HashMap<String, ElementData>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ElementMapVisitor;

    impl<'de> Visitor<'de> for ElementMapVisitor {
        type Value = HashMap<String, ElementData>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map from element symbol or atomic number to element data")
        }

        fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut elements = HashMap::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, ElementData>()? {
                let symbol = match key.parse::<u8>() {
                    Ok(atomic_number) => element_symbol(atomic_number)
                        .ok_or_else(|| {
                            de::Error::custom(format!("invalid element key: '{}'", key))
                        })?
                        .to_string(),
                    Err(_) => {
                        if element_atomic_number(&key).is_none() {
                            return Err(de::Error::custom(format!(
                                "invalid element key: '{}'",
                                key
                            )));
                        }
                        key
                    }
                };
                elements.insert(symbol, value);
            }
            Ok(elements)
        }
    }

    deserializer.deserialize_map(ElementMapVisitor)
}

/// Canonical element symbols indexed by atomic number minus one, up to Oganesson (118).
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

/// Converts an atomic number to its canonical element symbol.
///
/// # Arguments
///
/// * `atomic_number` - The atomic number to convert (1 to 118).
///
/// # Returns
///
/// Returns `Some(symbol)` if the atomic number is in range, or `None` otherwise.
fn element_symbol(atomic_number: u8) -> Option<&'static str> {
    if atomic_number == 0 {
        return None;
    }
    ELEMENT_SYMBOLS.get(atomic_number as usize - 1).copied()
}

/// Converts a canonical element symbol (case-sensitive) to its atomic number.
///
/// # Arguments
///
/// * `symbol` - The element symbol to convert (e.g., "H", "C", "Fe").
///
/// # Returns
///
/// Returns `Some(atomic_number)` if the symbol is recognized, or `None` if invalid.
fn element_atomic_number(symbol: &str) -> Option<u8> {
    ELEMENT_SYMBOLS
        .iter()
        .position(|&candidate| candidate == symbol)
        .map(|index| (index + 1) as u8)
}
