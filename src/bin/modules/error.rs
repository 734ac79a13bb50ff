use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Errors originating from the core eqeq library calculations.
    #[error("Calculation error: {0}")]
    Calculation(#[from] eqeq::EqeqError),

    /// I/O errors associated with a specific file path.
    #[error("I/O error for '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// General I/O errors not tied to a specific file.
    #[error("I/O error: {0}")]
    GenericIo(#[from] std::io::Error),

    /// Errors parsing CIF format input.
    #[error("Failed to parse CIF from {source_name}: {details}")]
    CifParse {
        source_name: String,
        details: String,
    },

    /// Errors parsing XYZ format input.
    #[error("Failed to parse XYZ from {source_name}: {details}")]
    XyzParse {
        source_name: String,
        details: String,
    },

    /// Errors parsing custom parameter TOML files.
    #[error("Failed to parse parameters TOML: {0}")]
    ParamsParse(#[from] toml::de::Error),

    /// The requested output format cannot represent the structure.
    #[error("Cannot write {format} output: {details}")]
    UnsupportedOutput {
        format: String,
        details: String,
    },
}
