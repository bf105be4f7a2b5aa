use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty file path, empty variant list, etc.).
    ConfigValidation(String),
    /// A required logical column cannot be resolved from the header variants.
    /// Fatal for that input; date and amount cell anomalies are not errors.
    MissingColumn { source: String, field: String },
    /// IO error (file read, malformed CSV, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { source, field } => {
                write!(f, "input '{source}': no column matches required field '{field}'")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
