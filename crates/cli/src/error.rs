//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: field error (bad dimensions, bad config)
//! - 11: I/O error (reading a scene, writing the PNG)
//! - 12: input error (bad palette, bad JSON params, bad color)
//! - 13: serialization error

use particle_field_core::FieldError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    /// A field-level error (bad dimensions, invalid config values).
    Field(FieldError),
    /// An I/O error (reading a scene file, writing the PNG).
    Io(String),
    /// A user input error (unknown palette, bad JSON params, bad color).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Field(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Field(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<FieldError> for CliError {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::Io(msg) => CliError::Io(msg),
            FieldError::UnknownPalette(_) | FieldError::InvalidColor(_) => {
                CliError::Input(e.to_string())
            }
            other => CliError::Field(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            CliError::Field(FieldError::InvalidDimensions).exit_code(),
            CliError::Io("disk".into()).exit_code(),
            CliError::Input("palette".into()).exit_code(),
            CliError::Serialization("json".into()).exit_code(),
        ];
        assert_eq!(codes, [10, 11, 12, 13]);
    }

    #[test]
    fn from_field_error_io_routes_to_cli_io() {
        let err = CliError::from(FieldError::Io("disk full".into()));
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn from_unknown_palette_routes_to_input() {
        let err = CliError::from(FieldError::UnknownPalette("plaid".into()));
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("plaid"));
    }

    #[test]
    fn from_invalid_config_routes_to_field() {
        let err = CliError::from(FieldError::InvalidConfig {
            name: "density".into(),
            reason: "must be a positive number".into(),
        });
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("density"));
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        assert_eq!(CliError::from(bad).exit_code(), 13);
    }
}
