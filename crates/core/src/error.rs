//! Error types for the particle field core.

use thiserror::Error;

/// Errors produced while configuring or exporting a particle field.
///
/// Frame stepping itself never fails: an unavailable surface is reported
/// as a [`FrameOutcome`](crate::animation::FrameOutcome), not as an error.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Width or height was zero (or overflowed) where a non-empty surface is required.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// No built-in palette has the requested name.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// A configuration value was outside its valid range.
    #[error("invalid config value for '{name}': {reason}")]
    InvalidConfig { name: String, reason: String },

    /// Writing an exported frame failed.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = FieldError::InvalidDimensions.to_string();
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn unknown_palette_includes_name() {
        let msg = FieldError::UnknownPalette("sunset".into()).to_string();
        assert!(msg.contains("sunset"), "missing palette name in: {msg}");
    }

    #[test]
    fn invalid_config_includes_name_and_reason() {
        let err = FieldError::InvalidConfig {
            name: "density".into(),
            reason: "must be positive".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("density"), "missing name in: {msg}");
        assert!(msg.contains("must be positive"), "missing reason in: {msg}");
    }

    #[test]
    fn invalid_color_includes_message() {
        let msg = FieldError::InvalidColor("bad hex".into()).to_string();
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn field_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldError>();
    }
}
