//! Loading wing parameters from JSON files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::errors::ConfigError;
use crate::parameters::WingParameters;

/// Parse wing parameters from JSON text without validating them.
///
/// Missing fields take the reference wing values.
///
/// # Errors
///
/// Returns the [`serde_json::Error`] for malformed JSON or unknown fields.
///
/// # Examples
/// ```
/// use planform::config::parse_parameters;
///
/// let parameters = parse_parameters(r#"{ "area": 120.0, "quarter_chord_sweep": 30.0 }"#).unwrap();
/// assert_eq!(parameters.area, 120.0);
/// assert_eq!(parameters.aspect_ratio, 9.0);
/// ```
pub fn parse_parameters(text: &str) -> Result<WingParameters, serde_json::Error> {
    serde_json::from_str(text)
}

/// Read, parse and validate wing parameters from a JSON file.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] when the file cannot be read,
/// [`ConfigError::Parse`] when it is not a valid parameter document and
/// [`ConfigError::Invalid`] when the parameters fail validation.
pub fn load_parameters(path: &Path) -> Result<WingParameters, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parameters = parse_parameters(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    parameters
        .validate()
        .map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), "loaded wing parameters");
    Ok(parameters)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::errors::ParameterError;
    use crate::parameters::{ControlSurface, SparLayout, TaperRule};

    fn write_config(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temporary file");
        file.write_all(text.as_bytes()).expect("config written");
        file
    }

    #[test]
    fn loads_full_configuration() {
        let file = write_config(
            r#"{
                "aspect_ratio": 9.5,
                "area": 122.4,
                "quarter_chord_sweep": 25.0,
                "taper_ratio": 0.24,
                "spars": { "front": 0.15, "aft": 0.65 },
                "aileron": { "inboard": 0.75, "outboard": 0.97, "chord_fraction": 0.3 },
                "flap": { "inboard": 0.12, "outboard": 0.7, "chord_fraction": 0.32 }
            }"#,
        );
        let parameters = load_parameters(file.path()).expect("configuration loads");
        assert_eq!(parameters.taper, TaperRule::Explicit(0.24));
        assert_eq!(parameters.spars, Some(SparLayout::new(0.15, 0.65)));
        assert_eq!(parameters.aileron, Some(ControlSurface::new(0.75, 0.97, 0.3)));
        assert_eq!(parameters.flap, Some(ControlSurface::new(0.12, 0.7, 0.32)));
    }

    #[test]
    fn null_taper_selects_correlation() {
        let parameters = parse_parameters(r#"{ "taper_ratio": null }"#).expect("parses");
        assert_eq!(parameters.taper, TaperRule::SweepCorrelation);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let error = load_parameters(&dir.path().join("absent.json")).expect_err("missing file");
        assert!(matches!(error, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_json_is_reported() {
        let file = write_config("{ aspect_ratio: 9 }");
        let error = load_parameters(file.path()).expect_err("malformed json");
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn invalid_values_are_reported() {
        let file = write_config(r#"{ "quarter_chord_sweep": 95.0 }"#);
        let error = load_parameters(file.path()).expect_err("sweep out of range");
        assert!(matches!(
            error,
            ConfigError::Invalid {
                source: ParameterError::SweepOutOfRange(_),
                ..
            }
        ));
    }
}
