use fg_shared::errors::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options of the transform. Every key is optional in JSON:
///
/// ```json
/// { "angleFallback": true, "skipMultiColor": false, "skipWarnings": false }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TransformOptions {
    /// Insert a filter even when the direction of the gradient had to be approximated
    pub angle_fallback: bool,
    /// Leave gradients with more than two color stops alone
    pub skip_multi_color: bool,
    /// Do not report any diagnostics
    pub skip_warnings: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            angle_fallback: true,
            skip_multi_color: false,
            skip_warnings: false,
        }
    }
}

impl TransformOptions {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = TransformOptions::default();
        assert!(options.angle_fallback);
        assert!(!options.skip_multi_color);
        assert!(!options.skip_warnings);

        assert_eq!(TransformOptions::from_json("{}").ok(), Some(options));
    }

    #[test]
    fn camel_case_keys() {
        let options = TransformOptions::from_json(r#"{"angleFallback": false, "skipWarnings": true}"#);
        assert_eq!(
            options.ok(),
            Some(TransformOptions {
                angle_fallback: false,
                skip_multi_color: false,
                skip_warnings: true,
            })
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let options = TransformOptions::from_json(r#"{"skip_warnings": true}"#);
        assert!(matches!(options, Err(Error::Json(_))));
    }

    #[test]
    fn missing_file() {
        let options = TransformOptions::from_file("/nonexistent/filter-gradient.json");
        assert!(matches!(options, Err(Error::IO(_))));
    }
}
