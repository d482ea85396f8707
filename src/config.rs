use std::path::Path;

use serde::Deserialize;

use crate::error::AnnotationError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Smallest duration, in seconds, any phone or word may be edited down to.
    pub min_phone_duration: f64,
    /// Time grid, in seconds, every edited boundary is snapped onto.
    pub second_step: f64,
    /// Number of words shown on each side of the focus word.
    pub word_margin: usize,
    pub fade_in: f64,
    pub fade_out: f64,
    /// Fail the load instead of dropping phones that no word contains.
    pub strict_containment: bool,
}

impl EditorConfig {
    pub const DEFAULT_MIN_PHONE_DURATION: f64 = 0.01;
    pub const DEFAULT_SECOND_STEP: f64 = 0.01;
    pub const DEFAULT_WORD_MARGIN: usize = 1;
    pub const DEFAULT_FADE_SECONDS: f64 = 0.025;

    pub fn load(path: &Path) -> Result<Self, AnnotationError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| AnnotationError::io("read editor config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| AnnotationError::json("parse editor config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnnotationError> {
        if !(self.second_step.is_finite() && self.second_step > 0.0) {
            return Err(AnnotationError::invalid_config(format!(
                "second_step must be a positive number, got {}",
                self.second_step
            )));
        }
        if !(self.min_phone_duration.is_finite() && self.min_phone_duration > 0.0) {
            return Err(AnnotationError::invalid_config(format!(
                "min_phone_duration must be a positive number, got {}",
                self.min_phone_duration
            )));
        }
        for (name, value) in [("fade_in", self.fade_in), ("fade_out", self.fade_out)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(AnnotationError::invalid_config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_phone_duration: Self::DEFAULT_MIN_PHONE_DURATION,
            second_step: Self::DEFAULT_SECOND_STEP,
            word_margin: Self::DEFAULT_WORD_MARGIN,
            fade_in: Self::DEFAULT_FADE_SECONDS,
            fade_out: Self::DEFAULT_FADE_SECONDS,
            strict_containment: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_config_default() {
        let config = EditorConfig::default();
        assert_eq!(config.min_phone_duration, 0.01);
        assert_eq!(config.second_step, 0.01);
        assert_eq!(config.word_margin, 1);
        assert_eq!(config.fade_in, 0.025);
        assert_eq!(config.fade_out, 0.025);
        assert!(!config.strict_containment);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_takes_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "word_margin": 2, "fade_in": 0.05 }"#).expect("valid json");
        assert_eq!(config.word_margin, 2);
        assert_eq!(config.fade_in, 0.05);
        assert_eq!(config.fade_out, EditorConfig::DEFAULT_FADE_SECONDS);
        assert_eq!(config.second_step, EditorConfig::DEFAULT_SECOND_STEP);
    }

    #[test]
    fn validate_rejects_zero_step() {
        let config = EditorConfig {
            second_step: 0.0,
            ..EditorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AnnotationError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn validate_rejects_negative_fade() {
        let config = EditorConfig {
            fade_out: -0.1,
            ..EditorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reads_and_validates_file() {
        let path = std::env::temp_dir().join("textgrid_editor_config_load.json");
        std::fs::write(&path, r#"{ "min_phone_duration": 0.02, "strict_containment": true }"#)
            .expect("write config");
        let config = EditorConfig::load(&path).expect("load should succeed");
        assert_eq!(config.min_phone_duration, 0.02);
        assert!(config.strict_containment);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_fails_on_missing_file() {
        let result = EditorConfig::load(Path::new("/nonexistent/editor.json"));
        assert!(matches!(result, Err(AnnotationError::Io { .. })));
    }
}
