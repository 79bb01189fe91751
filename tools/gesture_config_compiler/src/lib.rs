//! Compiles `config/gestures.toml` into the `GESTURE_ENGINE_CONFIG` constant
//! consumed by the firmware's gesture engine.

use std::{fmt, fs, path::Path};

use serde::Deserialize;

/// Upper bound for `sampling.batch_size`; matches the engine's batch capacity.
pub const MAX_BATCH_SIZE: u16 = 32;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GesturesFile {
    pub classifier: ClassifierSection,
    pub timers: TimerSection,
    pub sampling: SamplingSection,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClassifierSection {
    pub default_sensitivity: i32,
    pub sensitivity_step: i32,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TimerSection {
    pub rearm_ms: u64,
    pub inactivity_ms: u64,
    pub alert_display_ms: u64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SamplingSection {
    pub batch_size: u16,
    pub sample_rate_hz: u32,
}

#[derive(Debug)]
pub enum ConfigCompilerError {
    Io(String),
    Parse(String),
    Validation(String),
}

impl fmt::Display for ConfigCompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigCompilerError {}

pub fn parse_gestures_file(path: &Path) -> Result<GesturesFile, ConfigCompilerError> {
    let text = fs::read_to_string(path)
        .map_err(|e| ConfigCompilerError::Io(format!("{}: {e}", path.display())))?;
    parse_gestures_str(&text)
}

pub fn parse_gestures_str(text: &str) -> Result<GesturesFile, ConfigCompilerError> {
    toml::from_str(text).map_err(|e| ConfigCompilerError::Parse(e.to_string()))
}

pub fn validate_config(config: &GesturesFile) -> Result<(), ConfigCompilerError> {
    let invalid = |msg: &str| Err(ConfigCompilerError::Validation(msg.to_string()));

    if config.classifier.sensitivity_step <= 0 {
        return invalid("classifier.sensitivity_step must be > 0");
    }
    if config.timers.rearm_ms == 0 {
        return invalid("timers.rearm_ms must be > 0");
    }
    if config.timers.inactivity_ms == 0 {
        return invalid("timers.inactivity_ms must be > 0");
    }
    if config.timers.alert_display_ms == 0 {
        return invalid("timers.alert_display_ms must be > 0");
    }
    if config.timers.alert_display_ms >= config.timers.inactivity_ms {
        return invalid("timers.alert_display_ms must be < timers.inactivity_ms");
    }
    if config.sampling.batch_size == 0 || config.sampling.batch_size > MAX_BATCH_SIZE {
        return Err(ConfigCompilerError::Validation(format!(
            "sampling.batch_size must be within 1..={MAX_BATCH_SIZE}"
        )));
    }
    if config.sampling.sample_rate_hz == 0 {
        return invalid("sampling.sample_rate_hz must be > 0");
    }
    Ok(())
}

pub fn render_generated_config(config: &GesturesFile) -> String {
    format!(
        "// @generated by gesture_config_compiler from config/gestures.toml. Do not edit.
pub const GESTURE_ENGINE_CONFIG: GestureEngineConfig = GestureEngineConfig {{
    classifier: ClassifierConfig {{
        default_sensitivity: {default_sensitivity},
        sensitivity_step: {sensitivity_step},
    }},
    timers: TimerConfig {{
        rearm_ms: {rearm_ms},
        inactivity_ms: {inactivity_ms},
        alert_display_ms: {alert_display_ms},
    }},
    sampling: SamplingConfig {{
        batch_size: {batch_size},
        sample_rate_hz: {sample_rate_hz},
    }},
}};
",
        default_sensitivity = config.classifier.default_sensitivity,
        sensitivity_step = config.classifier.sensitivity_step,
        rearm_ms = config.timers.rearm_ms,
        inactivity_ms = config.timers.inactivity_ms,
        alert_display_ms = config.timers.alert_display_ms,
        batch_size = config.sampling.batch_size,
        sample_rate_hz = config.sampling.sample_rate_hz,
    )
}

pub fn generate_from_path(path: &Path) -> Result<String, ConfigCompilerError> {
    let config = parse_gestures_file(path)?;
    validate_config(&config)?;
    Ok(render_generated_config(&config))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_TOML: &str = "\
[classifier]
default_sensitivity = 980
sensitivity_step = 25

[timers]
rearm_ms = 2500
inactivity_ms = 15000
alert_display_ms = 3000

[sampling]
batch_size = 5
sample_rate_hz = 25
";

    #[test]
    fn parses_all_sections() {
        let config = parse_gestures_str(DEFAULT_TOML).expect("default toml should parse");
        assert_eq!(config.classifier.default_sensitivity, 980);
        assert_eq!(config.classifier.sensitivity_step, 25);
        assert_eq!(config.timers.rearm_ms, 2_500);
        assert_eq!(config.timers.inactivity_ms, 15_000);
        assert_eq!(config.timers.alert_display_ms, 3_000);
        assert_eq!(config.sampling.batch_size, 5);
        assert_eq!(config.sampling.sample_rate_hz, 25);
        validate_config(&config).expect("default toml should validate");
    }

    #[test]
    fn negative_default_sensitivity_is_accepted() {
        let text = DEFAULT_TOML.replace("default_sensitivity = 980", "default_sensitivity = -40");
        let config = parse_gestures_str(&text).expect("should parse");
        validate_config(&config).expect("thresholds are unbounded");
        assert!(render_generated_config(&config).contains("default_sensitivity: -40,"));
    }

    #[test]
    fn batch_size_upper_bound_is_inclusive() {
        let text = DEFAULT_TOML.replace("batch_size = 5", "batch_size = 32");
        let config = parse_gestures_str(&text).expect("should parse");
        assert!(validate_config(&config).is_ok());

        let text = DEFAULT_TOML.replace("batch_size = 5", "batch_size = 33");
        let config = parse_gestures_str(&text).expect("should parse");
        assert!(matches!(
            validate_config(&config),
            Err(ConfigCompilerError::Validation(_))
        ));
    }
}
