//! Sweep configuration.
//!
//! A sweep is read from a YAML or JSON file (picked by extension), then
//! `QECLAB_*` environment variables are layered on top. Command-line flags
//! are applied last, by the caller.

use std::path::Path;

use serde::{Deserialize, Serialize};

use qeclab_codes::{CodeKind, LogicalBit};

/// Environment variable overriding [`SweepConfig::shots`].
pub const ENV_SHOTS: &str = "QECLAB_SHOTS";
/// Environment variable overriding [`SweepConfig::seed`].
pub const ENV_SEED: &str = "QECLAB_SEED";
/// Environment variable overriding [`SweepConfig::engine`].
pub const ENV_ENGINE: &str = "QECLAB_ENGINE";
/// Environment variable overriding [`SweepConfig::noise`].
pub const ENV_NOISE: &str = "QECLAB_NOISE";

/// Everything needed to run one code sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Code to sweep.
    #[serde(default = "default_code")]
    pub code: CodeKind,

    /// Noise type name, looked up in the noise registry.
    #[serde(default = "default_noise")]
    pub noise: String,

    /// Strengths to visit, in order.
    #[serde(default = "default_ps")]
    pub ps: Vec<f64>,

    /// Shots per strength.
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Encoded basis state, `"0"` or `"1"`.
    #[serde(default)]
    pub logical_bit: LogicalBit,

    /// Engine name, looked up in the backend registry.
    #[serde(default = "default_engine")]
    pub engine: String,

    /// Fixed engine seed; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Also run the unencoded single-qubit baseline.
    #[serde(default)]
    pub baseline: bool,
}

fn default_code() -> CodeKind {
    CodeKind::Repetition
}

fn default_noise() -> String {
    "bit_flip".to_string()
}

fn default_ps() -> Vec<f64> {
    vec![0.001, 0.005, 0.01, 0.02, 0.05]
}

fn default_shots() -> u32 {
    4096
}

fn default_engine() -> String {
    "stabilizer".to_string()
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            code: default_code(),
            noise: default_noise(),
            ps: default_ps(),
            shots: default_shots(),
            logical_bit: LogicalBit::default(),
            engine: default_engine(),
            seed: None,
            baseline: false,
        }
    }
}

impl SweepConfig {
    /// Load configuration from a `.yaml`, `.yml` or `.json` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let config: SweepConfig = match extension.as_deref() {
            Some("json") => serde_json::from_str(&contents)
                .map_err(|e| ConfigError::Parse(e.to_string()))?,
            Some("yaml" | "yml") => serde_yaml_ng::from_str(&contents)
                .map_err(|e| ConfigError::Parse(e.to_string()))?,
            _ => {
                return Err(ConfigError::Parse(format!(
                    "Unsupported config format: {} (expected .yaml, .yml or .json)",
                    path.display()
                )));
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        SweepConfig::default().merge_env()
    }

    /// File (or defaults), then environment, then validation.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => SweepConfig::default(),
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Overlay the `QECLAB_*` variables that are set. Numbers that fail to
    /// parse leave the current value alone.
    #[must_use]
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// [`merge_env`](Self::merge_env) over any lookup function.
    #[must_use]
    pub fn merge_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = var(ENV_SHOTS) {
            if let Ok(val) = v.trim().parse() {
                self.shots = val;
            }
        }
        if let Some(v) = var(ENV_SEED) {
            if let Ok(val) = v.trim().parse() {
                self.seed = Some(val);
            }
        }
        if let Some(v) = var(ENV_ENGINE) {
            self.engine = v;
        }
        if let Some(v) = var(ENV_NOISE) {
            self.noise = v;
        }
        self
    }

    /// Shape checks only. Strength ranges depend on the noise type and
    /// are checked by its builder when the sweep starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ps.is_empty() {
            return Err(ConfigError::Invalid(
                "ps must contain at least one strength".to_string(),
            ));
        }
        if self.shots == 0 {
            return Err(ConfigError::Invalid(
                "shots must be greater than 0".to_string(),
            ));
        }
        if self.noise.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "noise must not be empty".to_string(),
            ));
        }
        if self.engine.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "engine must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Why a sweep configuration could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = SweepConfig::default();
        assert_eq!(config.code, CodeKind::Repetition);
        assert_eq!(config.noise, "bit_flip");
        assert_eq!(config.ps, vec![0.001, 0.005, 0.01, 0.02, 0.05]);
        assert_eq!(config.shots, 4096);
        assert_eq!(config.logical_bit, LogicalBit::Zero);
        assert_eq!(config.engine, "stabilizer");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_file() {
        let file = write_temp(
            ".yaml",
            "code: steane\nnoise: depolarizing\nps: [0.01, 0.02]\nlogical_bit: \"1\"\nseed: 9\n",
        );
        let config = SweepConfig::from_file(file.path()).unwrap();
        assert_eq!(config.code, CodeKind::Steane);
        assert_eq!(config.noise, "depolarizing");
        assert_eq!(config.ps, vec![0.01, 0.02]);
        assert_eq!(config.logical_bit, LogicalBit::One);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.shots, 4096);
    }

    #[test]
    fn test_json_file() {
        let file = write_temp(".json", r#"{"code": "surface", "shots": 128, "baseline": true}"#);
        let config = SweepConfig::from_file(file.path()).unwrap();
        assert_eq!(config.code, CodeKind::Surface);
        assert_eq!(config.shots, 128);
        assert!(config.baseline);
    }

    #[test]
    fn test_unknown_extension_and_bad_contents() {
        let file = write_temp(".toml", "code = 'shor'");
        assert!(matches!(
            SweepConfig::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));

        let file = write_temp(".yaml", "code: toric\n");
        assert!(matches!(
            SweepConfig::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));

        assert!(matches!(
            SweepConfig::from_file("/nonexistent/qeclab.yaml"),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_file_values_are_validated() {
        let file = write_temp(".yaml", "ps: []\n");
        assert!(matches!(
            SweepConfig::from_file(file.path()),
            Err(ConfigError::Invalid(_))
        ));

        // Out-of-range strengths are left to the noise builders.
        let file = write_temp(".yaml", "ps: [0.1, 1.5]\n");
        assert_eq!(SweepConfig::from_file(file.path()).unwrap().ps, vec![0.1, 1.5]);
    }

    #[test]
    fn test_merge_vars() {
        let config = SweepConfig::default().merge_vars(|key| match key {
            ENV_SHOTS => Some("512".to_string()),
            ENV_SEED => Some("not-a-number".to_string()),
            ENV_ENGINE => Some("statevector".to_string()),
            _ => None,
        });
        assert_eq!(config.shots, 512);
        assert_eq!(config.seed, None);
        assert_eq!(config.engine, "statevector");
        assert_eq!(config.noise, "bit_flip");
    }

    #[test]
    fn test_validate_rejects() {
        let mut config = SweepConfig::default();
        config.ps.clear();
        assert!(config.validate().is_err());

        let mut config = SweepConfig::default();
        config.shots = 0;
        assert!(config.validate().is_err());
    }
}
