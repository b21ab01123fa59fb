use crate::{
    classify::UnmappedPolicy,
    constants::{DEFAULT_OUTPUT_DIR, DEFAULT_RESOLUTION, ENV_OUTPUT_DIR},
    error::{Result, SlopeError},
    geometry::BridgeParams,
};
use clap::ValueEnum;
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    env,
    path::{Path, PathBuf},
};

/// Top-level settings: bridge parameters, raster and output
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub bridge: BridgeParams,
    pub raster: RasterConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RasterConfig {
    /// Fine cells per block along each axis. The tile table is defined for 2.
    pub resolution: usize,
    pub unmapped: UnmappedPolicy,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            unmapped: UnmappedPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    None,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub format: ExportFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: ExportFormat::default(),
        }
    }
}

impl Config {
    /// Load and validate a TOML settings file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SlopeError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            SlopeError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Override the output directory from `BRIDGE_SLOPE_OUTPUT_DIR`
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(output_dir) = env::var(ENV_OUTPUT_DIR)
            && !output_dir.trim().is_empty()
        {
            let path = PathBuf::from(output_dir);

            if path.exists() && !path.is_dir() {
                return Err(SlopeError::Config(format!(
                    "Output path is not a directory: {}",
                    path.display()
                )));
            }
            self.output.dir = path;
        }
        Ok(())
    }

    /// Check resolution and bridge parameters
    pub fn validate(&self) -> Result<()> {
        if self.raster.resolution == 0 {
            return Err(SlopeError::InvalidResolution(self.raster.resolution));
        }
        if self.raster.resolution != DEFAULT_RESOLUTION {
            warn!(
                "resolution {} has no tile patterns beyond the empty cell (only {} is mapped)",
                self.raster.resolution, DEFAULT_RESOLUTION
            );
        }

        self.bridge.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("bridge.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bridge, BridgeParams::new(20.0, 0.0, 2.0));
        assert_eq!(config.raster.resolution, 2);
        assert_eq!(config.raster.unmapped, UnmappedPolicy::Empty);
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(config.output.format, ExportFormat::Csv);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[bridge]
distance = 12.0
slope = -3.0
sag = 1.5

[raster]
unmapped = "error"

[output]
dir = "tiles"
format = "json"
"#,
        );

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.bridge, BridgeParams::new(12.0, -3.0, 1.5));
        assert_eq!(config.raster.resolution, 2);
        assert_eq!(config.raster.unmapped, UnmappedPolicy::Error);
        assert_eq!(config.output.dir, PathBuf::from("tiles"));
        assert_eq!(config.output.format, ExportFormat::Json);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[output]\nformat = \"none\"\n");

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.bridge, BridgeParams::default());
        assert_eq!(config.output.format, ExportFormat::None);
    }

    #[test]
    fn test_load_rejects_invalid_span() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[bridge]\ndistance = 0.0\noffset = 0.0\nsag = 2.0\n");

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, SlopeError::InvalidSpan { .. }));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[bridge\ndistance = ");

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, SlopeError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load_from_file(Path::new("no_such_config.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_validate_zero_resolution() {
        let mut config = Config::default();
        config.raster.resolution = 0;
        assert!(matches!(
            config.validate(),
            Err(SlopeError::InvalidResolution(0))
        ));
    }

    // single test: env vars are process-wide and tests run in parallel
    #[test]
    fn test_apply_env_output_dir() {
        let orig = env::var(ENV_OUTPUT_DIR).ok();
        let temp_dir = TempDir::new().unwrap();

        unsafe {
            env::set_var(ENV_OUTPUT_DIR, temp_dir.path());
        }
        let mut config = Config::default();
        config.apply_env().unwrap();
        assert_eq!(config.output.dir, temp_dir.path().to_path_buf());

        // whitespace keeps the configured directory
        unsafe {
            env::set_var(ENV_OUTPUT_DIR, "   ");
        }
        let mut config = Config::default();
        config.apply_env().unwrap();
        assert_eq!(config.output.dir, PathBuf::from("out"));

        // an existing file is rejected
        let file_path = temp_dir.path().join("not_a_dir.txt");
        fs::write(&file_path, "x").unwrap();
        unsafe {
            env::set_var(ENV_OUTPUT_DIR, &file_path);
        }
        let mut config = Config::default();
        assert!(matches!(config.apply_env(), Err(SlopeError::Config(_))));

        unsafe {
            env::remove_var(ENV_OUTPUT_DIR);
            if let Some(value) = orig {
                env::set_var(ENV_OUTPUT_DIR, value);
            }
        }
    }
}
