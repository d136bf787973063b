//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use cairn_voxel::BlockColor;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Largest accepted `chunk.dimension`.
pub const MAX_CHUNK_DIMENSION: usize = 128;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Chunk generation settings.
    pub chunk: ChunkConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Chunk generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChunkConfig {
    /// Cells per axis of every chunk grid.
    pub dimension: usize,
    /// Edge length of one cell in world units.
    pub unit_length: f32,
    /// Colour assigned to generated blocks.
    pub color: BlockColor,
    /// Number of chunks to create.
    pub chunk_count: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for the JSON log file. `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            dimension: 5,
            unit_length: 1.0,
            color: BlockColor::GREEN,
            chunk_count: 1,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

/// Platform config directory for Cairn, e.g. `~/.config/cairn` on Linux.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cairn"))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Checks values that would make chunk generation meaningless.
    ///
    /// A zero dimension is allowed and yields empty chunks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dimension = self.chunk.dimension;
        if dimension > MAX_CHUNK_DIMENSION {
            return Err(ConfigError::InvalidValue {
                field: "chunk.dimension",
                reason: format!("must be at most {MAX_CHUNK_DIMENSION}, got {dimension}"),
            });
        }
        let unit = self.chunk.unit_length;
        if !unit.is_finite() || unit <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "chunk.unit_length",
                reason: format!("must be a positive number, got {unit}"),
            });
        }
        if self.debug.log_level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "debug.log_level",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("dimension: 5"));
        assert!(ron_str.contains("chunk_count: 1"));
        assert!(ron_str.contains("log_level: \"info\""));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.debug.log_dir = Some(PathBuf::from("/tmp/cairn-logs"));
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(chunk: (dimension: 3))").unwrap();
        assert_eq!(config.chunk.dimension, 3);
        assert_eq!(config.chunk.unit_length, 1.0);
        assert_eq!(config.chunk.color, BlockColor::GREEN);
        assert_eq!(config.debug, DebugConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.chunk.dimension = 8;
        config.chunk.unit_length = 0.5;
        config.chunk.color = BlockColor::new(0.2, 0.4, 0.6, 1.0);

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("cairn");

        let config = Config::load_or_create(&nested).unwrap();

        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.chunk.chunk_count = 4;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().chunk.chunk_count, 4);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_file_produces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();

        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validate_rejects_bad_unit_length() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.chunk.unit_length = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "chunk.unit_length",
                ..
            })
        ));

        config.chunk.unit_length = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_dimension() {
        let mut config = Config::default();
        config.chunk.dimension = MAX_CHUNK_DIMENSION;
        assert!(config.validate().is_ok());

        config.chunk.dimension = usize::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "chunk.dimension",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_allows_zero_dimension() {
        let mut config = Config::default();
        config.chunk.dimension = 0;
        assert!(config.validate().is_ok());
    }
}
