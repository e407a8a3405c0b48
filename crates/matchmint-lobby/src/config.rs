use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming a lobby config file.
pub const CONFIG_ENV_VAR: &str = "MATCHMINT_LOBBY_CONFIG";

/// Config file read when the environment variable is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/lobby.toml";

/// Lobby configuration, loaded from `lobby.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LobbyConfig {
    /// Length of generated match ids.
    pub match_id_length: usize,
    /// Maximum number of matches held at once.
    pub max_matches: usize,
    /// Largest seat count a single match may ask for.
    pub max_players_per_match: u32,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            match_id_length: 11,
            max_matches: 10_000,
            max_players_per_match: 16,
        }
    }
}

impl LobbyConfig {
    /// Load from `$MATCHMINT_LOBBY_CONFIG`, then `config/lobby.toml`, falling
    /// back to defaults. Unreadable or invalid files are logged and skipped.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            match Self::from_file(&path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(path = %path, error = %e, "Ignoring lobby config"),
            }
        }
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            match Self::from_file(DEFAULT_CONFIG_PATH) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = DEFAULT_CONFIG_PATH, error = %e, "Ignoring lobby config");
                },
            }
        }
        Self::default()
    }

    /// Read and validate a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.match_id_length == 0 {
            return Err(ConfigError::Zero("match_id_length"));
        }
        if self.max_matches == 0 {
            return Err(ConfigError::Zero("max_matches"));
        }
        if self.max_players_per_match == 0 {
            return Err(ConfigError::Zero("max_players_per_match"));
        }
        if self.match_id_length < 6 {
            tracing::warn!(
                match_id_length = self.match_id_length,
                "Short match ids are easy to guess"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(LobbyConfig::from_toml_str("").unwrap(), LobbyConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let config = LobbyConfig::from_toml_str("max_matches = 3").unwrap();
        assert_eq!(config.max_matches, 3);
        assert_eq!(config.match_id_length, 11);
    }

    #[test]
    fn zero_values_are_rejected() {
        let err = LobbyConfig::from_toml_str("max_matches = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Zero("max_matches")));
        let err = LobbyConfig::from_toml_str("match_id_length = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Zero("match_id_length")));
        let err = LobbyConfig::from_toml_str("max_players_per_match = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Zero("max_players_per_match")));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = LobbyConfig::from_toml_str("max_matches = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = LobbyConfig::from_file("/nonexistent/matchmint/lobby.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/matchmint/lobby.toml"));
    }

    #[test]
    fn from_file_reads_toml() {
        let path = std::env::temp_dir()
            .join(format!("matchmint-lobby-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "match_id_length = 8\nmax_matches = 50\nmax_players_per_match = 4\n",
        )
        .unwrap();
        let config = LobbyConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(
            config,
            LobbyConfig {
                match_id_length: 8,
                max_matches: 50,
                max_players_per_match: 4,
            }
        );
    }
}
