use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::SpesaError;

const CONFIG_FILE: &str = "spesa.toml";
const DATA_FILE: &str = "expenses.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpesaConfig {
    pub currency: char,
    pub data_file: Option<PathBuf>,
}

impl Default for SpesaConfig {
    fn default() -> Self {
        Self {
            currency: '$',
            data_file: None,
        }
    }
}

impl SpesaConfig {
    /// Reads the config file from the user's config directory.
    /// A missing file is not an error, the app must work on first launch.
    pub fn load() -> Result<Self, SpesaError> {
        let Some(path) = config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, SpesaError> {
        Ok(toml::from_str(raw)?)
    }

    /// Path of the JSON file holding the expense collection.
    pub fn data_file(&self) -> PathBuf {
        if let Some(path) = &self.data_file {
            return path.clone();
        }
        dirs::data_dir()
            .map(|dir| dir.join("spesa"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DATA_FILE)
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("spesa").join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_for_missing_keys() {
        let config = SpesaConfig::parse("").unwrap();
        assert_eq!(config.currency, '$');
        assert!(config.data_file.is_none());
    }

    #[test]
    fn currency_and_data_file_can_be_overridden() {
        let config = SpesaConfig::parse(
            "currency = \"€\"\ndata_file = \"/tmp/expenses.json\"\n",
        )
        .unwrap();
        assert_eq!(config.currency, '€');
        assert_eq!(config.data_file(), PathBuf::from("/tmp/expenses.json"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(SpesaConfig::parse("currency = [").is_err());
    }
}
