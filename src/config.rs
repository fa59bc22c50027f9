use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Title printed at the top of every exported quote
    pub quote_title: String,
    pub currency_symbol: String,
    /// Where "Download PDF" writes; relative paths resolve against the
    /// working directory
    pub export_dir: PathBuf,
    pub pdf_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quote_title: "GVWS Sales Quote".to_string(),
            currency_symbol: "$".to_string(),
            export_dir: PathBuf::from("."),
            pdf_file_name: "gvws-quote.pdf".to_string(),
        }
    }
}

impl Config {
    /// `$HOME/.quote-ledger`, used when no home is given on the command line
    pub fn default_home() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".quote-ledger"))
    }

    fn config_path(home: &Path) -> PathBuf {
        home.join(CONFIG_FILE)
    }

    pub fn exists(home: &Path) -> bool {
        Self::config_path(home).exists()
    }

    /// Load the config from `home`, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load(home: &Path) -> Config {
        let path = Self::config_path(home);
        if !path.exists() {
            return Config::default();
        }

        let parsed = fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|contents| serde_json::from_str(&contents).map_err(anyhow::Error::from));

        match parsed {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    /// Save the config to disk
    pub fn save(&self, home: &Path) -> anyhow::Result<()> {
        if !home.exists() {
            fs::create_dir_all(home)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(Self::config_path(home), contents)?;

        Ok(())
    }

    pub fn pdf_path(&self) -> PathBuf {
        self.export_dir.join(&self.pdf_file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()), Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");
        let config = Config {
            quote_title: "Acme Quote".to_string(),
            currency_symbol: "€".to_string(),
            export_dir: PathBuf::from("/tmp/quotes"),
            pdf_file_name: "quote.pdf".to_string(),
        };

        config.save(&home).unwrap();

        assert_eq!(Config::load(&home), config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), r#"{"quote_title": "Custom"}"#).unwrap();

        let config = Config::load(dir.path());
        assert_eq!(config.quote_title, "Custom");
        assert_eq!(config.pdf_file_name, "gvws-quote.pdf");
    }

    #[test]
    fn test_corrupt_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "nope").unwrap();
        assert_eq!(Config::load(dir.path()), Config::default());
    }

    #[test]
    fn test_pdf_path() {
        let config = Config::default();
        assert_eq!(config.pdf_path(), PathBuf::from("./gvws-quote.pdf"));
    }
}
