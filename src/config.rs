use anyhow::{bail, Context};
use derivative::Derivative;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/predict";
pub const DEFAULT_CONFIG_FILE: &str = "classifier.toml";
pub const ENDPOINT_ENV: &str = "CLASSIFIER_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Deserialize, Derivative)]
#[derivative(Default)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    #[derivative(Default(value = "DEFAULT_ENDPOINT.to_string()"))]
    pub endpoint: String,
    #[derivative(Default(value = "[560.0, 680.0]"))]
    pub window_size: [f32; 2],
}

impl Settings {
    /// Defaults, then the config file, then the environment, then `endpoint_override`.
    ///
    /// An explicitly named config file must exist; the default one is optional.
    pub fn load(
        config_path: Option<&Path>,
        endpoint_override: Option<String>,
    ) -> anyhow::Result<Self> {
        let mut settings = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        settings.apply_env(|key| std::env::var(key).ok());
        if let Some(endpoint) = endpoint_override {
            settings.endpoint = endpoint;
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            self.endpoint = endpoint;
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        let url = reqwest::Url::parse(&self.endpoint)
            .with_context(|| format!("invalid classifier endpoint '{}'", self.endpoint))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "classifier endpoint must be http or https, got '{}'",
                url.scheme()
            );
        }
        Ok(())
    }
}
