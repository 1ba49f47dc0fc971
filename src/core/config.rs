use crate::core::costs::CostInputs;
use crate::core::currency::Currency;
use crate::core::pricing::{Competitor, PricingStrategy};
use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::{fs, path::PathBuf};
use tracing::debug;

/// Free-text product profile. Feeds the recommendation prompt; none of the
/// numeric calculations read it.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ProductProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub key_features: String,
}

/// Market inputs for the pricing command: the competitor list, the target
/// profit margin and the selected strategy.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PricingInputs {
    #[serde(default)]
    pub competitors: Vec<Competitor>,
    #[serde(default = "default_target_margin")]
    pub target_profit_margin: f64,
    #[serde(default = "default_strategy")]
    pub strategy: PricingStrategy,
}

fn default_target_margin() -> f64 {
    40.0
}

fn default_strategy() -> PricingStrategy {
    PricingStrategy::Competitive
}

impl Default for PricingInputs {
    fn default() -> Self {
        PricingInputs {
            competitors: Vec::new(),
            target_profit_margin: default_target_margin(),
            strategy: default_strategy(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeminiProviderConfig {
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    pub api_key: Option<String>,
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

impl Default for GeminiProviderConfig {
    fn default() -> Self {
        GeminiProviderConfig {
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            api_key: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub gemini: Option<GeminiProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            gemini: Some(GeminiProviderConfig::default()),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub product: ProductProfile,
    pub costs: Option<CostInputs>,
    pub pricing: Option<PricingInputs>,
    pub currency: Option<Currency>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    pub data_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Loads the default config file, falling back to built-in defaults when
    /// none exists yet.
    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            debug!("No config file at {}, using defaults", config_path.display());
            Ok(AppConfig::default())
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "costwise", "costwise")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("io", "costwise", "costwise")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.validate()?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Rejects values the calculators have no defined behavior for. A margin
    /// of 100% or more has no finite target price, and duplicate competitor
    /// ids would make the caller-owned list ambiguous.
    pub fn validate(&self) -> Result<()> {
        if let Some(pricing) = &self.pricing {
            if !(0.0..100.0).contains(&pricing.target_profit_margin) {
                bail!(
                    "target_profit_margin must be at least 0 and below 100, got {}",
                    pricing.target_profit_margin
                );
            }
            let mut ids = HashSet::new();
            for competitor in &pricing.competitors {
                if competitor.id.is_empty() {
                    bail!("Competitor '{}' is missing an id", competitor.name);
                }
                if !ids.insert(competitor.id.as_str()) {
                    bail!("Duplicate competitor id: {}", competitor.id);
                }
            }
        }
        Ok(())
    }
}
