//! Site configuration (`soleado.toml`)
//!
//! ```toml
//! [motion]
//! reduced = "system"   # "system" | "always" | "never"
//!
//! [viewport]
//! height = 900.0
//! scroll_step = 120.0
//!
//! [contact]
//! whatsapp_number = "447848147550"
//! email = "info@soleadomoments.co.uk"
//! ```
//!
//! Every table is optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use soleado_core::{EnvPreference, MotionPreference, MotionPreferenceSource};
use std::fs;
use std::path::Path;

/// Default config file name
pub const CONFIG_FILE: &str = "soleado.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub contact: ContactConfig,
}

/// Where the reduced-motion preference comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReducedMotion {
    /// Use the process-wide source (`soleado_core::set_motion_source`),
    /// which falls back to the `SOLEADO_REDUCED_MOTION` environment variable
    #[default]
    System,
    Always,
    Never,
}

impl MotionPreferenceSource for ReducedMotion {
    fn motion_preference(&self) -> MotionPreference {
        match self {
            ReducedMotion::System => EnvPreference.motion_preference(),
            ReducedMotion::Always => MotionPreference::Reduce,
            ReducedMotion::Never => MotionPreference::NoPreference,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct MotionConfig {
    #[serde(default)]
    pub reduced: ReducedMotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ViewportConfig {
    /// Viewport height in pixels
    #[serde(default = "default_height")]
    pub height: f32,
    /// Scroll distance per preview step
    #[serde(default = "default_scroll_step")]
    pub scroll_step: f32,
}

fn default_height() -> f32 {
    900.0
}

fn default_scroll_step() -> f32 {
    120.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            height: default_height(),
            scroll_step: default_scroll_step(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactConfig {
    /// International format, no `+` or spaces
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,
    #[serde(default = "default_email")]
    pub email: String,
}

fn default_whatsapp_number() -> String {
    "447848147550".to_string()
}

fn default_email() -> String {
    "info@soleadomoments.co.uk".to_string()
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: default_whatsapp_number(),
            email: default_email(),
        }
    }
}

impl SiteConfig {
    /// Load `soleado.toml` from a directory, falling back to defaults if absent
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        Self::load(&path.join(CONFIG_FILE))
    }

    /// Load a config file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content)?;
        if config.viewport.height <= 0.0 || config.viewport.scroll_step <= 0.0 {
            anyhow::bail!("viewport height and scroll_step must be positive");
        }
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize site config")
    }
}
