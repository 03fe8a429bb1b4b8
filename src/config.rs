use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::curve::{CurveTrimmer, TrimError};

#[derive(Debug)]
pub enum ConfigError {
    File(std::io::Error),
    Parse(serde_yaml::Error),
    Trim(TrimError),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::File(value)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(value: serde_yaml::Error) -> Self {
        ConfigError::Parse(value)
    }
}

impl From<TrimError> for ConfigError {
    fn from(value: TrimError) -> Self {
        ConfigError::Trim(value)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::File(x) => write!(f, "Config file could not be read: {x}"),
            ConfigError::Parse(x) => write!(f, "Config file could not be parsed: {x}"),
            ConfigError::Trim(x) => write!(f, "Config has an invalid trimming setting: {x}"),
            ConfigError::Invalid(x) => write!(f, "Config is invalid: {x}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Multiplicative widening of a frame's y range around the data.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PaneScale {
    pub y_min_scale: f64,
    pub y_max_scale: f64,
}

impl PaneScale {
    pub const MAIN: PaneScale = PaneScale {
        y_min_scale: 0.5,
        y_max_scale: 1.5,
    };
    pub const RATIO: PaneScale = PaneScale {
        y_min_scale: 0.9,
        y_max_scale: 1.1,
    };
}

// A pane block as written in the file; omitted keys fall back per pane.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialPaneScale {
    y_min_scale: Option<f64>,
    y_max_scale: Option<f64>,
}

impl PartialPaneScale {
    fn over(self, base: PaneScale) -> PaneScale {
        PaneScale {
            y_min_scale: self.y_min_scale.unwrap_or(base.y_min_scale),
            y_max_scale: self.y_max_scale.unwrap_or(base.y_max_scale),
        }
    }
}

fn main_pane<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PaneScale, D::Error> {
    Ok(PartialPaneScale::deserialize(deserializer)?.over(PaneScale::MAIN))
}

fn ratio_pane<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PaneScale, D::Error> {
    Ok(PartialPaneScale::deserialize(deserializer)?.over(PaneScale::RATIO))
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize {
            width: 500.0,
            height: 650.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
    pub max_points_per_decade: i32,
    #[serde(deserialize_with = "main_pane")]
    pub main_pane: PaneScale,
    #[serde(deserialize_with = "ratio_pane")]
    pub ratio_pane: PaneScale,
    pub x_min_scale: f64,
    pub x_max_scale: f64,
    pub x_floor: f64,
    pub x_title: String,
    pub y_title: String,
    pub page: PageSize,
    pub progress: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Neutrino cross sections".to_owned(),
            max_points_per_decade: 20,
            main_pane: PaneScale::MAIN,
            ratio_pane: PaneScale::RATIO,
            x_min_scale: 0.5,
            x_max_scale: 1.5,
            x_floor: 0.1,
            x_title: "E_ν (GeV)".to_owned(),
            y_title: "σ (10⁻³⁸ cm²)".to_owned(),
            page: PageSize::default(),
            progress: true,
        }
    }
}

impl ReportConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: ReportConfig = serde_yaml::from_reader(File::open(path)?)?;
        log::info!("Loaded report config from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.trimmer()?;

        let scales = [
            ("main_pane.y_min_scale", self.main_pane.y_min_scale),
            ("main_pane.y_max_scale", self.main_pane.y_max_scale),
            ("ratio_pane.y_min_scale", self.ratio_pane.y_min_scale),
            ("ratio_pane.y_max_scale", self.ratio_pane.y_max_scale),
            ("x_min_scale", self.x_min_scale),
            ("x_max_scale", self.x_max_scale),
            ("x_floor", self.x_floor),
        ];
        if let Some((name, value)) = scales.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} = {value} is not finite")));
        }

        if !(self.page.width > 0.0 && self.page.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "page size {}x{} must be positive",
                self.page.width, self.page.height
            )));
        }
        Ok(())
    }

    pub fn trimmer(&self) -> Result<CurveTrimmer, TrimError> {
        CurveTrimmer::new(self.max_points_per_decade)
    }
}
