use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;

use crate::data::model::Stat;

/// Looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "poke-lens.json";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// A fixed-size drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SurfaceConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl SurfaceConfig {
    /// Horizontal pixel span of the plotting area.
    pub fn x_range(&self) -> (f64, f64) {
        (self.margin.left, self.width - self.margin.right)
    }

    /// Vertical pixel span, bottom first so larger values sit higher.
    pub fn y_range(&self) -> (f64, f64) {
        (self.height - self.margin.bottom, self.margin.top)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_path: PathBuf,
    pub bar_chart: SurfaceConfig,
    pub scatter_plot: SurfaceConfig,
    pub parallel_coords: SurfaceConfig,
    pub scatter_x: Stat,
    pub scatter_y: Stat,
    /// Axis order of the parallel-coordinates view.
    pub dimensions: Vec<Stat>,
    /// Categories listed in the scatter legend.
    pub legend_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/pokemon_alopez247.csv"),
            bar_chart: SurfaceConfig {
                width: 600.0,
                height: 400.0,
                margin: Margin {
                    top: 20.0,
                    right: 20.0,
                    bottom: 80.0,
                    left: 50.0,
                },
            },
            scatter_plot: SurfaceConfig {
                width: 600.0,
                height: 400.0,
                margin: Margin {
                    top: 20.0,
                    right: 20.0,
                    bottom: 50.0,
                    left: 60.0,
                },
            },
            parallel_coords: SurfaceConfig {
                width: 800.0,
                height: 300.0,
                margin: Margin {
                    top: 30.0,
                    right: 10.0,
                    bottom: 10.0,
                    left: 10.0,
                },
            },
            scatter_x: Stat::Attack,
            scatter_y: Stat::Defense,
            dimensions: vec![Stat::Hp, Stat::Attack, Stat::Defense, Stat::Speed],
            legend_limit: 5,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Read `path` if it exists, otherwise fall back to defaults. A broken
    /// file is logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }
}
