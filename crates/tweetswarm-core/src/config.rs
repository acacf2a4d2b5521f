//! Configuration for tweetswarm-core
//!
//! Plot geometry, layout parameters, selection policy and ingestion limits.
//! Every section has defaults, so a config file only needs the keys it
//! changes:
//!
//! ```toml
//! [plot]
//! point_radius = 4.0
//!
//! [layout]
//! iterations = 150
//!
//! [selection]
//! clear_on_dataset_change = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{validation, ConfigError, ConfigResult};
use crate::layout::LayoutConfig;
use tweetswarm_io::IngestOptions;

/// Directory name under the user config dir
const APP_DIR: &str = "tweetswarm";
/// File name of the per-user config
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Canvas geometry
    pub plot: PlotConfig,
    /// Relaxation parameters
    pub layout: LayoutConfig,
    /// Selection behavior
    pub selection: SelectionPolicy,
    /// Dataset ingestion limits
    pub ingest: IngestOptions,
}

/// Margins around the plot area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 30.0,
            right: 150.0,
            bottom: 30.0,
            left: 100.0,
        }
    }
}

/// Placement and size of the legend bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendGeometry {
    /// Width of the color bar
    pub bar_width: f64,
    /// Height of the color bar; each band gets an equal share
    pub bar_height: f64,
    /// Gap between the plot width and the bar
    pub offset_x: f64,
    /// Horizontal distance from the bar's right edge to the label anchor
    pub label_gap: f64,
    /// Baseline of the top label
    pub top_label_y: f64,
}

impl Default for LegendGeometry {
    fn default() -> Self {
        Self {
            bar_width: 30.0,
            bar_height: 500.0,
            offset_x: 100.0,
            label_gap: 40.0,
            top_label_y: 10.0,
        }
    }
}

/// Canvas geometry of the beeswarm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Width of the plot area
    pub plot_width: f64,
    /// Height of one category row
    pub row_height: f64,
    pub margin: Margin,
    /// Portion of the plot width not covered by the x-scale
    pub x_range_inset: f64,
    /// Horizontal offset applied to every point in a row
    pub point_offset_x: f64,
    pub point_radius: f64,
    /// Border width of a selected point
    pub stroke_width: f64,
    /// X position of the row label, relative to the row origin
    pub row_label_x: f64,
    pub label_font_size: f64,
    pub legend: LegendGeometry,
    /// Extra canvas width to the right of the legend
    pub extra_width: f64,
    /// Height trimmed from the bottom of the canvas
    pub height_trim: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            plot_width: 700.0,
            row_height: 250.0,
            margin: Margin::default(),
            x_range_inset: 300.0,
            point_offset_x: 200.0,
            point_radius: 5.0,
            stroke_width: 2.0,
            row_label_x: -50.0,
            label_font_size: 16.0,
            legend: LegendGeometry::default(),
            extra_width: 500.0,
            height_trim: 150.0,
        }
    }
}

impl PlotConfig {
    /// Total canvas size as (width, height)
    pub fn canvas_size(&self) -> (f64, f64) {
        let m = &self.margin;
        let rows = tweetswarm_io::Category::ALL.len() as f64;
        let width = self.plot_width + m.left + m.right + self.extra_width;
        let height = (self.row_height + m.top + m.bottom) * rows - self.height_trim;
        (width, height)
    }

    /// Pixel range of the shared x-scale
    pub fn x_range(&self) -> (f64, f64) {
        (0.0, self.plot_width - self.x_range_inset)
    }

    /// Canvas position of a row's top-left corner
    pub fn row_origin(&self, row: usize) -> (f64, f64) {
        (
            self.margin.left,
            self.margin.top + row as f64 * (self.row_height + self.margin.top),
        )
    }

    /// Canvas position of the legend bar's top-left corner
    pub fn legend_origin(&self) -> (f64, f64) {
        (
            self.margin.left + self.plot_width + self.legend.offset_x,
            self.margin.top + self.row_height / 2.0,
        )
    }

    pub fn validate(&self) -> ConfigResult<()> {
        validation::validate_positive("plot.plot_width", self.plot_width)?;
        validation::validate_positive("plot.row_height", self.row_height)?;
        validation::validate_non_negative("plot.margin.top", self.margin.top)?;
        validation::validate_non_negative("plot.margin.right", self.margin.right)?;
        validation::validate_non_negative("plot.margin.bottom", self.margin.bottom)?;
        validation::validate_non_negative("plot.margin.left", self.margin.left)?;
        validation::validate_positive("plot.point_radius", self.point_radius)?;
        validation::validate_non_negative("plot.stroke_width", self.stroke_width)?;
        validation::validate_positive("plot.label_font_size", self.label_font_size)?;
        validation::validate_positive("plot.legend.bar_width", self.legend.bar_width)?;
        validation::validate_positive("plot.legend.bar_height", self.legend.bar_height)?;

        if self.x_range_inset < 0.0 || self.x_range_inset >= self.plot_width {
            return Err(ConfigError::InvalidValue {
                field: "plot.x_range_inset".to_string(),
                message: format!("must be within [0, plot_width), got {}", self.x_range_inset),
            });
        }

        let (width, height) = self.canvas_size();
        if width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "plot".to_string(),
                message: format!("canvas size {}x{} is empty", width, height),
            });
        }

        Ok(())
    }
}

/// What happens to the selection when a new dataset is loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionPolicy {
    /// Clear the selection on dataset replacement instead of keeping it
    pub clear_on_dataset_change: bool,
}

impl SwarmConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: SwarmConfig =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Location of the per-user config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the per-user config if it exists, defaults otherwise
    pub fn load_or_default() -> ConfigResult<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(path),
            _ => {
                tracing::debug!("No user config found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check every section
    pub fn validate(&self) -> ConfigResult<()> {
        self.plot.validate()?;
        self.layout.validate()?;
        if self.ingest.max_records == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ingest.max_records".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
