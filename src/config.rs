// src/config.rs

//! Configuration for the grid, the scheduler and the default colors.
//!
//! Every struct derives `Deserialize` with `#[serde(default)]`, so a JSON file
//! only needs the fields it wants to change:
//!
//! ```json
//! { "grid": { "columns": 120 }, "scheduler": { "ticks_per_second": 30 } }
//! ```

use crate::color::{NamedColor, Rgba};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// --- Top-Level Configuration Structure ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub scheduler: SchedulerConfig,
    pub colors: ColorScheme,
}

impl Config {
    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration JSON")
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }
}

// --- Grid Configuration ---

/// Initial grid dimensions and the pixel size of one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub lines: usize,
    pub columns: usize,
    pub cell_width_px: usize,
    pub cell_height_px: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            lines: 24,
            columns: 80,
            cell_width_px: 8,
            cell_height_px: 16,
        }
    }
}

impl GridConfig {
    /// Grid dimensions (lines, columns) that fit in a surface of the given
    /// pixel size. Partial cells are dropped.
    pub fn dimensions_for(&self, width_px: usize, height_px: usize) -> (usize, usize) {
        (
            height_px / self.cell_height_px.max(1),
            width_px / self.cell_width_px.max(1),
        )
    }
}

// --- Scheduler Configuration ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Update steps per second.
    pub ticks_per_second: u32,
    /// A size change is only applied on ticks whose elapsed time is at most
    /// this many milliseconds, so a backlog of late ticks does not trigger a
    /// burst of relayouts.
    pub resize_window_ms: u64,
    /// Most update steps run in one loop iteration when the loop falls behind.
    pub max_catch_up_steps: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            ticks_per_second: 60,
            resize_window_ms: 50,
            max_catch_up_steps: 5,
        }
    }
}

impl SchedulerConfig {
    pub fn ms_per_tick(&self) -> u64 {
        1000 / u64::from(self.ticks_per_second.max(1))
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.ms_per_tick())
    }

    pub fn resize_window(&self) -> Duration {
        Duration::from_millis(self.resize_window_ms)
    }
}

// --- Color Scheme Configuration ---

/// Colors applied when a component does not choose its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    pub foreground: Rgba,
    pub background: Rgba,
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme {
            foreground: NamedColor::BrightWhite.into(),
            background: Rgba::TRANSPARENT,
        }
    }
}
