//! Pipeline configuration
//!
//! One explicit value threaded through every stage. Defaults match the
//! constants the outline pipeline was tuned with for resolution-8 H3 cells.

use crate::error::{OutlineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Finest resolution the hexagonal grid supports
pub const MAX_RESOLUTION: u8 = 15;

/// Most decimal places an exported coordinate can meaningfully carry
pub const MAX_PRECISION: u32 = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Grid resolution handed to the cell index
    pub resolution: u8,

    /// Douglas–Peucker tolerance in degrees
    pub simplify_tolerance: f64,

    /// Outward buffer margin in degrees, 0 disables buffering
    pub buffer_margin: f64,

    /// Number of corner-cutting passes
    pub smooth_iterations: u32,

    /// Corner-cutting ratio in (0, 0.5]
    pub smooth_ratio: f64,

    /// Distance under which two cell boundaries count as touching
    pub adjacency_epsilon: f64,

    /// Decimal places kept in exported coordinates, `None` for full precision
    pub precision: Option<u32>,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            resolution: 8,
            simplify_tolerance: 0.0018,
            buffer_margin: 0.0005,
            smooth_iterations: 6,
            smooth_ratio: 0.25,
            adjacency_epsilon: 1e-9,
            precision: None,
        }
    }
}

impl OutlineConfig {
    /// Parse a JSON document, filling missing fields from the defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: OutlineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.resolution > MAX_RESOLUTION {
            return Err(OutlineError::InvalidConfig(format!(
                "resolution {} exceeds {}",
                self.resolution, MAX_RESOLUTION
            )));
        }
        if !self.simplify_tolerance.is_finite() || self.simplify_tolerance < 0.0 {
            return Err(OutlineError::InvalidConfig(format!(
                "simplify_tolerance must be finite and >= 0, got {}",
                self.simplify_tolerance
            )));
        }
        if !self.buffer_margin.is_finite() || self.buffer_margin < 0.0 {
            return Err(OutlineError::InvalidConfig(format!(
                "buffer_margin must be finite and >= 0, got {}",
                self.buffer_margin
            )));
        }
        if self.smooth_iterations == 0 {
            return Err(OutlineError::InvalidConfig(
                "smooth_iterations must be at least 1".to_string(),
            ));
        }
        if !(self.smooth_ratio > 0.0 && self.smooth_ratio <= 0.5) {
            return Err(OutlineError::InvalidConfig(format!(
                "smooth_ratio must lie in (0, 0.5], got {}",
                self.smooth_ratio
            )));
        }
        if !self.adjacency_epsilon.is_finite() || self.adjacency_epsilon < 0.0 {
            return Err(OutlineError::InvalidConfig(format!(
                "adjacency_epsilon must be finite and >= 0, got {}",
                self.adjacency_epsilon
            )));
        }
        if let Some(precision) = self.precision.filter(|&p| p > MAX_PRECISION) {
            return Err(OutlineError::InvalidConfig(format!(
                "precision {} exceeds {} decimals",
                precision, MAX_PRECISION
            )));
        }
        Ok(())
    }
}
