//! Generator Options
//!
//! Defaults are plain constants; options files are JSON with camelCase keys
//! and every field optional.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{IdenticonError, IdenticonResult};
use crate::hashing::HashAlgorithm;
use crate::pattern::Symmetry;
use crate::svg::{RenderOptions, RenderStrategy};

/// Default grid size (n x n)
pub const DEFAULT_GRID: usize = 5;

/// Default image width/height in pixels
pub const DEFAULT_IMAGE_SIZE: f64 = 5.0;

/// Default digest width in bytes (128 bits)
pub const DEFAULT_DIGEST_BYTES: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdenticonOptions {
    #[serde(default = "default_grid")]
    pub grid: usize,
    #[serde(default = "default_image_size")]
    pub image_size: f64,
    #[serde(default = "default_digest_bytes")]
    pub digest_bytes: usize,
    #[serde(default)]
    pub algorithm: HashAlgorithm,
    #[serde(default)]
    pub symmetry: Symmetry,
    #[serde(default)]
    pub strategy: RenderStrategy,
    #[serde(default)]
    pub background: Option<Color>,
}

fn default_grid() -> usize { DEFAULT_GRID }
fn default_image_size() -> f64 { DEFAULT_IMAGE_SIZE }
fn default_digest_bytes() -> usize { DEFAULT_DIGEST_BYTES }

impl Default for IdenticonOptions {
    fn default() -> Self {
        Self {
            grid: DEFAULT_GRID,
            image_size: DEFAULT_IMAGE_SIZE,
            digest_bytes: DEFAULT_DIGEST_BYTES,
            algorithm: HashAlgorithm::default(),
            symmetry: Symmetry::default(),
            strategy: RenderStrategy::default(),
            background: None,
        }
    }
}

impl IdenticonOptions {
    pub fn with_grid(mut self, grid: usize) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_image_size(mut self, image_size: f64) -> Self {
        self.image_size = image_size;
        self
    }

    pub fn from_json_str(json: &str) -> IdenticonResult<Self> {
        let options: Self = serde_json::from_str(json)
            .map_err(|e| IdenticonError::config(format!("invalid options: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    pub fn load_from_path(path: &Path) -> IdenticonResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Check every precondition the pipeline would otherwise fail on.
    pub fn validate(&self) -> IdenticonResult<()> {
        if self.grid == 0 {
            return Err(IdenticonError::invalid_argument("grid must be >= 1"));
        }
        if !(self.image_size.is_finite() && self.image_size > 0.0) {
            return Err(IdenticonError::invalid_argument(format!(
                "imageSize must be a positive finite number, got {}",
                self.image_size
            )));
        }
        if self.digest_bytes == 0 {
            return Err(IdenticonError::invalid_argument("digestBytes must be > 0"));
        }
        if self.digest_bytes < 3 {
            // color takes the first six hex characters
            return Err(IdenticonError::invalid_argument(format!(
                "digestBytes must be >= 3 to derive a color, got {}",
                self.digest_bytes
            )));
        }
        if self.algorithm == HashAlgorithm::Fnv1a128 && self.digest_bytes != DEFAULT_DIGEST_BYTES {
            return Err(IdenticonError::invalid_argument(format!(
                "fnv1a128 requires digestBytes = {}, got {}",
                DEFAULT_DIGEST_BYTES, self.digest_bytes
            )));
        }
        Ok(())
    }

    /// Width and height of one grid cell; fractional when not divisible.
    pub fn cell_size(&self) -> f64 {
        self.image_size / self.grid as f64
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            strategy: self.strategy,
            background: self.background.clone(),
        }
    }
}
