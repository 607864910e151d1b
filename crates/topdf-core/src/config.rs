// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.
//
// Read-only: an optional JSON file named by `TOPDF_CONFIG` overrides the
// defaults at startup. Nothing is ever written back.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, ToPdfError};
use crate::types::PaperSize;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "TOPDF_CONFIG";

/// Layout and naming settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Page size of converted documents.
    pub paper_size: PaperSize,
    /// Margin around images and text, in millimetres.
    pub margin_mm: f32,
    /// Width text is wrapped to, in millimetres.
    pub content_width_mm: f32,
    /// Distance between text baselines, in millimetres.
    pub line_height_mm: f32,
    /// Font size for converted text.
    pub font_size_pt: f32,
    /// Target width of page thumbnails, in pixels.
    pub thumbnail_width_px: u32,
    /// File name offered when downloading a conversion.
    pub converted_file_name: String,
    /// Prefix added to the source name when downloading a page-removal result.
    pub modified_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            margin_mm: 10.0,
            content_width_mm: 180.0,
            line_height_mm: 7.0,
            font_size_pt: 16.0,
            thumbnail_width_px: 200,
            converted_file_name: "converted_files.pdf".into(),
            modified_prefix: "modified_".into(),
        }
    }
}

impl AppConfig {
    /// Load from `TOPDF_CONFIG` if set, falling back to defaults on any problem.
    pub fn load() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(config) => {
                info!(path = %path, "loaded configuration");
                config
            }
            Err(e) => {
                warn!(path = %path, error = %e, "ignoring configuration file");
                Self::default()
            }
        }
    }

    /// Parse and validate a JSON config file. Missing keys take defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make layout impossible.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.paper_size.dimensions_mm();
        if self.margin_mm < 0.0 || 2.0 * self.margin_mm >= width.min(height) as f32 {
            return Err(ToPdfError::Config(format!(
                "margin {}mm does not fit a {}x{}mm page",
                self.margin_mm, width, height
            )));
        }
        if self.content_width_mm <= 0.0 || self.content_width_mm > width as f32 {
            return Err(ToPdfError::Config(format!(
                "content width {}mm must be within the {}mm page width",
                self.content_width_mm, width
            )));
        }
        if self.line_height_mm <= 0.0 || self.font_size_pt <= 0.0 {
            return Err(ToPdfError::Config(
                "line height and font size must be positive".into(),
            ));
        }
        if self.thumbnail_width_px == 0 {
            return Err(ToPdfError::Config("thumbnail width must be positive".into()));
        }
        Ok(())
    }
}
