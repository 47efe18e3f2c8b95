use crate::constants::{DEFAULT_OUTPUT_PATTERN, DEFAULT_PAGES_PER_SHEET};
use crate::io::check_output_pattern;
use crate::layout::{DirectionSpec, resolve_grid};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// N-up layout configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NupOptions {
    /// Source pages per output sheet (a square or twice a square)
    pub pages_per_sheet: usize,

    /// Order in which slots are filled
    pub direction: DirectionSpec,

    // Output sheet
    pub sheet_size: SheetSize,
    pub orientation: OrientationPolicy,
    pub scaling_mode: ScalingMode,

    /// Name pattern for derived output paths
    pub output_pattern: String,

    /// Print a confirmation line after writing
    pub verbose: bool,
}

impl Default for NupOptions {
    fn default() -> Self {
        Self {
            pages_per_sheet: DEFAULT_PAGES_PER_SHEET,
            direction: DirectionSpec::default(),
            sheet_size: SheetSize::MatchSource,
            orientation: OrientationPolicy::Auto,
            scaling_mode: ScalingMode::Fill,
            output_pattern: DEFAULT_OUTPUT_PATTERN.to_string(),
            verbose: false,
        }
    }
}

impl NupOptions {
    /// Options for `n` pages per sheet, everything else default
    pub fn with_pages_per_sheet(n: usize) -> Self {
        Self {
            pages_per_sheet: n,
            ..Default::default()
        }
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| NupError::Configuration(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| NupError::Configuration(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        resolve_grid(self.pages_per_sheet, Orientation::Portrait)?;

        if let SheetSize::Paper(PaperSize::Custom {
            width_mm,
            height_mm,
        }) = self.sheet_size
        {
            if !(width_mm > 0.0 && height_mm > 0.0) {
                return Err(NupError::Configuration(format!(
                    "Custom paper size must be positive, got {} x {} mm",
                    width_mm, height_mm
                )));
            }
        }

        check_output_pattern(&self.output_pattern)
    }
}
