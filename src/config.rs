//! Export configuration loaded from the process environment.
//!
//! Environment variables:
//! - `DRAWIO_SCALE`: scale multiplier (default: 2)
//! - `DRAWIO_FORMAT`: png, jpg, svg or pdf (default: png)
//! - `DRAWIO_TRANSPARENT`: "1" enables a transparent background, png only (default: 1)
//! - `DRAWIO_BIN`: exporter executable name or path (default: drawio)
//!
//! Values are not range-checked. Whatever is set is handed to the exporter,
//! which reports bad values by failing the conversion.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const SCALE_VAR: &str = "DRAWIO_SCALE";
pub const FORMAT_VAR: &str = "DRAWIO_FORMAT";
pub const TRANSPARENT_VAR: &str = "DRAWIO_TRANSPARENT";
pub const EXPORTER_VAR: &str = "DRAWIO_BIN";

pub const DEFAULT_SCALE: &str = "2";
pub const DEFAULT_EXPORTER: &str = "drawio";

/// Output format requested from the exporter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpg,
    Svg,
    Pdf,
    /// Unrecognized value, forwarded verbatim.
    Other(String),
}

impl ExportFormat {
    pub fn as_str(&self) -> &str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Other(raw) => raw,
        }
    }

    /// Only the png renderer path supports an alpha channel.
    pub fn supports_transparency(&self) -> bool {
        matches!(self, ExportFormat::Png)
    }
}

impl FromStr for ExportFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "png" => ExportFormat::Png,
            "jpg" => ExportFormat::Jpg,
            "svg" => ExportFormat::Svg,
            "pdf" => ExportFormat::Pdf,
            other => ExportFormat::Other(other.to_string()),
        })
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ExportFormat> for String {
    fn from(format: ExportFormat) -> Self {
        format.as_str().to_string()
    }
}

/// Immutable settings for one export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportConfig {
    /// Passed through to the exporter uninterpreted.
    pub scale: String,
    pub format: ExportFormat,
    pub transparent: bool,
    pub exporter: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE.to_string(),
            format: ExportFormat::Png,
            transparent: true,
            exporter: DEFAULT_EXPORTER.to_string(),
        }
    }
}

impl ExportConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, treating unset and empty values
    /// alike as "use the default".
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let defaults = Self::default();

        let format = match get(FORMAT_VAR) {
            Some(raw) => raw.parse().unwrap_or_default(),
            None => defaults.format,
        };

        Self {
            scale: get(SCALE_VAR).unwrap_or(defaults.scale),
            format,
            transparent: get(TRANSPARENT_VAR).map_or(defaults.transparent, |v| v == "1"),
            exporter: get(EXPORTER_VAR).unwrap_or(defaults.exporter),
        }
    }

    /// Whether the transparency flag goes on the exporter command line.
    pub fn wants_transparency(&self) -> bool {
        self.transparent && self.format.supports_transparency()
    }
}
