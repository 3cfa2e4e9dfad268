use std::path::Path;

use anyhow::Context as _;

use crate::color::palette::StrokePalette;
use crate::foundation::core::{DisplayBox, Rgb8};
use crate::foundation::error::{KanjiStrokeError, KanjiStrokeResult};

/// Viewer settings. Every field has a default, so `{}` is a complete config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Id of the element that holds the loaded character.
    pub container_id: String,
    /// Time to draw one unit of stroke length.
    pub time_per_dot_ms: u64,
    /// Saturation/value for stroke colors.
    pub palette: StrokePalette,
    /// Size a loaded character is scaled to.
    pub display: DisplayBox,
    /// Stroke color for the outline presentation, `#rrggbb`.
    pub outline_color: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            container_id: "kanjiContainer".to_owned(),
            time_per_dot_ms: 15,
            palette: StrokePalette::default(),
            display: DisplayBox::default(),
            outline_color: "#000000".to_owned(),
        }
    }
}

impl ViewerConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> KanjiStrokeResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| KanjiStrokeError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> KanjiStrokeResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read viewer config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check value ranges and the outline color.
    pub fn validate(&self) -> KanjiStrokeResult<()> {
        if self.time_per_dot_ms == 0 {
            return Err(KanjiStrokeError::validation("time_per_dot_ms must be > 0"));
        }
        for (name, v) in [
            ("saturation", self.palette.saturation),
            ("value", self.palette.value),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(KanjiStrokeError::validation(format!(
                    "palette {name} must be in [0, 1], got {v}"
                )));
            }
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(KanjiStrokeError::validation(
                "display width and height must be > 0",
            ));
        }
        self.outline_rgb()?;
        Ok(())
    }

    /// Parsed [`ViewerConfig::outline_color`].
    pub fn outline_rgb(&self) -> KanjiStrokeResult<Rgb8> {
        Rgb8::from_hex(&self.outline_color)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewer/config.rs"]
mod tests;
