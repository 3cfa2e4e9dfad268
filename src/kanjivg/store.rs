//! KanjiVG data directory access.
//!
//! Files are named after the character's code point: five lowercase hex digits, an optional
//! `-Variant` suffix, and `.svg` (`06f22.svg`, `05b57-Kaisho.svg`).

use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context as _;
use regex::Regex;

use crate::foundation::error::{KanjiStrokeError, KanjiStrokeResult};

static DATA_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9a-f]*)-?(.*?)\.svg$").unwrap());

/// ASCII file name KanjiVG uses for `character` (and `variant`, when non-empty).
pub fn ascii_filename(character: char, variant: &str) -> String {
    let code = format!("{:05x}", u32::from(character));
    if variant.is_empty() {
        format!("{code}.svg")
    } else {
        format!("{code}-{variant}.svg")
    }
}

/// One character's stroke data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KanjiVg {
    /// The character the file describes.
    pub character: char,
    /// Empty when this is the default form.
    pub variant: String,
    /// Raw file contents.
    pub svg: String,
}

impl KanjiVg {
    /// Load `character` from `dir`.
    ///
    /// A missing file means there is no data for the character and is reported as
    /// [`KanjiStrokeError::InvalidCharacter`]; any other IO failure propagates.
    pub fn load(dir: &Path, character: char, variant: Option<&str>) -> KanjiStrokeResult<Self> {
        let variant = variant.unwrap_or_default().to_owned();
        let path = dir.join(ascii_filename(character, &variant));
        let svg = match std::fs::read_to_string(&path) {
            Ok(svg) => svg,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(KanjiStrokeError::invalid_character(character, variant));
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("read kanjivg file '{}'", path.display()))
                    .into());
            }
        };

        Ok(Self {
            character,
            variant,
            svg,
        })
    }

    /// Load the entry a KanjiVG file name refers to, e.g. `00061.svg`.
    pub fn from_filename(dir: &Path, filename: &str) -> KanjiStrokeResult<Self> {
        let caps = DATA_FILENAME.captures(filename).ok_or_else(|| {
            KanjiStrokeError::validation(format!("not a kanjivg file name: \"{filename}\""))
        })?;
        let character = u32::from_str_radix(&caps[1], 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                KanjiStrokeError::validation(format!("bad code point in \"{filename}\""))
            })?;
        let variant = &caps[2];
        Self::load(
            dir,
            character,
            (!variant.is_empty()).then_some(variant),
        )
    }

    /// Every entry in `dir`, sorted by file name. Non-matching files are skipped.
    pub fn all(dir: &Path) -> KanjiStrokeResult<Vec<Self>> {
        let rd = std::fs::read_dir(dir)
            .with_context(|| format!("list kanjivg dir '{}'", dir.display()))?;

        let mut names = Vec::new();
        for entry in rd {
            let entry = entry.with_context(|| format!("list kanjivg dir '{}'", dir.display()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if DATA_FILENAME.is_match(&name) {
                names.push(name);
            } else {
                tracing::debug!(file = %name, "skipping non-kanjivg file");
            }
        }
        names.sort();

        names
            .iter()
            .map(|name| Self::from_filename(dir, name))
            .collect()
    }

    /// See [`ascii_filename`].
    pub fn ascii_filename(&self) -> String {
        ascii_filename(self.character, &self.variant)
    }

    /// File name spelled with the character itself, e.g. `漢.svg`.
    pub fn character_filename(&self) -> String {
        if self.variant.is_empty() {
            format!("{}.svg", self.character)
        } else {
            format!("{}-{}.svg", self.character, self.variant)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kanjivg/store.rs"]
mod tests;
