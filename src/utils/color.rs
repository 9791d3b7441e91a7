//! Collaborator colors.
//!
//! A collaborator's color is either taken from the override table or derived
//! from an MD5 digest of their full name, so the same name maps to the same
//! color on every run. Board tags only know a fixed set of named fill colors;
//! [`TagColor`] maps those names to the hex values used as card themes.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use md5::{Digest, Md5};
use serde::Deserialize;

/// Seed used when a task has no known assignee
pub const UNKNOWN_ASSIGNEE_SEED: &str = "Unknown Assignee";

/// Fill colors accepted by the board service for tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagColor {
    Red,
    LightGreen,
    Cyan,
    Yellow,
    Magenta,
    Green,
    Blue,
    Gray,
    Violet,
    DarkGreen,
    DarkBlue,
    Black,
}

impl TagColor {
    /// Palette order used when handing out colors to new tags
    pub const PALETTE: [TagColor; 12] = [
        TagColor::Red,
        TagColor::LightGreen,
        TagColor::Cyan,
        TagColor::Yellow,
        TagColor::Magenta,
        TagColor::Green,
        TagColor::Blue,
        TagColor::Gray,
        TagColor::Violet,
        TagColor::DarkGreen,
        TagColor::DarkBlue,
        TagColor::Black,
    ];

    /// Wire name of the color
    pub fn as_str(self) -> &'static str {
        match self {
            TagColor::Red => "red",
            TagColor::LightGreen => "light_green",
            TagColor::Cyan => "cyan",
            TagColor::Yellow => "yellow",
            TagColor::Magenta => "magenta",
            TagColor::Green => "green",
            TagColor::Blue => "blue",
            TagColor::Gray => "gray",
            TagColor::Violet => "violet",
            TagColor::DarkGreen => "dark_green",
            TagColor::DarkBlue => "dark_blue",
            TagColor::Black => "black",
        }
    }

    /// Parse a wire name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::PALETTE.into_iter().find(|c| c.as_str() == name)
    }

    /// Hex value used for card themes
    pub fn hex(self) -> &'static str {
        match self {
            TagColor::Red => "#f24726",
            TagColor::LightGreen => "#cee741",
            TagColor::Cyan => "#12cdd4",
            TagColor::Yellow => "#fac710",
            TagColor::Magenta => "#da0063",
            TagColor::Green => "#8fd14f",
            TagColor::Blue => "#2d9bf0",
            TagColor::Gray => "#808080",
            TagColor::Violet => "#652cb3",
            TagColor::DarkGreen => "#0ca789",
            TagColor::DarkBlue => "#414bb2",
            TagColor::Black => "#1a1a1a",
        }
    }
}

/// Translate a board color name to hex; anything unrecognized passes through.
pub fn color_name_to_hex(name: &str) -> String {
    match TagColor::parse(name) {
        Some(color) => color.hex().to_string(),
        None => name.to_string(),
    }
}

/// Derive a stable `#rrggbb` color from a name.
///
/// An empty name is hashed through [`UNKNOWN_ASSIGNEE_SEED`] instead.
pub fn generate_hex_color(name: &str) -> String {
    let seed = if name.trim().is_empty() { UNKNOWN_ASSIGNEE_SEED } else { name };
    let digest = Md5::digest(seed.as_bytes());
    format!("#{:02x}{:02x}{:02x}", digest[0], digest[1], digest[2])
}

#[derive(Debug, Deserialize, Default)]
struct OverrideFile {
    #[serde(default)]
    overrides: HashMap<String, String>,
}

/// Maps collaborator identities to colors, honouring explicit overrides.
#[derive(Debug, Clone, Default)]
pub struct ColorAssigner {
    overrides: HashMap<String, String>,
}

impl ColorAssigner {
    pub fn new(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Load the override table from a TOML file with an `[overrides]` table
    /// of `collaborator_id = "color"` entries.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read color overrides: {}", path.as_ref().display()))?;
        let file: OverrideFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse color overrides: {}", path.as_ref().display()))?;
        Ok(Self::new(file.overrides))
    }

    pub fn overrides(&self) -> &HashMap<String, String> {
        &self.overrides
    }

    /// The board tag color an override names, if it names one.
    pub fn override_tag_color(&self, id: &str) -> Option<TagColor> {
        self.overrides.get(id).and_then(|color| TagColor::parse(color))
    }

    /// An override that is a literal color rather than a tag color name.
    ///
    /// Board tags cannot carry such a color, so it stays pinned on the collaborator.
    pub fn pinned_hex(&self, id: &str) -> Option<String> {
        self.overrides
            .get(id)
            .filter(|color| TagColor::parse(color).is_none())
            .cloned()
    }

    /// Return the override for `id` if one exists, else the name-derived color.
    pub fn color_for(&self, name: &str, id: Option<&str>) -> String {
        id.and_then(|id| self.overrides.get(id))
            .map(|color| color_name_to_hex(color))
            .unwrap_or_else(|| generate_hex_color(name))
    }
}
