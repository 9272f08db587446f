//! Fonts and the asset sources they are loaded from.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use crate::error::AssetError;

/// Name every scene asks for.
pub const DEFAULT_FONT: &str = "DefaultFont";

/// Glyph substituted for characters the font lacks.
const MISSING_GLYPH: char = '?';

/// A font: the set of characters it can draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    name: String,
    glyphs: BTreeSet<char>,
}

impl Font {
    /// Create a font from a glyph list. Whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Empty`] if no glyphs remain.
    pub fn from_glyphs(name: &str, glyphs: &str) -> Result<Self, AssetError> {
        let glyphs: BTreeSet<char> = glyphs.chars().filter(|c| !c.is_whitespace()).collect();
        if glyphs.is_empty() {
            return Err(AssetError::Empty {
                name: name.to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            glyphs,
        })
    }

    /// Font covering printable ASCII.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            name: DEFAULT_FONT.to_string(),
            glyphs: ('!'..='~').collect(),
        }
    }

    /// Font name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the font can draw `c`. Spaces are always drawable.
    #[must_use]
    pub fn supports(&self, c: char) -> bool {
        c == ' ' || self.glyphs.contains(&c)
    }

    /// The string as this font will draw it.
    #[must_use]
    pub fn render(&self, text: &str) -> String {
        text.chars()
            .map(|c| if self.supports(c) { c } else { MISSING_GLYPH })
            .collect()
    }
}

/// Where scenes load assets from.
pub trait AssetSource {
    /// Load a font by name.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetError`] when the font is missing or unusable.
    fn load_font(&self, name: &str) -> Result<Font, AssetError>;
}

/// Loads `<root>/<name>.font`, a UTF-8 file listing the glyphs.
#[derive(Debug, Clone)]
pub struct FsAssets {
    root: PathBuf,
}

impl FsAssets {
    /// Create a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for FsAssets {
    fn load_font(&self, name: &str) -> Result<Font, AssetError> {
        let path = self.root.join(format!("{name}.font"));
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AssetError::NotFound {
                    name: name.to_string(),
                });
            }
            Err(source) => return Err(AssetError::Io { path, source }),
        };
        Font::from_glyphs(name, &text)
    }
}

/// In-memory assets.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    fonts: HashMap<String, Font>,
}

impl MemoryAssets {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Source holding the builtin font under [`DEFAULT_FONT`].
    #[must_use]
    pub fn with_builtin_font() -> Self {
        let mut assets = Self::new();
        assets.insert_font(Font::builtin());
        assets
    }

    /// Add or replace a font.
    pub fn insert_font(&mut self, font: Font) {
        self.fonts.insert(font.name().to_string(), font);
    }
}

impl AssetSource for MemoryAssets {
    fn load_font(&self, name: &str) -> Result<Font, AssetError> {
        self.fonts
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound {
                name: name.to_string(),
            })
    }
}

/// A source with nothing in it; every load fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetSource for NoAssets {
    fn load_font(&self, name: &str) -> Result<Font, AssetError> {
        Err(AssetError::NotFound {
            name: name.to_string(),
        })
    }
}
