//=========================================================================
// Fonts & Text Geometry
//=========================================================================
//
// Typeface JSON fonts (the facetype.js format) parsed with serde_json,
// plus a text geometry descriptor laid out from glyph advances.
//
// Glyph outlines stay in the font; extrusion and bevels are produced by
// the render backend from the descriptor. Layout here gives the extents
// needed for centering and placement.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec3;
use log::warn;
use serde::Deserialize;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::texture::{resolve, LoadingManager};

//=== FontError ===========================================================

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("font has a non-positive resolution ({0})")]
    BadResolution(f32),
}

//=== Typeface Format =====================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Glyph {
    /// Horizontal advance in font units.
    pub ha: f32,
    #[serde(default)]
    pub x_min: f32,
    #[serde(default)]
    pub x_max: f32,
    /// Outline commands (`m`, `l`, `q`, `b`).
    #[serde(default)]
    pub o: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontBounds {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    #[serde(default)]
    pub family_name: String,
    pub resolution: f32,
    pub bounding_box: FontBounds,
    #[serde(default)]
    pub underline_thickness: f32,
    #[serde(default)]
    pub ascender: f32,
    #[serde(default)]
    pub descender: f32,
    pub glyphs: HashMap<String, Glyph>,
}

pub type FontHandle = Arc<Font>;

impl Font {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Glyph for `c`, falling back to '?'.
    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        let mut buf = [0u8; 4];
        self.glyphs
            .get(c.encode_utf8(&mut buf) as &str)
            .or_else(|| self.glyphs.get("?"))
    }

    /// Lays out `text` at `size` world units per em.
    pub fn layout(&self, text: &str, size: f32) -> TextLayout {
        let scale = size / self.resolution;
        let line_height =
            (self.bounding_box.y_max - self.bounding_box.y_min + self.underline_thickness) * scale;

        let mut layout = TextLayout {
            glyph_count: 0,
            lines: 1,
            line_height,
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        };

        let mut pen_x = 0.0f32;
        let mut pen_y = 0.0f32;
        let mut seen_any = false;

        for c in text.chars() {
            if c == '\n' {
                pen_x = 0.0;
                pen_y -= line_height;
                layout.lines += 1;
                continue;
            }

            let Some(glyph) = self.glyph(c) else {
                warn!("Font {} has no glyph for {:?} and no '?' fallback", self.family_name, c);
                continue;
            };

            let lo = Vec3::new(
                pen_x + glyph.x_min * scale,
                pen_y + self.bounding_box.y_min * scale,
                0.0,
            );
            let hi = Vec3::new(
                pen_x + glyph.x_max * scale,
                pen_y + self.bounding_box.y_max * scale,
                0.0,
            );
            if seen_any {
                layout.min = layout.min.min(lo);
                layout.max = layout.max.max(hi);
            } else {
                layout.min = lo;
                layout.max = hi;
                seen_any = true;
            }

            if glyph.o.is_some() {
                layout.glyph_count += 1;
            }
            pen_x += glyph.ha * scale;
        }

        layout
    }
}

//=== TextLayout ==========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLayout {
    /// Glyphs with an outline (spaces excluded).
    pub glyph_count: usize,
    pub lines: usize,
    pub line_height: f32,
    pub min: Vec3,
    pub max: Vec3,
}

//=== TextGeometry ========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bevel {
    pub thickness: f32,
    pub size: f32,
    pub offset: f32,
    pub segments: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOptions {
    pub size: f32,
    pub depth: f32,
    pub curve_segments: u32,
    pub bevel: Option<Bevel>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self { size: 100.0, depth: 50.0, curve_segments: 12, bevel: None }
    }
}

/// Extruded text descriptor with precomputed extents.
#[derive(Debug, Clone, PartialEq)]
pub struct TextGeometry {
    pub text: String,
    pub font: String,
    pub options: TextOptions,
    pub layout: TextLayout,
    /// Translation baked into the vertices (set by `center`).
    pub offset: Vec3,
}

impl TextGeometry {
    pub fn new(font: &Font, text: impl Into<String>, options: TextOptions) -> Self {
        let text = text.into();
        let layout = font.layout(&text, options.size);
        Self {
            text,
            font: font.family_name.clone(),
            options,
            layout,
            offset: Vec3::ZERO,
        }
    }

    /// Extruded bounds including bevel, after `offset`.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let (grow, thickness) = match self.options.bevel {
            Some(b) => (b.size + b.offset, b.thickness),
            None => (0.0, 0.0),
        };
        let min = Vec3::new(self.layout.min.x - grow, self.layout.min.y - grow, -thickness);
        let max = Vec3::new(
            self.layout.max.x + grow,
            self.layout.max.y + grow,
            self.options.depth + thickness,
        );
        (min + self.offset, max + self.offset)
    }

    /// Moves the geometry so its bounds are centered on the origin.
    pub fn center(&mut self) {
        let (min, max) = self.bounds();
        self.offset -= (min + max) * 0.5;
    }
}

//=== FontLoader ==========================================================

#[derive(Debug, Clone)]
pub struct FontLoader {
    root: PathBuf,
    manager: LoadingManager,
}

impl FontLoader {
    pub fn new(root: impl Into<PathBuf>, manager: LoadingManager) -> Self {
        Self { root: root.into(), manager }
    }

    pub fn load(&self, url: &str) -> Result<Font, FontError> {
        self.manager.item_start(url);
        let result = self.read(url);
        match &result {
            Ok(_) => self.manager.item_end(url),
            Err(_) => self.manager.item_error(url),
        }
        result
    }

    fn read(&self, url: &str) -> Result<Font, FontError> {
        let path = resolve(&self.root, url);
        let text = std::fs::read_to_string(&path)
            .map_err(|source| FontError::Io { path: path.clone(), source })?;
        let font = Font::from_json(&text).map_err(|source| FontError::Parse { path, source })?;
        if font.resolution <= 0.0 {
            return Err(FontError::BadResolution(font.resolution));
        }
        Ok(font)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
