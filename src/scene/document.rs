use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::effects::{
    BlockTextEffect, Effect, ProgressCircleEffect, RectangleEffect, ShadeEffect, ShadeShape,
    TextEffect,
};
use crate::foundation::color::Color;
use crate::foundation::core::{AnchorPosition, Point, Rect, TextAlign};
use crate::foundation::error::{FxError, FxResult};
use crate::render::pipeline::ImageWithEffects;
use crate::render::raster::RasterImage;
use crate::text::font::Font;

/// An ordered effect list as stored on disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectDocument {
    /// Effects in draw order.
    pub effects: Vec<EffectDef>,
}

/// A font file, relative to the fonts root, at a pixel size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontDef {
    /// Path relative to the fonts root.
    pub source: String,
    /// Pixel size.
    pub size: f32,
}

fn default_stroke_width() -> f64 {
    crate::effects::progress::DEFAULT_STROKE_WIDTH
}

/// One serialized effect, tagged by `kind`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum EffectDef {
    /// [`RectangleEffect`] at `x, y` with the given size.
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    /// [`ShadeEffect`].
    Shade {
        shape: ShadeShape,
        color: Color,
    },
    /// [`ProgressCircleEffect`] from explicit radii and angles.
    ProgressCircle {
        center: [f64; 2],
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
        color: Color,
        #[serde(default)]
        stroke_inner: bool,
        #[serde(default)]
        stroke_outer: bool,
        #[serde(default = "default_stroke_width")]
        stroke_width: f64,
    },
    /// [`ProgressCircleEffect::from_percent`].
    ProgressPercent {
        center: [f64; 2],
        radius: f64,
        percent: f64,
        color: Color,
        #[serde(default)]
        stroke: bool,
    },
    /// [`TextEffect`].
    Text {
        anchor: [f64; 2],
        #[serde(default)]
        anchor_position: AnchorPosition,
        text: String,
        font: FontDef,
        color: Color,
        #[serde(default)]
        align: TextAlign,
    },
    /// [`BlockTextEffect`].
    BlockText {
        anchor: [f64; 2],
        #[serde(default)]
        anchor_position: AnchorPosition,
        max_width: f64,
        text: String,
        font: FontDef,
        color: Color,
        #[serde(default)]
        capitalize: bool,
        #[serde(default)]
        align: TextAlign,
        #[serde(default)]
        trailing_threshold: usize,
    },
}

impl EffectDocument {
    /// Parse a document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FxResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FxError::serde(format!("parse effect document JSON: {e}")))
    }

    /// Parse a document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FxError::validation(format!("open effect document '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Resolve every definition into an [`Effect`], loading fonts relative to `fonts_root`.
    ///
    /// Each font file is read once, however many effects use it.
    pub fn build(&self, fonts_root: &Path) -> FxResult<Vec<Effect>> {
        let mut fonts = FontLoader::new(fonts_root);
        self.effects
            .iter()
            .enumerate()
            .map(|(idx, def)| {
                def.build(&mut fonts)
                    .map_err(|e| FxError::validation(format!("effects[{idx}]: {e}")))
            })
            .collect()
    }

    /// Pair `base` with this document's effects.
    pub fn apply_to(&self, base: RasterImage, fonts_root: &Path) -> FxResult<ImageWithEffects> {
        Ok(ImageWithEffects::new(base).with_effects(self.build(fonts_root)?))
    }
}

impl EffectDef {
    fn build(&self, fonts: &mut FontLoader<'_>) -> FxResult<Effect> {
        Ok(match self {
            EffectDef::Rectangle {
                x,
                y,
                width,
                height,
                color,
            } => RectangleEffect::new(
                Rect::from_origin_size((*x, *y), (*width, *height)),
                *color,
            )?
            .into(),
            EffectDef::Shade { shape, color } => ShadeEffect::new(*shape, *color).into(),
            EffectDef::ProgressCircle {
                center,
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
                color,
                stroke_inner,
                stroke_outer,
                stroke_width,
            } => ProgressCircleEffect::new(
                point(*center),
                *inner_radius,
                *outer_radius,
                *start_angle,
                *end_angle,
                *color,
            )?
            .with_strokes(*stroke_inner, *stroke_outer)
            .with_stroke_width(*stroke_width)?
            .into(),
            EffectDef::ProgressPercent {
                center,
                radius,
                percent,
                color,
                stroke,
            } => ProgressCircleEffect::from_percent(point(*center), *radius, *percent, *color, *stroke)?
                .into(),
            EffectDef::Text {
                anchor,
                anchor_position,
                text,
                font,
                color,
                align,
            } => TextEffect::new(
                point(*anchor),
                *anchor_position,
                text.clone(),
                fonts.load(font)?,
                *color,
            )?
            .with_align(*align)
            .into(),
            EffectDef::BlockText {
                anchor,
                anchor_position,
                max_width,
                text,
                font,
                color,
                capitalize,
                align,
                trailing_threshold,
            } => BlockTextEffect::new(
                point(*anchor),
                *anchor_position,
                *max_width,
                text.clone(),
                fonts.load(font)?,
                *color,
            )?
            .with_capitalize(*capitalize)
            .with_align(*align)
            .with_trailing_threshold(*trailing_threshold)
            .into(),
        })
    }
}

fn point([x, y]: [f64; 2]) -> Point {
    Point::new(x, y)
}

struct FontLoader<'a> {
    root: &'a Path,
    bytes: HashMap<String, Arc<Vec<u8>>>,
}

impl<'a> FontLoader<'a> {
    fn new(root: &'a Path) -> Self {
        Self {
            root,
            bytes: HashMap::new(),
        }
    }

    fn load(&mut self, def: &FontDef) -> FxResult<Font> {
        let rel = normalize_rel_path(&def.source)?;
        if let Some(bytes) = self.bytes.get(&rel) {
            return Font::from_bytes(Arc::clone(bytes), def.size);
        }
        let path = self.root.join(&rel);
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read font '{}'", path.display()))?;
        let bytes = Arc::new(bytes);
        self.bytes.insert(rel, Arc::clone(&bytes));
        Font::from_bytes(bytes, def.size)
    }
}

/// Clean a document-relative path: forward slashes, no `.` segments, no escaping the root.
pub(crate) fn normalize_rel_path(source: &str) -> FxResult<String> {
    let unified = source.replace('\\', "/");
    if unified.starts_with('/') || unified.split('/').next().is_some_and(|p| p.contains(':')) {
        return Err(FxError::validation(format!(
            "font path '{source}' must be relative to the fonts root"
        )));
    }
    let parts = unified
        .split('/')
        .filter(|p| !p.is_empty() && *p != ".")
        .map(|p| {
            if p == ".." {
                Err(FxError::validation(format!(
                    "font path '{source}' must not contain '..'"
                )))
            } else {
                Ok(p)
            }
        })
        .collect::<FxResult<Vec<_>>>()?;
    if parts.is_empty() {
        return Err(FxError::validation(format!(
            "font path '{source}' does not name a file"
        )));
    }
    Ok(parts.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/document.rs"]
mod tests;
