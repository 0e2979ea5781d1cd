use std::collections::HashMap;

use crate::foundation::color::Color;
use crate::foundation::core::Size;
use crate::foundation::error::{FxError, FxResult};
use crate::text::font::Font;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Color> for TextBrushRgba8 {
    fn from(c: Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Stateful helper for building Parley text layouts from raw font bytes.
///
/// Fonts are registered once per content fingerprint; later layouts reuse the registered family.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: HashMap<u64, String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family_for(&mut self, font: &Font) -> FxResult<String> {
        if let Some(name) = self.families.get(&font.fingerprint()) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.data().as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| FxError::validation("no font families registered from font bytes"))?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| FxError::validation("registered font family has no name"))?
            .to_string();

        self.families
            .insert(font.fingerprint(), family_name.clone());
        Ok(family_name)
    }

    /// Shape and lay out plain text. Lines break only at explicit newlines.
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        font: &Font,
        brush: TextBrushRgba8,
    ) -> FxResult<parley::Layout<TextBrushRgba8>> {
        let family_name = self.family_for(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px()));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Size of the laid out text block.
    pub(crate) fn measure(&mut self, text: &str, font: &Font) -> FxResult<Size> {
        if text.is_empty() {
            return Ok(Size::ZERO);
        }
        let layout = self.layout_plain(text, font, TextBrushRgba8::default())?;
        Ok(Size::new(
            f64::from(layout.width()),
            f64::from(layout.height()),
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
