use std::borrow::Cow;
use std::path::Path;

use tracing::warn;

use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::geo::{LatLng, format_coord};

/// Attribution line rendered bottom-right on every poster.
pub const ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Weight role a text element asks for; maps to a poster font file or, in
/// fallback mode, to a weight on the generic monospace family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontRole {
    /// Headline weight (city name).
    Bold,
    /// Body weight (coordinates).
    Regular,
    /// Light weight (country, attribution).
    Light,
}

impl FontRole {
    fn file_name(self) -> &'static str {
        match self {
            FontRole::Bold => "Roboto-Bold.ttf",
            FontRole::Regular => "Roboto-Regular.ttf",
            FontRole::Light => "Roboto-Light.ttf",
        }
    }

    fn weight(self) -> parley::style::FontWeight {
        match self {
            FontRole::Bold => parley::style::FontWeight::new(700.0),
            FontRole::Regular => parley::style::FontWeight::new(400.0),
            FontRole::Light => parley::style::FontWeight::new(300.0),
        }
    }
}

struct FontFiles {
    bold: Vec<u8>,
    regular: Vec<u8>,
    light: Vec<u8>,
}

impl FontFiles {
    fn read(dir: &Path) -> Result<Self, String> {
        let read = |role: FontRole| -> Result<Vec<u8>, String> {
            let path = dir.join(role.file_name());
            std::fs::read(&path).map_err(|e| format!("'{}': {e}", path.display()))
        };
        Ok(Self {
            bold: read(FontRole::Bold)?,
            regular: read(FontRole::Regular)?,
            light: read(FontRole::Light)?,
        })
    }

    fn bytes_for(&self, role: FontRole) -> &[u8] {
        match role {
            FontRole::Bold => &self.bold,
            FontRole::Regular => &self.regular,
            FontRole::Light => &self.light,
        }
    }
}

/// The poster font set with its fallback policy applied.
///
/// When any of the three weight files is unavailable the library falls back
/// to the generic monospace family as a whole; font trouble must never abort
/// rendering.
pub struct FontLibrary {
    files: Option<FontFiles>,
}

impl FontLibrary {
    /// Load the poster fonts from `dir`, falling back to generic monospace.
    pub fn load(dir: &Path) -> Self {
        match FontFiles::read(dir) {
            Ok(files) => Self { files: Some(files) },
            Err(reason) => {
                warn!(%reason, "poster fonts unavailable, falling back to monospace");
                Self { files: None }
            }
        }
    }

    /// A library that always uses the generic monospace fallback.
    pub fn fallback() -> Self {
        Self { files: None }
    }

    /// Whether the generic monospace fallback is in effect.
    pub fn uses_fallback(&self) -> bool {
        self.files.is_none()
    }

    fn bytes_for(&self, role: FontRole) -> Option<&[u8]> {
        self.files.as_ref().map(|f| f.bytes_for(role))
    }
}

/// RGBA8 brush carried through parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrush {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Stateful builder for parley text layouts.
pub struct TypeEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
}

impl Default for TypeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeEngine {
    /// Engine with fresh parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape and lay out a single-line text run.
    pub fn layout(
        &mut self,
        text: &str,
        fonts: &FontLibrary,
        role: FontRole,
        size_px: f32,
        brush: TextBrush,
    ) -> PosterResult<parley::Layout<TextBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PosterError::validation("text size must be finite and > 0"));
        }

        let registered_family = match fonts.bytes_for(role) {
            Some(bytes) => {
                let families = self.font_ctx.collection.register_fonts(
                    parley::fontique::Blob::from(bytes.to_vec()),
                    None,
                );
                let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                    PosterError::render("no font families registered from font bytes")
                })?;
                let name = self
                    .font_ctx
                    .collection
                    .family_name(family_id)
                    .ok_or_else(|| PosterError::render("registered font family has no name"))?
                    .to_string();
                Some(name)
            }
            None => None,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        match registered_family {
            Some(name) => {
                builder.push_default(parley::style::StyleProperty::FontStack(
                    parley::style::FontStack::Source(Cow::Owned(name)),
                ));
            }
            None => {
                builder.push_default(parley::style::StyleProperty::FontStack(
                    parley::style::FontStack::Single(parley::style::FontFamily::Generic(
                        parley::style::GenericFamily::Monospace,
                    )),
                ));
                builder.push_default(parley::style::StyleProperty::FontWeight(role.weight()));
            }
        }
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// The four text lines of the typography block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PosterLabels {
    /// Letter-spaced, upper-cased city name.
    pub city: String,
    /// Upper-cased country name.
    pub country: String,
    /// Formatted coordinate line.
    pub coords: String,
    /// Attribution line.
    pub attribution: String,
}

/// Build the text content of the typography block.
pub fn poster_labels(city: &str, country: &str, point: LatLng) -> PosterLabels {
    PosterLabels {
        city: letter_space(&city.to_uppercase()),
        country: country.to_uppercase(),
        coords: format_coord(point),
        attribution: ATTRIBUTION.to_owned(),
    }
}

/// Spread a string with two spaces between every character.
pub fn letter_space(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for (i, ch) in s.chars().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push(ch);
    }
    out
}
