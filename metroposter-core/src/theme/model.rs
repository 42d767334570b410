use crate::foundation::color::Color;

/// A named color-and-label palette driving every styled draw in the pipeline.
///
/// Loaded once per generation run and passed explicitly into the compositor,
/// overlay, and post-processor; never held as shared state.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Theme {
    /// Display name shown by theme listings.
    #[serde(default)]
    pub name: Option<String>,
    /// Free-text description shown by theme listings.
    #[serde(default)]
    pub description: Option<String>,
    /// Canvas background.
    pub bg: Color,
    /// Typography color.
    pub text: Color,
    /// Color of the top/bottom fade gradients.
    pub gradient_color: Color,
    /// Water polygon fill.
    pub water: Color,
    /// Park polygon fill.
    pub parks: Color,
    /// Motorway-tier road stroke.
    pub road_motorway: Color,
    /// Trunk/primary-tier road stroke.
    pub road_primary: Color,
    /// Secondary-tier road stroke.
    pub road_secondary: Color,
    /// Tertiary-tier road stroke.
    pub road_tertiary: Color,
    /// Residential-tier road stroke.
    pub road_residential: Color,
    /// Stroke for any road outside the named tiers.
    pub road_default: Color,
    /// Transit line stroke; falls back to `road_primary` when absent.
    #[serde(default)]
    pub subway: Option<Color>,
}

impl Theme {
    /// The embedded grayscale, high-contrast fallback palette.
    ///
    /// Substituted whenever a requested theme cannot be loaded; generation
    /// never hard-fails on a missing theme.
    pub fn fallback() -> Self {
        Self {
            name: Some("Feature-Based Shading".to_owned()),
            description: None,
            bg: Color::rgb(0xFF, 0xFF, 0xFF),
            text: Color::rgb(0x00, 0x00, 0x00),
            gradient_color: Color::rgb(0xFF, 0xFF, 0xFF),
            water: Color::rgb(0xC0, 0xC0, 0xC0),
            parks: Color::rgb(0xF0, 0xF0, 0xF0),
            road_motorway: Color::rgb(0x0A, 0x0A, 0x0A),
            road_primary: Color::rgb(0x1A, 0x1A, 0x1A),
            road_secondary: Color::rgb(0x2A, 0x2A, 0x2A),
            road_tertiary: Color::rgb(0x3A, 0x3A, 0x3A),
            road_residential: Color::rgb(0x4A, 0x4A, 0x4A),
            road_default: Color::rgb(0x3A, 0x3A, 0x3A),
            subway: Some(Color::rgb(0xFF, 0x57, 0x22)),
        }
    }

    /// Transit stroke color with the `road_primary` fallback applied.
    pub fn subway_color(&self) -> Color {
        self.subway.unwrap_or(self.road_primary)
    }
}
