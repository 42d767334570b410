use crate::foundation::color::Color;
use crate::overlay::gradient::GradientFade;
use crate::overlay::text::{FontRole, PosterLabels};
use crate::theme::model::Theme;

/// Horizontal placement of a text line relative to its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    /// Anchor is the center of the line.
    Center,
    /// Anchor is the right edge of the line.
    Right,
}

/// Anchor in canvas fractions; `y_frac` is measured up from the bottom edge,
/// the way the poster layout is specified.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    /// Horizontal position as a fraction of canvas width.
    pub x_frac: f64,
    /// Vertical position as a fraction of canvas height from the bottom.
    pub y_frac: f64,
    /// Horizontal alignment against the anchor.
    pub align: HAlign,
}

/// One text line of the overlay.
#[derive(Clone, Debug)]
pub struct TextSpec {
    /// Line content.
    pub text: String,
    /// Font weight role.
    pub role: FontRole,
    /// Size in points (scaled by the output dpi).
    pub size_pt: f64,
    /// Text color before `alpha` is applied.
    pub color: Color,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
    /// Placement.
    pub anchor: Anchor,
}

/// A short horizontal divider rule.
#[derive(Clone, Copy, Debug)]
pub struct RuleSpec {
    /// Left end as a fraction of canvas width.
    pub x0_frac: f64,
    /// Right end as a fraction of canvas width.
    pub x1_frac: f64,
    /// Vertical position as a fraction of canvas height from the bottom.
    pub y_frac: f64,
    /// Line width in points.
    pub width_pt: f64,
    /// Rule color.
    pub color: Color,
}

/// Everything drawn above the map layers: fades, divider rules, typography.
#[derive(Clone, Debug, Default)]
pub struct OverlaySpec {
    /// Gradient fades, drawn below the text.
    pub fades: Vec<GradientFade>,
    /// Divider rules.
    pub rules: Vec<RuleSpec>,
    /// Text lines.
    pub texts: Vec<TextSpec>,
}

impl OverlaySpec {
    /// An overlay that draws nothing.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// The fixed typography block: bottom-anchored city headline, country,
/// coordinate line, divider rule, and the attribution bottom-right.
pub fn typography_overlay(
    labels: &PosterLabels,
    theme: &Theme,
    fades: Vec<GradientFade>,
) -> OverlaySpec {
    let center = |y_frac: f64| Anchor {
        x_frac: 0.5,
        y_frac,
        align: HAlign::Center,
    };

    OverlaySpec {
        fades,
        rules: vec![RuleSpec {
            x0_frac: 0.4,
            x1_frac: 0.6,
            y_frac: 0.125,
            width_pt: 1.0,
            color: theme.text,
        }],
        texts: vec![
            TextSpec {
                text: labels.city.clone(),
                role: FontRole::Bold,
                size_pt: 60.0,
                color: theme.text,
                alpha: 1.0,
                anchor: center(0.14),
            },
            TextSpec {
                text: labels.country.clone(),
                role: FontRole::Light,
                size_pt: 22.0,
                color: theme.text,
                alpha: 1.0,
                anchor: center(0.10),
            },
            TextSpec {
                text: labels.coords.clone(),
                role: FontRole::Regular,
                size_pt: 14.0,
                color: theme.text,
                alpha: 0.7,
                anchor: center(0.07),
            },
            TextSpec {
                text: labels.attribution.clone(),
                role: FontRole::Light,
                size_pt: 8.0,
                color: theme.text,
                alpha: 0.5,
                anchor: Anchor {
                    x_frac: 0.98,
                    y_frac: 0.02,
                    align: HAlign::Right,
                },
            },
        ],
    }
}
