use crate::foundation::color::Color;
use crate::render::paper::PaperSize;
use crate::theme::model::Theme;

/// Default fraction of canvas height covered by a fade gradient.
pub const DEFAULT_FADE_FRACTION: f64 = 0.25;

/// Top fade fraction for the lockscreen paper size, enlarged so the fade
/// clears device UI overlap.
pub const LOCKSCREEN_TOP_FADE_FRACTION: f64 = 0.40;

/// Canvas edge a fade gradient is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeEdge {
    /// Opaque at the very top, transparent at the bottom of the zone.
    Top,
    /// Opaque at the very bottom, transparent at the top of the zone.
    Bottom,
}

/// An alpha-blended linear gradient near one canvas edge, used to keep the
/// typography legible over dense map content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientFade {
    /// Anchored edge.
    pub edge: FadeEdge,
    /// Gradient color (alpha ramps from opaque at the edge to fully
    /// transparent at the inner end of the zone).
    pub color: Color,
    /// Fraction of canvas height the gradient spans.
    pub fraction: f64,
}

impl GradientFade {
    /// Zone covered on a canvas of `height_px`: `(top_y, zone_height)`.
    pub fn zone_px(&self, height_px: u32) -> (u32, u32) {
        let zone = ((f64::from(height_px) * self.fraction).round() as u32).min(height_px);
        match self.edge {
            FadeEdge::Top => (0, zone),
            FadeEdge::Bottom => (height_px - zone, zone),
        }
    }

    /// Premultiplied RGBA8 pixels of the vertical alpha ramp, row-major over
    /// a `w` x `h` zone.
    pub(crate) fn ramp_premul_bytes(&self, w: u32, h: u32) -> Vec<u8> {
        let mut bytes = vec![0u8; (w as usize) * (h as usize) * 4];
        let h1 = (h.max(1) - 1) as f64;
        for row in 0..h {
            let t = if h1 <= 0.0 { 0.0 } else { f64::from(row) / h1 };
            let alpha = match self.edge {
                FadeEdge::Top => 1.0 - t,
                FadeEdge::Bottom => t,
            };
            let px = self.color.premul_bytes((alpha * 255.0).round() as u8);
            for col in 0..w {
                let idx = ((row as usize) * (w as usize) + (col as usize)) * 4;
                bytes[idx..idx + 4].copy_from_slice(&px);
            }
        }
        bytes
    }
}

/// The fade pair for one poster: bottom fade plus a top fade whose span
/// depends on the paper size.
pub fn gradient_fades(theme: &Theme, paper: PaperSize) -> [GradientFade; 2] {
    let top_fraction = if paper == PaperSize::Lockscreen {
        LOCKSCREEN_TOP_FADE_FRACTION
    } else {
        DEFAULT_FADE_FRACTION
    };
    [
        GradientFade {
            edge: FadeEdge::Bottom,
            color: theme.gradient_color,
            fraction: DEFAULT_FADE_FRACTION,
        },
        GradientFade {
            edge: FadeEdge::Top,
            color: theme.gradient_color,
            fraction: top_fraction,
        },
    ]
}
