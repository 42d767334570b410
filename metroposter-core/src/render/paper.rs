use crate::foundation::error::{PosterError, PosterResult};

/// Fixed aspect-ratio key selecting the logical canvas dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaperSize {
    /// 1:1 square.
    Square,
    /// 2:3 portrait.
    TwoByThree,
    /// 3:4 portrait (the default).
    ThreeByFour,
    /// 4:5 portrait.
    FourByFive,
    /// DIN A-series (1:√2) portrait.
    Din,
    /// 9:16 phone wallpaper.
    NineBySixteen,
    /// 9:19.5 tall lockscreen; triggers the top blur-fade and the taller top
    /// gradient.
    Lockscreen,
}

impl PaperSize {
    /// Fallback for unknown keys.
    pub const DEFAULT: PaperSize = PaperSize::ThreeByFour;

    /// All supported sizes.
    pub const ALL: [PaperSize; 7] = [
        PaperSize::Square,
        PaperSize::TwoByThree,
        PaperSize::ThreeByFour,
        PaperSize::FourByFive,
        PaperSize::Din,
        PaperSize::NineBySixteen,
        PaperSize::Lockscreen,
    ];

    /// Resolve an aspect-ratio key; unknown keys fall back to
    /// [`PaperSize::DEFAULT`].
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "1:1" => PaperSize::Square,
            "2:3" => PaperSize::TwoByThree,
            "3:4" => PaperSize::ThreeByFour,
            "4:5" => PaperSize::FourByFive,
            "DIN" => PaperSize::Din,
            "9:16" => PaperSize::NineBySixteen,
            "9:19.5" => PaperSize::Lockscreen,
            _ => PaperSize::DEFAULT,
        }
    }

    /// The request key for this size.
    pub fn key(self) -> &'static str {
        match self {
            PaperSize::Square => "1:1",
            PaperSize::TwoByThree => "2:3",
            PaperSize::ThreeByFour => "3:4",
            PaperSize::FourByFive => "4:5",
            PaperSize::Din => "DIN",
            PaperSize::NineBySixteen => "9:16",
            PaperSize::Lockscreen => "9:19.5",
        }
    }

    /// Logical canvas size in inches, `(width, height)`.
    pub fn size_inches(self) -> (f64, f64) {
        match self {
            PaperSize::Square => (12.0, 12.0),
            PaperSize::TwoByThree => (12.0, 18.0),
            PaperSize::ThreeByFour => (12.0, 16.0),
            PaperSize::FourByFive => (12.0, 15.0),
            PaperSize::Din => (12.0, 12.0 * 1.414),
            PaperSize::NineBySixteen => (9.0, 16.0),
            PaperSize::Lockscreen => (9.0, 19.5),
        }
    }

    /// Width over height.
    pub fn ratio(self) -> f64 {
        let (w, h) = self.size_inches();
        w / h
    }
}

/// Output resolution, restricted to the supported fixed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dpi {
    /// 72 dpi (screen preview).
    Dpi72,
    /// 150 dpi (draft print).
    Dpi150,
    /// 300 dpi (print quality, the default).
    Dpi300,
}

impl Dpi {
    /// The default output resolution.
    pub const DEFAULT: Dpi = Dpi::Dpi300;

    /// Numeric dots-per-inch value.
    pub fn value(self) -> u32 {
        match self {
            Dpi::Dpi72 => 72,
            Dpi::Dpi150 => 150,
            Dpi::Dpi300 => 300,
        }
    }

    /// Validate a caller-provided numeric dpi.
    pub fn from_value(value: u32) -> PosterResult<Self> {
        match value {
            72 => Ok(Dpi::Dpi72),
            150 => Ok(Dpi::Dpi150),
            300 => Ok(Dpi::Dpi300),
            other => Err(PosterError::validation(format!(
                "dpi {other} unsupported; expected one of 72, 150, 300"
            ))),
        }
    }

    /// Convert a length in points to pixels at this resolution.
    pub fn pt_to_px(self, pt: f64) -> f64 {
        pt * f64::from(self.value()) / 72.0
    }
}

/// Pixel dimensions of the output raster for a paper size at a resolution.
pub fn pixel_dims(paper: PaperSize, dpi: Dpi) -> (u32, u32) {
    let (w_in, h_in) = paper.size_inches();
    let d = f64::from(dpi.value());
    ((w_in * d).round() as u32, (h_in * d).round() as u32)
}
