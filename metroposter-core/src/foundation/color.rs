use crate::foundation::math::mul_div255;

/// Straight (non-premultiplied) RGBA8 color.
///
/// Theme files spell colors as `#RRGGBB` or `#RRGGBBAA` hex strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` / `#RRGGBBAA` (leading `#` optional, case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> Result<u8, String> {
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
        }

        match s.len() {
            6 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: 255,
            }),
            8 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: hex_byte(&s[6..8])?,
            }),
            _ => Err("hex color must be #RRGGBB or #RRGGBBAA".to_owned()),
        }
    }

    /// Scale the alpha channel by `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        let scaled = (f32::from(self.a) * alpha.clamp(0.0, 1.0)).round() as u8;
        Self { a: scaled, ..self }
    }

    /// Premultiplied RGBA bytes for this color at the given extra alpha.
    pub(crate) fn premul_bytes(self, alpha: u8) -> [u8; 4] {
        let a = mul_div255(u16::from(self.a), u16::from(alpha));
        [
            mul_div255(u16::from(self.r), u16::from(a)),
            mul_div255(u16::from(self.g), u16::from(a)),
            mul_div255(u16::from(self.b), u16::from(a)),
            a,
        ]
    }
}

impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let s = if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        };
        serializer.serialize_str(&s)
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_rgb_and_rgba() {
        assert_eq!(Color::from_hex("#FF5722").unwrap(), Color::rgb(255, 87, 34));
        assert_eq!(
            Color::from_hex("0000ff80").unwrap(),
            Color::rgba(0, 0, 255, 128)
        );
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
    }

    #[test]
    fn serde_roundtrips_through_hex_strings() {
        let c: Color = serde_json::from_str("\"#C0C0C0\"").unwrap();
        assert_eq!(c, Color::rgb(192, 192, 192));
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#C0C0C0\"");
    }

    #[test]
    fn alpha_scaling_and_premul() {
        let c = Color::rgb(200, 100, 0).with_alpha(0.5);
        assert_eq!(c.a, 128);

        let px = Color::rgb(255, 255, 255).premul_bytes(127);
        assert_eq!(px, [127, 127, 127, 127]);
        let px = Color::rgb(10, 20, 30).premul_bytes(0);
        assert_eq!(px, [0, 0, 0, 0]);
    }
}
