//! Color spaces understood by the parser and the conversion graph.

use oklch_core::Error;
use std::fmt;
use std::str::FromStr;

/// A CSS Color 4 color space.
///
/// RGB spaces store encoded channels in `[0, 1]` when in gamut. `hsl` and
/// `hwb` store hue in degrees and the other two components in `[0, 1]`.
/// `lab`/`lch` use CSS ranges (L in `0..=100`), `oklab`/`oklch` use L in
/// `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// sRGB, the web default
    Srgb,
    /// sRGB primaries with linear encoding
    SrgbLinear,
    /// Display P3
    DisplayP3,
    /// ITU-R BT.2020
    Rec2020,
    /// Adobe RGB (1998)
    A98Rgb,
    /// ProPhoto RGB (D50)
    ProphotoRgb,
    /// CIE XYZ relative to D65
    XyzD65,
    /// CIE XYZ relative to D50
    XyzD50,
    /// Hue, saturation, lightness over sRGB
    Hsl,
    /// Hue, whiteness, blackness over sRGB
    Hwb,
    /// CIELAB (D50)
    Lab,
    /// CIE LCh (D50)
    Lch,
    /// OKLab
    Oklab,
    /// OKLCH
    Oklch,
}

impl ColorSpace {
    /// Spaces accepted inside `color()`, with their CSS names.
    pub const PREDEFINED: [(&'static str, ColorSpace); 9] = [
        ("srgb", ColorSpace::Srgb),
        ("srgb-linear", ColorSpace::SrgbLinear),
        ("display-p3", ColorSpace::DisplayP3),
        ("rec2020", ColorSpace::Rec2020),
        ("a98-rgb", ColorSpace::A98Rgb),
        ("prophoto-rgb", ColorSpace::ProphotoRgb),
        ("xyz", ColorSpace::XyzD65),
        ("xyz-d65", ColorSpace::XyzD65),
        ("xyz-d50", ColorSpace::XyzD50),
    ];

    /// CSS identifier of this space.
    pub fn css_name(&self) -> &'static str {
        match self {
            ColorSpace::Srgb => "srgb",
            ColorSpace::SrgbLinear => "srgb-linear",
            ColorSpace::DisplayP3 => "display-p3",
            ColorSpace::Rec2020 => "rec2020",
            ColorSpace::A98Rgb => "a98-rgb",
            ColorSpace::ProphotoRgb => "prophoto-rgb",
            ColorSpace::XyzD65 => "xyz-d65",
            ColorSpace::XyzD50 => "xyz-d50",
            ColorSpace::Hsl => "hsl",
            ColorSpace::Hwb => "hwb",
            ColorSpace::Lab => "lab",
            ColorSpace::Lch => "lch",
            ColorSpace::Oklab => "oklab",
            ColorSpace::Oklch => "oklch",
        }
    }

    /// Returns `true` for spaces with red, green and blue channels.
    pub const fn is_rgb(&self) -> bool {
        matches!(
            self,
            ColorSpace::Srgb
                | ColorSpace::SrgbLinear
                | ColorSpace::DisplayP3
                | ColorSpace::Rec2020
                | ColorSpace::A98Rgb
                | ColorSpace::ProphotoRgb
        )
    }

    /// Returns `true` if the space is serialized through `color()`.
    pub const fn is_predefined(&self) -> bool {
        self.is_rgb() || matches!(self, ColorSpace::XyzD65 | ColorSpace::XyzD50)
    }

    /// Index of the hue component, if the space has one.
    pub const fn hue_index(&self) -> Option<usize> {
        match self {
            ColorSpace::Hsl | ColorSpace::Hwb => Some(0),
            ColorSpace::Lch | ColorSpace::Oklch => Some(2),
            _ => None,
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

impl FromStr for ColorSpace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::PREDEFINED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, space)| *space)
            .or(match name.as_str() {
                "rgb" => Some(ColorSpace::Srgb),
                "p3" => Some(ColorSpace::DisplayP3),
                "hsl" => Some(ColorSpace::Hsl),
                "hwb" => Some(ColorSpace::Hwb),
                "lab" => Some(ColorSpace::Lab),
                "lch" => Some(ColorSpace::Lch),
                "oklab" => Some(ColorSpace::Oklab),
                "oklch" => Some(ColorSpace::Oklch),
                _ => None,
            })
            .ok_or_else(|| Error::unknown_name("color space", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for (name, space) in ColorSpace::PREDEFINED {
            assert_eq!(name.parse::<ColorSpace>().unwrap(), space);
            assert!(space.is_predefined());
        }
        assert_eq!("OKLCH".parse::<ColorSpace>().unwrap(), ColorSpace::Oklch);
        assert!("cmyk".parse::<ColorSpace>().unwrap_err().is_unknown_name());
    }

    #[test]
    fn test_hue_index() {
        assert_eq!(ColorSpace::Oklch.hue_index(), Some(2));
        assert_eq!(ColorSpace::Hsl.hue_index(), Some(0));
        assert_eq!(ColorSpace::Oklab.hue_index(), None);
    }
}
