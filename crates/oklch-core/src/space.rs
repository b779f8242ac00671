//! Display gamut classification.
//!
//! Gamuts nest: `sRGB ⊂ Display-P3 ⊂ Rec2020 ⊂ visible colors`. A color is
//! classified by the innermost gamut that contains it, so the enum order is
//! also the containment order.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Innermost display gamut containing a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum GamutSpace {
    /// Standard RGB
    Srgb = 0,
    /// Display-P3
    P3 = 1,
    /// ITU-R BT.2020
    Rec2020 = 2,
    /// Outside every supported gamut
    Out = 3,
}

impl GamutSpace {
    /// All spaces, innermost first.
    pub const ALL: [GamutSpace; 4] = [
        GamutSpace::Srgb,
        GamutSpace::P3,
        GamutSpace::Rec2020,
        GamutSpace::Out,
    ];

    /// Short identifier (`srgb`, `p3`, `rec2020`, `out`).
    pub fn id(&self) -> &'static str {
        match self {
            GamutSpace::Srgb => "srgb",
            GamutSpace::P3 => "p3",
            GamutSpace::Rec2020 => "rec2020",
            GamutSpace::Out => "out",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            GamutSpace::Srgb => "sRGB",
            GamutSpace::P3 => "P3",
            GamutSpace::Rec2020 => "Rec2020",
            GamutSpace::Out => "Out of gamut",
        }
    }

    /// Returns `true` if this gamut contains every color of `other`.
    #[inline]
    pub fn contains(&self, other: GamutSpace) -> bool {
        other <= *self
    }

    /// Returns `true` for any space except [`GamutSpace::Out`].
    #[inline]
    pub fn is_in_gamut(&self) -> bool {
        *self != GamutSpace::Out
    }

    /// Explanation shown when the display cannot render this space.
    pub fn unavailable_message(&self) -> Option<&'static str> {
        match self {
            GamutSpace::Srgb => None,
            GamutSpace::P3 => Some("P3 is not supported on this screen"),
            GamutSpace::Rec2020 => Some("Rec2020 is not supported on this screen"),
            GamutSpace::Out => Some("Out of any screen gamut"),
        }
    }
}

impl fmt::Display for GamutSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GamutSpace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "srgb" | "rgb" => Ok(GamutSpace::Srgb),
            "p3" | "display-p3" => Ok(GamutSpace::P3),
            "rec2020" | "rec-2020" => Ok(GamutSpace::Rec2020),
            "out" => Ok(GamutSpace::Out),
            _ => Err(Error::unknown_name("gamut", s)),
        }
    }
}

/// Wide gamuts the display can show.
///
/// Queried from the host at startup and whenever its capabilities change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    /// Display covers Display-P3
    pub p3: bool,
    /// Display covers Rec2020
    pub rec2020: bool,
}

impl Support {
    /// sRGB-only display.
    pub const SRGB_ONLY: Support = Support {
        p3: false,
        rec2020: false,
    };

    /// Creates a support value.
    #[inline]
    pub const fn new(p3: bool, rec2020: bool) -> Self {
        Self { p3, rec2020 }
    }

    /// Returns `true` if the display can show colors of `space`.
    pub fn can_display(&self, space: GamutSpace) -> bool {
        match space {
            GamutSpace::Srgb => true,
            GamutSpace::P3 => self.p3,
            GamutSpace::Rec2020 => self.rec2020,
            GamutSpace::Out => false,
        }
    }
}
