//! CSS color parsing.
//!
//! Supported syntax:
//!
//! - hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - the CSS named colors and `transparent`
//! - `rgb()`/`rgba()`, `hsl()`/`hsla()`, `hwb()`, `lab()`, `lch()`,
//!   `oklab()`, `oklch()` and `color(<space> ...)`
//!
//! Functions take the modern space-separated form with an optional
//! `/ alpha`, or the legacy comma-separated form. Components may be
//! `none`, percentages, or (for hue) angles in `deg`, `grad`, `rad` or
//! `turn`.
//!
//! Function bodies are tokenized with `cssparser`; numbers are then re-read
//! from the source text so components keep full `f64` precision.
//!
//! [`parse_anything`] adds the lenient forms users paste from stylesheets
//! and design tools.

use crate::color::Color;
use crate::error::{ColorError, ColorResult};
use crate::space::ColorSpace;
use cssparser::{Parser, ParserInput, Token};
use oklch_core::config::COLOR_FN;
use regex::Regex;
use std::f64::consts::PI;
use std::sync::LazyLock;
use tracing::trace;

type Reason = &'static str;

// ============================================================================
// Components
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Component {
    Number(f64),
    Percent(f64),
    /// Angle converted to degrees
    Angle(f64),
    None,
}

const ANGLE_UNITS: [(&str, f64); 4] = [
    ("deg", 1.0),
    ("grad", 0.9),
    ("rad", 180.0 / PI),
    ("turn", 360.0),
];

/// Reads the number at the head of `text` in full `f64` precision.
///
/// The tokenizer only keeps an `f32`, which would turn `0.65` into
/// `0.6499999761581421`.
fn exact(text: &str, fallback: f32) -> Result<f64, Reason> {
    let value = text.parse::<f64>().unwrap_or(f64::from(fallback));
    if value.is_finite() {
        Ok(value)
    } else {
        Err("malformed number")
    }
}

impl Component {
    fn read(parser: &mut Parser<'_, '_>) -> Result<Self, Reason> {
        parser.skip_whitespace();
        let start = parser.position();
        let token = parser.next().map_err(|_| "missing component")?.clone();
        let text = parser.slice_from(start);
        match token {
            Token::Number { value, .. } => exact(text, value).map(Component::Number),
            Token::Percentage { unit_value, .. } => {
                exact(text.trim_end_matches('%'), unit_value * 100.0).map(Component::Percent)
            }
            Token::Dimension {
                value, ref unit, ..
            } => {
                let (_, to_deg) = ANGLE_UNITS
                    .iter()
                    .find(|(name, _)| unit.eq_ignore_ascii_case(name))
                    .ok_or("unknown unit")?;
                let number = &text[..text.len() - unit.len()];
                exact(number, value).map(|v| Component::Angle(v * to_deg))
            }
            Token::Ident(ref ident) if ident.eq_ignore_ascii_case("none") => Ok(Component::None),
            _ => Err("malformed number"),
        }
    }

    /// Plain component; `100%` maps to `percent_ref`.
    fn plain(self, percent_ref: f64) -> Result<f64, Reason> {
        match self {
            Component::Number(v) => Ok(v),
            Component::Percent(p) => Ok(p / 100.0 * percent_ref),
            Component::None => Ok(0.0),
            Component::Angle(_) => Err("unexpected angle"),
        }
    }

    /// Hue in degrees, `NaN` for `none`.
    fn hue(self) -> Result<f64, Reason> {
        match self {
            Component::Number(v) | Component::Angle(v) => Ok(v),
            Component::None => Ok(f64::NAN),
            Component::Percent(_) => Err("hue cannot be a percentage"),
        }
    }

    fn alpha(self) -> Result<f64, Reason> {
        match self {
            Component::Number(v) => Ok(v.clamp(0.0, 1.0)),
            Component::Percent(p) => Ok((p / 100.0).clamp(0.0, 1.0)),
            Component::None => Ok(0.0),
            Component::Angle(_) => Err("alpha cannot be an angle"),
        }
    }
}

// ============================================================================
// Function arguments
// ============================================================================

struct Args {
    items: Vec<Component>,
    alpha: f64,
    legacy: bool,
}

impl Args {
    /// Reads the rest of a function body: components separated by spaces,
    /// or by commas in the legacy form, with an optional `/ alpha`.
    fn read(parser: &mut Parser<'_, '_>) -> Result<Self, Reason> {
        let mut items = Vec::new();
        let mut commas = 0;
        let mut slash = None;
        while !parser.is_exhausted() {
            if parser.try_parse(|p| p.expect_comma()).is_ok() {
                commas += 1;
                if items.len() != commas {
                    return Err("empty argument");
                }
            } else if parser.try_parse(|p| p.expect_delim('/')).is_ok() {
                if slash.is_some() {
                    return Err("expected a single alpha value after '/'");
                }
                slash = Some(items.len());
            } else {
                items.push(Component::read(parser)?);
            }
        }

        if commas > 0 {
            if slash.is_some() {
                return Err("mixed comma and slash separators");
            }
            if items.len() != commas + 1 {
                return Err("empty argument");
            }
            let alpha = match items.len() {
                3 => None,
                4 => items.pop(),
                _ => return Err("expected 3 or 4 comma-separated arguments"),
            };
            return Ok(Self {
                items,
                alpha: alpha.map_or(Ok(1.0), Component::alpha)?,
                legacy: true,
            });
        }

        let alpha = match slash {
            Some(at) if at + 1 == items.len() => items.pop(),
            Some(_) => return Err("expected a single alpha value after '/'"),
            None => None,
        };
        Ok(Self {
            items,
            alpha: alpha.map_or(Ok(1.0), Component::alpha)?,
            legacy: false,
        })
    }

    fn three(&self) -> Result<[Component; 3], Reason> {
        match self.items.as_slice() {
            [a, b, c] => Ok([*a, *b, *c]),
            _ => Err("expected 3 components"),
        }
    }
}

fn parse_function(name: &str, body: &str) -> Result<Color, Reason> {
    let mut input = ParserInput::new(body);
    let mut parser = Parser::new(&mut input);

    // color() names its space before the components
    let space = if name == "color" {
        let ident = parser
            .expect_ident_cloned()
            .map_err(|_| "expected a color space and 3 components")?;
        let space = ColorSpace::PREDEFINED
            .iter()
            .find(|(n, _)| ident.eq_ignore_ascii_case(n))
            .map(|(_, s)| *s)
            .ok_or("unknown color space")?;
        Some(space)
    } else {
        None
    };

    let args = Args::read(&mut parser)?;
    let a = args.alpha;

    let color = match name {
        "rgb" | "rgba" => {
            let [r, g, b] = args.three()?;
            let ch = |c: Component| c.plain(255.0).map(|v| v / 255.0);
            Color::new(ColorSpace::Srgb, [ch(r)?, ch(g)?, ch(b)?], a)
        }
        "hsl" | "hsla" | "hwb" => {
            if name == "hwb" && args.legacy {
                return Err("hwb() has no comma syntax");
            }
            let [h, x, y] = args.three()?;
            let pct = |c: Component| c.plain(100.0).map(|v| v / 100.0);
            let space = if name == "hwb" {
                ColorSpace::Hwb
            } else {
                ColorSpace::Hsl
            };
            Color::new(space, [h.hue()?, pct(x)?, pct(y)?], a)
        }
        "lab" | "oklab" | "lch" | "oklch" => {
            if args.legacy {
                return Err("comma syntax is only valid for rgb() and hsl()");
            }
            let [l, x, y] = args.three()?;
            let coords = match name {
                "lab" => [l.plain(100.0)?, x.plain(125.0)?, y.plain(125.0)?],
                "lch" => [l.plain(100.0)?, x.plain(150.0)?, y.hue()?],
                "oklab" => [l.plain(1.0)?, x.plain(0.4)?, y.plain(0.4)?],
                _ => [l.plain(1.0)?, x.plain(0.4)?, y.hue()?],
            };
            let space = match name {
                "lab" => ColorSpace::Lab,
                "lch" => ColorSpace::Lch,
                "oklab" => ColorSpace::Oklab,
                _ => ColorSpace::Oklch,
            };
            Color::new(space, coords, a)
        }
        "color" => {
            if args.legacy {
                return Err("color() has no comma syntax");
            }
            let [r, g, b] = args.three()?;
            let space = space.ok_or("unknown color space")?;
            Color::new(space, [r.plain(1.0)?, g.plain(1.0)?, b.plain(1.0)?], a)
        }
        _ => return Err("unknown color function"),
    };
    Ok(color)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let bytes: Vec<u8> = match hex.len() {
        3 | 4 => (0..hex.len())
            .map(|i| digit(i).map(|d| d * 17))
            .collect::<Option<_>>()?,
        6 | 8 => (0..hex.len() / 2)
            .map(|i| pair(2 * i))
            .collect::<Option<_>>()?,
        _ => return None,
    };
    let f = |b: u8| f64::from(b) / 255.0;
    let a = bytes.get(3).copied().map_or(1.0, f);
    Some(Color::srgb(f(bytes[0]), f(bytes[1]), f(bytes[2]), a))
}

// ============================================================================
// Entry points
// ============================================================================

/// Parses CSS color text, explaining failures.
///
/// ```
/// use oklch_color::{parse_css, ColorSpace};
///
/// let color = parse_css("oklch(65% 0.15 130 / 50%)").unwrap();
/// assert_eq!(color.space, ColorSpace::Oklch);
/// assert_eq!(color.coords, [0.65, 0.15, 130.0]);
/// assert_eq!(color.alpha, 0.5);
/// ```
pub fn parse_css(text: &str) -> ColorResult<Color> {
    let input = text.trim();
    let lower = input.to_ascii_lowercase();
    let err = |reason: &str| ColorError::parse(input, reason);

    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| err("malformed hex color"));
    }
    if lower == "transparent" {
        return Ok(Color::srgb(0.0, 0.0, 0.0, 0.0));
    }
    if let Ok((r, g, b)) = cssparser::color::parse_named_color(&lower) {
        let f = |v: u8| f64::from(v) / 255.0;
        return Ok(Color::srgb(f(r), f(g), f(b), 1.0));
    }

    let Some(open) = lower.find('(') else {
        return Err(err("unknown color name"));
    };
    let name = lower[..open].trim_end();
    let body = lower[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| err("missing closing parenthesis"))?;
    parse_function(name, body).map_err(err)
}

/// Parses CSS color text, returning `None` on failure.
#[inline]
pub fn parse(text: &str) -> Option<Color> {
    parse_css(text).ok()
}

static TRAILING_SEMICOLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*;\s*$").expect("valid regex"));

static PROPERTY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w-]+:\s*(#\w+|\w+\([^)]+\))$").expect("valid regex")
});

static BARE_TRIPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[\d.]+%?\s+[\d.]+\s+[\d.]+\s*$").expect("valid regex")
});

/// Parses color text with lenient extensions.
///
/// On top of [`parse`]:
///
/// - a trailing `;` is dropped
/// - a `property: ` prefix is dropped when a hex color or a color function
///   follows (`color: #fff`, `--accent: oklch(...)`)
/// - three bare numbers, the first optionally a percentage, are read as
///   `oklch(L C H)`
///
/// ```
/// use oklch_color::{parse_anything, ColorSpace};
///
/// let color = parse_anything("background: oklch(0.7 0.1 286);").unwrap();
/// assert_eq!(color.coords, [0.7, 0.1, 286.0]);
///
/// let bare = parse_anything("70% 0.1 286").unwrap();
/// assert_eq!(bare.space, ColorSpace::Oklch);
/// ```
pub fn parse_anything(text: &str) -> Option<Color> {
    let mut value = TRAILING_SEMICOLON.replace(text, "").into_owned();
    if let Some(caps) = PROPERTY_PREFIX.captures(&value) {
        value = caps[1].to_string();
    }
    if BARE_TRIPLE.is_match(&value) {
        value = format!("{COLOR_FN}({value})");
    }
    let parsed = parse_css(&value);
    if let Err(e) = &parsed {
        trace!(error = %e, "parse_anything");
    }
    parsed.ok()
}
