//! Shareable URL fragment: `#l,c,h,a`.

use crate::format::fmt_num;
use oklch_core::{LchValue, OklchColor};

/// Encodes a value as `#l,c,h,a`.
///
/// ```
/// use oklch_color::to_fragment;
/// use oklch_core::LchValue;
///
/// assert_eq!(to_fragment(&LchValue::new(0.65, 0.15, 130.0, 1.0)), "#0.65,0.15,130,1");
/// ```
pub fn to_fragment(value: &LchValue) -> String {
    format!(
        "#{},{},{},{}",
        fmt_num(value.l),
        fmt_num(value.c),
        fmt_num(value.h),
        fmt_num(value.a)
    )
}

/// Decodes `#l,c,h[,a]`; the leading `#` is optional.
///
/// Hue wraps and chroma and alpha are clamped the same way as any other
/// [`OklchColor`]. Returns `None` for anything else, including hex colors.
pub fn parse_fragment(text: &str) -> Option<LchValue> {
    let body = text.trim();
    let body = body.strip_prefix('#').unwrap_or(body);
    let parts = body
        .split(',')
        .map(|s| s.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<_>>>()?;
    let (l, c, h, a) = match parts.as_slice() {
        [l, c, h] => (*l, *c, *h, 1.0),
        [l, c, h, a] => (*l, *c, *h, *a),
        _ => return None,
    };
    Some(LchValue::from_color(&OklchColor::new(l, c, h, a)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_roundtrip() {
        let value = LchValue::new(0.7, 0.1, 286.5, 0.25);
        assert_eq!(parse_fragment(&to_fragment(&value)), Some(value));
    }

    #[test]
    fn test_parse_fragment_forms() {
        assert_eq!(parse_fragment("0.5,0.1,20"), Some(LchValue::new(0.5, 0.1, 20.0, 1.0)));
        assert_eq!(parse_fragment("#0.5, 0.1, 370, 1").map(|v| v.h), Some(10.0));
        assert_eq!(parse_fragment("#0.5,0.1,20,2").map(|v| v.a), Some(1.0));
    }

    #[test]
    fn test_parse_fragment_rejects() {
        assert!(parse_fragment("#fff").is_none());
        assert!(parse_fragment("#1,2").is_none());
        assert!(parse_fragment("#1,2,3,4,5").is_none());
        assert!(parse_fragment("#0.5,x,20").is_none());
        assert!(parse_fragment("#0.5,inf,20").is_none());
    }
}
