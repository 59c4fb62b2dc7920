//! Small sRGB helper used by the action bar to blend button colors
//! toward their accent as a swipe progresses.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (leading `#` optional). Returns `None` on anything else.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
        let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
        let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Linear blend from `self` toward `other`; `t` is clamped to [0, 1].
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| -> u8 {
            let value = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            value.round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }

    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#1fc773"), Some(Rgb::new(0x1f, 0xc7, 0x73)));
        assert_eq!(Rgb::from_hex("ff3b62"), Some(Rgb::new(0xff, 0x3b, 0x62)));
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("zzzzzz"), None);
    }

    #[test]
    fn mix_endpoints_and_midpoint() {
        let white = Rgb::new(255, 255, 255);
        let green = Rgb::new(0x1f, 0xc7, 0x73);
        assert_eq!(white.mix(green, 0.0), white);
        assert_eq!(white.mix(green, 1.0), green);
        let mid = white.mix(Rgb::new(0, 0, 0), 0.5);
        assert_eq!(mid, Rgb::new(128, 128, 128));
    }

    #[test]
    fn mix_clamps_t() {
        let white = Rgb::new(255, 255, 255);
        let red = Rgb::new(255, 0, 0);
        assert_eq!(white.mix(red, 2.5), red);
        assert_eq!(white.mix(red, -1.0), white);
    }

    #[test]
    fn css_format() {
        assert_eq!(Rgb::new(255, 88, 100).to_css(), "rgb(255, 88, 100)");
    }
}
