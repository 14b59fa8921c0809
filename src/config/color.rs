use crate::foundation::core::Rgba8Premul;
use serde::{Deserialize, Serialize};

/// A color in normalized straight-alpha RGBA.
///
/// Deserializes from `"#RRGGBB"`, `"#RRGGBBAA"`, `"#RGB"`, `{ "r", "g", "b", "a"? }` or
/// `[r, g, b]` / `[r, g, b, a]` with channels in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorDef {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl ColorDef {
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        parse_hex(s)
    }

    /// Straight-alpha RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }

    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        let [r, g, b, a] = self.to_rgba8();
        Rgba8Premul::from_straight_rgba(r, g, b, a)
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl Serialize for ColorDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgba(*r, *g, *b, 1.0)),
                [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<ColorDef, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(format!("invalid hex color \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    let (r, g, b, a) = match s.len() {
        3 => {
            let r = hex_byte(&s[0..1].repeat(2))?;
            let g = hex_byte(&s[1..2].repeat(2))?;
            let b = hex_byte(&s[2..3].repeat(2))?;
            (r, g, b, 255)
        }
        6 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            (r, g, b, 255)
        }
        8 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            let a = hex_byte(&s[6..8])?;
            (r, g, b, a)
        }
        _ => {
            return Err(
                "hex color must be #RGB, #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned(),
            );
        }
    };

    Ok(ColorDef::rgba(
        (r as f64) / 255.0,
        (g as f64) / 255.0,
        (b as f64) / 255.0,
        (a as f64) / 255.0,
    ))
}
