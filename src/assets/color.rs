use crate::foundation::core::Rgba8;
use serde::{Deserialize, Serialize};

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&to_hex(*self))
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            RgbaObj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "one")]
                a: f32,
            },
            Arr(Vec<u8>),
        }

        fn one() -> f32 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => parse_color(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Rgba8::with_alpha_f(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Rgba8::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Rgba8::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

/// Parse `#RRGGBB`, `#RRGGBBAA`, `rgb(r,g,b)` or `rgba(r,g,b,alpha)`.
pub fn parse_color(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    if let Some(body) = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_css_function(body);
    }
    parse_hex(s)
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }
    match s.len() {
        6 => Ok(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

fn parse_css_function(body: &str) -> Result<Rgba8, String> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let channel = |p: &str| -> Result<u8, String> {
        p.parse::<u8>()
            .map_err(|_| format!("invalid colour channel \"{p}\""))
    };
    match parts.as_slice() {
        [r, g, b] => Ok(Rgba8::rgb(channel(*r)?, channel(*g)?, channel(*b)?)),
        [r, g, b, a] => {
            let alpha = a
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("invalid alpha \"{a}\""))?;
            Ok(Rgba8::with_alpha_f(
                channel(*r)?,
                channel(*g)?,
                channel(*b)?,
                alpha,
            ))
        }
        _ => Err("css colour must have 3 or 4 components".to_owned()),
    }
}

fn to_hex(c: Rgba8) -> String {
    if c.a == 255 {
        format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", c.r, c.g, c.b, c.a)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
