//! Colores de resaltado

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Color RGB de resaltado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const YELLOW: Color = Color::rgb(0xff, 0xff, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Colores con nombre aceptados además de la notación hexadecimal
    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "yellow" | "amarillo" => Color::YELLOW,
            "white" | "blanco" => Color::WHITE,
            "green" | "verde" => Color::rgb(0x00, 0xff, 0x00),
            "cyan" | "cian" => Color::rgb(0x00, 0xff, 0xff),
            "pink" | "rosa" => Color::rgb(0xff, 0xaf, 0xaf),
            "orange" | "naranja" => Color::rgb(0xff, 0xc8, 0x00),
            "red" | "rojo" => Color::rgb(0xff, 0x00, 0x00),
            "blue" | "azul" => Color::rgb(0x00, 0x00, 0xff),
            "magenta" => Color::rgb(0xff, 0x00, 0xff),
            "gray" | "grey" | "gris" => Color::rgb(0x80, 0x80, 0x80),
            _ => return None,
        };
        Some(color)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::YELLOW
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();
        if let Some(color) = Self::named(&lower) {
            return Ok(color);
        }

        let hex = lower.strip_prefix('#').unwrap_or(&lower);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(trimmed.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| Error::InvalidColor(trimmed.to_string()))
        };

        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
