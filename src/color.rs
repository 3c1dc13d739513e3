//! Colors named in tag attributes.
//!
//! Supports terminal palette names, hex, and RGB formats.

use crossterm::style::Color as TermColor;
use phf::phf_map;

use crate::error::ColorParseError;

/// Terminal palette names. ANSI "normal" colors are crossterm's `Dark*`
/// variants; the `bright_` names map to the bold palette entries.
static PALETTE: phf::Map<&'static str, TermColor> = phf_map! {
    "black" => TermColor::Black,
    "red" => TermColor::DarkRed,
    "green" => TermColor::DarkGreen,
    "yellow" => TermColor::DarkYellow,
    "blue" => TermColor::DarkBlue,
    "magenta" => TermColor::DarkMagenta,
    "cyan" => TermColor::DarkCyan,
    "white" => TermColor::Grey,
    "bright_black" => TermColor::DarkGrey,
    "bright_red" => TermColor::Red,
    "bright_green" => TermColor::Green,
    "bright_yellow" => TermColor::Yellow,
    "bright_blue" => TermColor::Blue,
    "bright_magenta" => TermColor::Magenta,
    "bright_cyan" => TermColor::Cyan,
    "bright_white" => TermColor::White,
    "grey" => TermColor::DarkGrey,
    "gray" => TermColor::DarkGrey,
};

/// A few common web colors that have no palette entry.
static EXTENDED: phf::Map<&'static str, (u8, u8, u8)> = phf_map! {
    "orange" => (255, 165, 0),
    "pink" => (255, 192, 203),
    "purple" => (128, 0, 128),
    "brown" => (165, 42, 42),
    "navy" => (0, 0, 128),
    "teal" => (0, 128, 128),
    "olive" => (128, 128, 0),
    "maroon" => (128, 0, 0),
    "silver" => (192, 192, 192),
    "gold" => (255, 215, 0),
    "coral" => (255, 127, 80),
    "indigo" => (75, 0, 130),
    "violet" => (238, 130, 238),
};

/// A foreground or background color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// An entry of the terminal's own 16-color palette.
    Palette(TermColor),
    /// A 24-bit color.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color from a string.
    ///
    /// Supports:
    /// - Palette names: `red`, `bright_blue`, `grey`, etc.
    /// - A handful of web names: `orange`, `navy`, `teal`, etc.
    /// - Hex colors: `#RGB`, `#RRGGBB`
    /// - RGB function: `rgb(r, g, b)`
    ///
    /// # Examples
    ///
    /// ```
    /// use inkwrap::Color;
    ///
    /// let red = Color::parse("red").unwrap();
    /// let hex = Color::parse("#ff5733").unwrap();
    /// let rgb = Color::parse("rgb(255, 87, 51)").unwrap();
    /// assert_eq!(hex, rgb);
    /// ```
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let input = input.trim();

        if let Some(hex) = input.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        if let Some(args) = input
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::parse_rgb_func(args);
        }

        let name = input.to_lowercase();
        if let Some(color) = PALETTE.get(name.as_str()) {
            return Ok(Color::Palette(*color));
        }
        if let Some(&(r, g, b)) = EXTENDED.get(name.as_str()) {
            return Ok(Color::Rgb(r, g, b));
        }
        Err(ColorParseError::UnknownName(input.to_string()))
    }

    /// Parse a hex color (without the # prefix).
    fn parse_hex(hex: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidHex(format!("#{hex}"));
        let digits: Vec<u8> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()
            .ok_or_else(invalid)?;

        match digits[..] {
            [r, g, b] => Ok(Color::Rgb(r * 17, g * 17, b * 17)),
            [r1, r2, g1, g2, b1, b2] => Ok(Color::Rgb(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
            _ => Err(invalid()),
        }
    }

    /// Parse an RGB function (the part inside the parentheses).
    fn parse_rgb_func(input: &str) -> Result<Self, ColorParseError> {
        let parts: Vec<&str> = input.split(',').map(str::trim).collect();
        let [r, g, b] = parts[..] else {
            return Err(ColorParseError::InvalidRgb(format!("rgb({input})")));
        };

        let channel = |name: &str, value: &str| {
            value
                .parse::<u8>()
                .map_err(|_| ColorParseError::InvalidRgb(format!("invalid {name}: {value}")))
        };
        Ok(Color::Rgb(
            channel("red", r)?,
            channel("green", g)?,
            channel("blue", b)?,
        ))
    }

    /// The crossterm color used to draw this color.
    pub fn to_crossterm(self) -> TermColor {
        match self {
            Color::Palette(color) => color,
            Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_palette_color() {
        assert_eq!(Color::parse("red").unwrap(), Color::Palette(TermColor::DarkRed));
        assert_eq!(Color::parse("Blue").unwrap(), Color::Palette(TermColor::DarkBlue));
        assert_eq!(
            Color::parse("BRIGHT_CYAN").unwrap(),
            Color::Palette(TermColor::Cyan)
        );
    }

    #[test]
    fn parse_extended_name() {
        assert_eq!(Color::parse("orange").unwrap(), Color::Rgb(255, 165, 0));
    }

    #[test]
    fn parse_hex_short() {
        assert_eq!(Color::parse("#f00").unwrap(), Color::Rgb(255, 0, 0));
        assert_eq!(Color::parse("#0f0").unwrap(), Color::Rgb(0, 255, 0));
    }

    #[test]
    fn parse_hex_long() {
        assert_eq!(Color::parse("#ff5733").unwrap(), Color::Rgb(255, 87, 51));
        assert_eq!(Color::parse("#FFFFFF").unwrap(), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn parse_rgb_func() {
        assert_eq!(
            Color::parse("rgb(255, 87, 51)").unwrap(),
            Color::Rgb(255, 87, 51)
        );
        assert_eq!(Color::parse(" rgb(0,0,0) ").unwrap(), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn parse_invalid() {
        assert!(matches!(
            Color::parse("notacolor"),
            Err(ColorParseError::UnknownName(_))
        ));
        assert!(matches!(
            Color::parse("#gg0000"),
            Err(ColorParseError::InvalidHex(_))
        ));
        assert!(matches!(
            Color::parse("#12345"),
            Err(ColorParseError::InvalidHex(_))
        ));
        assert!(matches!(
            Color::parse("rgb(256, 0, 0)"),
            Err(ColorParseError::InvalidRgb(_))
        ));
        assert!(Color::parse("").is_err());
    }

    #[test]
    fn to_crossterm() {
        assert_eq!(
            Color::Rgb(10, 20, 30).to_crossterm(),
            TermColor::Rgb { r: 10, g: 20, b: 30 }
        );
        assert_eq!(
            Color::Palette(TermColor::DarkRed).to_crossterm(),
            TermColor::DarkRed
        );
    }
}
