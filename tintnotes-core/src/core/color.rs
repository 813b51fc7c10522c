//! Hex color parsing and the black/white contrast rule for text over a note background.

use crate::{Result, TintnotesError};

/// Background color of a freshly created note.
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";

/// Colors offered by the note form's background picker, in display order.
pub const BACKGROUND_PALETTE: [&str; 5] = ["#4A90E2", "#7986CB", "#AED581", "#FFCC80", "#FFFFFF"];

/// An opaque RGB color parsed from `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    /// Parses a `#RRGGBB` string. Hex digits are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`TintnotesError::InvalidColor`] if the leading `#` is missing or
    /// the remainder is not exactly six hex digits.
    pub fn parse(hex: &str) -> Result<Self> {
        let invalid = || TintnotesError::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Perceptual luminance in `[0, 1]`.
    pub fn luminance(&self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)) / 255.0
    }

    /// Text/icon color that stays legible over this color.
    pub fn contrast(&self) -> Contrast {
        if self.luminance() > 0.5 {
            Contrast::Black
        } else {
            Contrast::White
        }
    }

    /// Canonical upper-case `#RRGGBB` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Foreground color chosen for legibility over a background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contrast {
    Black,
    White,
}

impl Contrast {
    pub fn as_hex(&self) -> &'static str {
        match self {
            Self::Black => "#000000",
            Self::White => "#FFFFFF",
        }
    }

    /// Card outline color: the inverse of the text color.
    pub fn border(&self) -> Contrast {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

/// Returns black when the luminance of `hex` exceeds 0.5, white otherwise.
///
/// # Errors
///
/// Returns [`TintnotesError::InvalidColor`] if `hex` is not `#RRGGBB`.
pub fn contrast_color(hex: &str) -> Result<Contrast> {
    Ok(HexColor::parse(hex)?.contrast())
}
