use std::fmt;
use std::str::FromStr;

/// A `#RRGGBB` coat color as returned in `color_codes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorCode {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The string is not a `#` followed by exactly six hex digits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a #RRGGBB color code")]
pub struct InvalidColorCode(pub String);

impl ColorCode {
    /// Parse `#RRGGBB`; hex digits may be either case.
    pub fn parse(code: &str) -> Result<Self, InvalidColorCode> {
        let invalid = || InvalidColorCode(code.to_string());
        let hex = code.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl FromStr for ColorCode {
    type Err = InvalidColorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
