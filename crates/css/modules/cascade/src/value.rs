//! Already-parsed declared values.
//!
//! Parsing CSS text is the producer's job; the cascade only stores what it is given
//! and hands it to the per-property compute step.

/// RGBA colour, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const TRANSPARENT: Self = Self {
        red: 0,
        green: 0,
        blue: 0,
        alpha: 0,
    };

    #[inline]
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 255,
        }
    }
}

/// Units a declared length can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Px,
    Em,
    Ex,
    Pt,
    Pc,
    In,
    Cm,
    Mm,
}

/// A declared value as produced by the parser.
#[derive(Clone, Debug, PartialEq)]
pub enum DeclaredValue {
    Inherit,
    Initial,
    /// Identifier, stored in ASCII lowercase.
    Keyword(Box<str>),
    Length(f32, LengthUnit),
    Percentage(f32),
    Number(f32),
    Integer(i32),
    Color(Rgba),
    Url(Box<str>),
    String(Box<str>),
    /// Space or comma separated components, e.g. font families.
    List(Vec<DeclaredValue>),
}

impl DeclaredValue {
    /// Keyword value; `inherit` and `initial` map to their dedicated variants.
    pub fn keyword(ident: &str) -> Self {
        let lower = ident.to_ascii_lowercase();
        match lower.as_str() {
            "inherit" => Self::Inherit,
            "initial" => Self::Initial,
            _ => Self::Keyword(lower.into_boxed_str()),
        }
    }

    #[inline]
    pub const fn px(value: f32) -> Self {
        Self::Length(value, LengthUnit::Px)
    }

    /// The keyword text, if this is a keyword.
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(ident) => Some(ident),
            _ => None,
        }
    }
}
