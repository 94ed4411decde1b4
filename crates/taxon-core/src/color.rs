//! Color handling for Taxon graphs
//!
//! Nodes and arcs carry three [`Rgba`] attributes (`color`, `fill` and
//! `stroke`). In a document they are written either as a table of byte
//! components or as a CSS color string:
//!
//! ```toml
//! [A.color]
//! r = 10
//! g = 20
//! b = 30
//!
//! [B]
//! fill = "rebeccapurple"
//! ```

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while decoding a color attribute.
#[derive(Debug, Error)]
pub enum ColorError {
    #[error("invalid color components: {0}")]
    Components(String),

    #[error("invalid color `{value}`: {reason}")]
    Css { value: String, reason: String },

    #[error("expected a table of components or a color string, found {0}")]
    Type(&'static str),
}

/// An 8-bit RGBA color.
///
/// Alpha defaults to 255 (opaque) when omitted from a component table.
///
/// # Examples
///
/// ```
/// use taxon_core::color::Rgba;
///
/// let teal = Rgba::new(0, 128, 128);
/// assert_eq!(teal.a, 255);
/// assert_eq!(teal.to_hex(), "#008080ff");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    u8::MAX
}

impl Rgba {
    /// Black, the default for every color attribute.
    pub const BLACK: Rgba = Rgba::new(0, 0, 0);

    /// Create an opaque color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self::with_alpha(r, g, b, u8::MAX)
    }

    /// Create a color with an explicit alpha channel.
    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Decode a color from a document value.
    ///
    /// Tables are read as `{ r, g, b, a? }` components, strings are parsed as
    /// CSS colors (`"red"`, `"#ff000080"`, `"rgb(1 2 3)"`).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] when a component is missing or out of range,
    /// when the string is not a color, or when the value has another type.
    pub fn from_value(value: &toml::Value) -> Result<Self, ColorError> {
        match value {
            toml::Value::Table(_) => value
                .clone()
                .try_into::<Rgba>()
                .map_err(|err| ColorError::Components(err.message().to_string())),
            toml::Value::String(text) => text.parse(),
            other => Err(ColorError::Type(other.type_str())),
        }
    }

    /// Returns the `#rrggbbaa` form used in DOT attributes.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parsed = DynamicColor::from_str(value).map_err(|err| ColorError::Css {
            value: value.to_string(),
            reason: err.to_string(),
        })?;
        let rgba = parsed.to_alpha_color::<Srgb>().to_rgba8();
        Ok(Self::with_alpha(rgba.r, rgba.g, rgba.b, rgba.a))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn table(text: &str) -> toml::Value {
        toml::Value::Table(text.parse::<toml::Table>().unwrap())
    }

    #[test]
    fn test_default_is_opaque_black() {
        assert_eq!(Rgba::default(), Rgba::with_alpha(0, 0, 0, 255));
    }

    #[test]
    fn test_from_components_defaults_alpha() {
        let color = Rgba::from_value(&table("r = 10\ng = 20\nb = 30")).unwrap();
        assert_eq!(color, Rgba::with_alpha(10, 20, 30, 255));
    }

    #[test]
    fn test_from_components_with_alpha() {
        let color = Rgba::from_value(&table("r = 1\ng = 2\nb = 3\na = 4")).unwrap();
        assert_eq!(color, Rgba::with_alpha(1, 2, 3, 4));
    }

    #[test]
    fn test_from_components_ignores_extra_keys() {
        let color = Rgba::from_value(&table("r = 1\ng = 2\nb = 3\nname = \"x\"")).unwrap();
        assert_eq!(color, Rgba::new(1, 2, 3));
    }

    #[test]
    fn test_missing_component_is_error() {
        let err = Rgba::from_value(&table("r = 1\ng = 2")).unwrap_err();
        assert!(matches!(err, ColorError::Components(_)));
    }

    #[test]
    fn test_out_of_range_component_is_error() {
        assert!(Rgba::from_value(&table("r = 256\ng = 0\nb = 0")).is_err());
        assert!(Rgba::from_value(&table("r = -1\ng = 0\nb = 0")).is_err());
    }

    #[test]
    fn test_from_css_string() {
        let red = Rgba::from_value(&toml::Value::String("red".to_string())).unwrap();
        assert_eq!(red, Rgba::new(255, 0, 0));

        let hex: Rgba = "#00ff0080".parse().unwrap();
        assert_eq!(hex, Rgba::with_alpha(0, 255, 0, 128));
    }

    #[test]
    fn test_invalid_css_string() {
        let err = "not-a-color".parse::<Rgba>().unwrap_err();
        assert!(matches!(err, ColorError::Css { .. }));
    }

    #[test]
    fn test_wrong_type() {
        let err = Rgba::from_value(&toml::Value::Integer(3)).unwrap_err();
        assert!(matches!(err, ColorError::Type("integer")));
    }

    #[test]
    fn test_hex_format() {
        assert_eq!(Rgba::with_alpha(10, 20, 30, 255).to_hex(), "#0a141eff");
        assert_eq!(Rgba::BLACK.to_string(), "#000000ff");
    }

    proptest! {
        #[test]
        fn hex_round_trips_through_css(r: u8, g: u8, b: u8, a: u8) {
            let color = Rgba::with_alpha(r, g, b, a);
            let hex = color.to_hex();
            prop_assert_eq!(hex.len(), 9);
            prop_assert_eq!(hex.parse::<Rgba>().unwrap(), color);
        }
    }
}
