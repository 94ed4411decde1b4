//! Typed access to the attribute keys recognised on node and arc tables.

use thiserror::Error;

use taxon_core::color::{ColorError, Rgba};

pub const LABEL: &str = "label";
pub const WEIGHT: &str = "weight";
pub const COLOR: &str = "color";
pub const FILL: &str = "fill";
pub const STROKE: &str = "stroke";
pub const PARENT: &str = "parent";
pub const TARGET: &str = "target";
pub const ARCS: &str = "arcs";

/// A recognised key holding a value it cannot be decoded from.
#[derive(Debug, Error)]
pub enum AttributeError {
    #[error("`{key}` expects {expected}, found {found}")]
    Type {
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{key}`: {source}")]
    Color {
        key: &'static str,
        #[source]
        source: ColorError,
    },
}

/// Read a string attribute.
pub fn string<'t>(
    table: &'t toml::Table,
    key: &'static str,
) -> Result<Option<&'t str>, AttributeError> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::String(value)) => Ok(Some(value)),
        Some(other) => Err(AttributeError::Type {
            key,
            expected: "a string",
            found: other.type_str(),
        }),
    }
}

/// Read a numeric attribute. Integers are widened to `f64`.
pub fn number(table: &toml::Table, key: &'static str) -> Result<Option<f64>, AttributeError> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::Float(value)) => Ok(Some(*value)),
        Some(toml::Value::Integer(value)) => Ok(Some(*value as f64)),
        Some(other) => Err(AttributeError::Type {
            key,
            expected: "a number",
            found: other.type_str(),
        }),
    }
}

/// Read a color attribute, see [`Rgba::from_value`].
pub fn color(table: &toml::Table, key: &'static str) -> Result<Option<Rgba>, AttributeError> {
    table
        .get(key)
        .map(Rgba::from_value)
        .transpose()
        .map_err(|source| AttributeError::Color { key, source })
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    fn table(text: &str) -> toml::Table {
        text.parse().unwrap()
    }

    #[test]
    fn test_string_present_and_missing() {
        let t = table("label = \"Root\"");
        assert_eq!(string(&t, LABEL).unwrap(), Some("Root"));
        assert_eq!(string(&t, TARGET).unwrap(), None);
    }

    #[test]
    fn test_string_wrong_type() {
        let t = table("label = 3");
        let err = string(&t, LABEL).unwrap_err();
        assert_eq!(err.to_string(), "`label` expects a string, found integer");
    }

    #[test]
    fn test_number_widens_integers() {
        let t = table("weight = 3");
        assert!(approx_eq!(f64, number(&t, WEIGHT).unwrap().unwrap(), 3.0));

        let t = table("weight = 0.25");
        assert!(approx_eq!(f64, number(&t, WEIGHT).unwrap().unwrap(), 0.25));
    }

    #[test]
    fn test_number_wrong_type() {
        let t = table("weight = \"heavy\"");
        assert!(matches!(
            number(&t, WEIGHT),
            Err(AttributeError::Type { key: "weight", .. })
        ));
    }

    #[test]
    fn test_color_sub_table() {
        let t = table("[color]\nr = 10\ng = 20\nb = 30");
        assert_eq!(color(&t, COLOR).unwrap(), Some(Rgba::new(10, 20, 30)));
        assert_eq!(color(&t, FILL).unwrap(), None);
    }

    #[test]
    fn test_color_invalid() {
        let t = table("fill = \"nope\"");
        assert!(matches!(
            color(&t, FILL),
            Err(AttributeError::Color { key: "fill", .. })
        ));
    }
}
