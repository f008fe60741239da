use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Raw, CSS-like style attributes attached to a node or relationship (`"font-size" -> "20px"`).
///
/// Values are stored as authored. Layout never reads them directly: they are resolved to
/// numbers once, before a layout pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(IndexMap<String, String>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.0.get(attribute).map(String::as_str)
    }

    pub fn set(&mut self, attribute: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(attribute.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns a copy of `base` with every attribute of `self` written over it.
    pub fn overlay_on(&self, base: &Style) -> Style {
        let mut out = base.clone();
        for (k, v) in &self.0 {
            out.0.insert(k.clone(), v.clone());
        }
        out
    }

    /// Looks up a numeric attribute. `None` when the attribute is not set at all.
    pub fn number(&self, attribute: &str) -> Option<Result<f64>> {
        self.get(attribute).map(|v| parse_number(attribute, v))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (k, v) in iter {
            out.set(k, v);
        }
        out
    }
}

/// Parses a numeric style value, trimming a trailing unit suffix (`"20px"`, `"1.5em"`).
pub fn parse_number(attribute: &str, value: &str) -> Result<f64> {
    let trimmed = value.trim();
    let number = trimmed.trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%');
    number
        .trim_end()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidStyleValue {
            attribute: attribute.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_and_retrieve_a_specific_style_attribute() {
        let mut style = Style::new();
        style.set("font-size", "20px").set("padding", "10px");
        assert_eq!(style.get("font-size"), Some("20px"));
        assert_eq!(style.get("padding"), Some("10px"));
        assert_eq!(style.get("margin"), None);
    }

    #[test]
    fn numbers_drop_their_unit_suffix() {
        assert_eq!(parse_number("font-size", "20px").unwrap(), 20.0);
        assert_eq!(parse_number("border-width", " 2.5 ").unwrap(), 2.5);
        assert_eq!(parse_number("margin", "-4 px").unwrap(), -4.0);
        assert!(matches!(
            parse_number("padding", "wide"),
            Err(Error::InvalidStyleValue { .. })
        ));
    }

    #[test]
    fn overlay_prefers_entity_attributes() {
        let base: Style = [("font-size", "50px"), ("padding", "10px")]
            .into_iter()
            .collect();
        let own: Style = [("padding", "4px")].into_iter().collect();
        let merged = own.overlay_on(&base);
        assert_eq!(merged.get("font-size"), Some("50px"));
        assert_eq!(merged.get("padding"), Some("4px"));
        assert_eq!(merged.number("padding").unwrap().unwrap(), 4.0);
    }
}
