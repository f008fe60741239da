//! Style resolution.
//!
//! Raw per-entity attributes are written over the diagram defaults once, before layout, into
//! immutable numeric records. Layout code only ever sees the resolved records.

use crate::{Error, Result};
use graphdiagram_core::{Error as CoreError, Style};
use serde::{Deserialize, Serialize};

/// Prefix under which a node or relationship overrides its own speech-bubble style.
pub const PROPERTY_STYLE_PREFIX: &str = "property-";

/// Default attribute values per entity kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramStyle {
    pub node: Style,
    pub relationship: Style,
    pub properties: Style,
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self {
            node: [
                ("font-size", "50px"),
                ("font-family", "sans-serif"),
                ("border-width", "8px"),
                ("margin", "15px"),
                ("padding", "10px"),
                ("min-width", "100px"),
            ]
            .into_iter()
            .collect(),
            relationship: [
                ("font-size", "16px"),
                ("font-family", "sans-serif"),
                ("arrow-width", "8px"),
                ("margin", "20px"),
            ]
            .into_iter()
            .collect(),
            properties: [
                ("font-size", "16px"),
                ("font-family", "sans-serif"),
                ("margin", "20px"),
                ("padding", "10px"),
                ("border-width", "2px"),
            ]
            .into_iter()
            .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StyleOverrides {
    node: Style,
    relationship: Style,
    properties: Style,
}

impl DiagramStyle {
    /// Built-in defaults with the attributes present in `text` written over them.
    pub fn from_json(text: &str) -> Result<Self> {
        let overrides: StyleOverrides = serde_json::from_str(text)?;
        let defaults = Self::default();
        Ok(Self {
            node: overrides.node.overlay_on(&defaults.node),
            relationship: overrides.relationship.overlay_on(&defaults.relationship),
            properties: overrides.properties.overlay_on(&defaults.properties),
        })
    }

    pub fn resolve_node(&self, own: &Style) -> Result<NodeStyle> {
        let style = own.overlay_on(&self.node);
        Ok(NodeStyle {
            font_size: number(&style, "font-size")?,
            font_family: text(&style, "font-family")?,
            border_width: number(&style, "border-width")?,
            arrow_margin: number(&style, "margin")?,
            padding: number(&style, "padding")?,
            min_width: number(&style, "min-width")?,
        })
    }

    pub fn resolve_relationship(&self, own: &Style) -> Result<RelationshipStyle> {
        let style = own.overlay_on(&self.relationship);
        Ok(RelationshipStyle {
            font_size: number(&style, "font-size")?,
            font_family: text(&style, "font-family")?,
            arrow_width: number(&style, "arrow-width")?,
        })
    }

    /// Lateral spacing between relationships that join the same pair of nodes.
    ///
    /// Read from the relationship defaults only: a group spans several relationships, so a
    /// `margin` set on one of them does not move its siblings.
    pub fn group_offset_step(&self) -> Result<f64> {
        number(&self.relationship, "margin")
    }

    pub fn resolve_bubble(&self, own: &Style) -> Result<BubbleStyle> {
        let prefixed: Style = own
            .iter()
            .filter_map(|(k, v)| k.strip_prefix(PROPERTY_STYLE_PREFIX).map(|k| (k, v)))
            .collect();
        let style = prefixed.overlay_on(&self.properties);
        Ok(BubbleStyle {
            font_size: number(&style, "font-size")?,
            font_family: text(&style, "font-family")?,
            margin: number(&style, "margin")?,
            padding: number(&style, "padding")?,
            border_width: number(&style, "border-width")?,
        })
    }
}

fn number(style: &Style, attribute: &str) -> Result<f64> {
    style
        .number(attribute)
        .ok_or_else(|| Error::MissingStyle {
            attribute: attribute.to_string(),
        })?
        .map_err(|err| match err {
            CoreError::InvalidStyleValue { attribute, value } => {
                Error::InvalidStyle { attribute, value }
            }
            other => Error::Model(other),
        })
}

fn text(style: &Style, attribute: &str) -> Result<String> {
    style
        .get(attribute)
        .map(|v| v.trim().to_string())
        .ok_or_else(|| Error::MissingStyle {
            attribute: attribute.to_string(),
        })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    pub font_size: f64,
    pub font_family: String,
    pub border_width: f64,
    pub arrow_margin: f64,
    pub padding: f64,
    pub min_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipStyle {
    pub font_size: f64,
    pub font_family: String,
    pub arrow_width: f64,
}

impl RelationshipStyle {
    pub fn head_width(&self) -> f64 {
        self.arrow_width * 4.0
    }

    pub fn head_length(&self) -> f64 {
        self.arrow_width * 4.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BubbleStyle {
    pub font_size: f64,
    pub font_family: String,
    pub margin: f64,
    pub padding: f64,
    pub border_width: f64,
}
