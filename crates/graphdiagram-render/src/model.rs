use crate::arrow::ArrowOutline;
use crate::caption::CaptionLine;
use crate::grouping::RelationshipGroup;
use crate::path::fmt_number;
use crate::radius::Radius;
use crate::scaling::{BoundingBox, Viewport};
use crate::speech_bubble::SpeechBubble;
use graphdiagram_core::{NodeId, Point, RelationshipId, Transform};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeLayout {
    pub id: NodeId,
    /// Centre in drawing coordinates.
    pub position: Point,
    pub radius: Radius,
    pub caption_lines: Vec<CaptionLine>,
    pub line_height: f64,
    pub class_list: Vec<String>,
    pub speech_bubble: Option<SpeechBubble>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipLayout {
    pub id: RelationshipId,
    pub start: NodeId,
    pub end: NodeId,
    pub relationship_type: Option<String>,
    pub offset: f64,
    pub curved: bool,
    /// Origin of the arrow's local frame (the start node's centre).
    pub translate: Point,
    /// Rotation of the local frame, in degrees.
    pub rotation: f64,
    /// Outline and apex in the local frame.
    pub arrow: ArrowOutline,
    /// Apex in drawing coordinates.
    pub apex: Point,
    pub class_list: Vec<String>,
    pub speech_bubble: Option<SpeechBubble>,
}

impl RelationshipLayout {
    /// SVG `transform` attribute placing the local frame.
    pub fn transform_attribute(&self) -> String {
        format!(
            "translate({},{}) rotate({})",
            fmt_number(self.translate.x),
            fmt_number(self.translate.y),
            fmt_number(self.rotation)
        )
    }
}

/// An entity that could not be laid out, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SkippedEntity {
    Node { id: NodeId, message: String },
    Relationship { id: RelationshipId, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutModel {
    pub transform: Transform,
    pub nodes: Vec<NodeLayout>,
    pub relationships: Vec<RelationshipLayout>,
    pub groups: Vec<RelationshipGroup>,
    /// Union of every node box and every callout box.
    pub extent: BoundingBox,
    pub viewport: Viewport,
    pub skipped: Vec<SkippedEntity>,
}

impl LayoutModel {
    pub fn node(&self, id: NodeId) -> Option<&NodeLayout> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn relationship(&self, id: RelationshipId) -> Option<&RelationshipLayout> {
        self.relationships.iter().find(|r| r.id == id)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
