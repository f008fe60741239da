use crate::error::{Error, Result};
use crate::geometry::{Point, Transform};
use crate::properties::Properties;
use crate::style::Style;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NODE_BASE_CLASS: &str = "node";
pub const RELATIONSHIP_BASE_CLASS: &str = "relationship";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipId(pub u32);

impl std::fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default)]
    pub position: Point,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub classes: IndexSet<String>,
    #[serde(default)]
    pub style: Style,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            position: Point::ORIGIN,
            caption: None,
            properties: Properties::new(),
            classes: IndexSet::new(),
            style: Style::new(),
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn set_position(&mut self, x: f64, y: f64) -> &mut Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) -> &mut Self {
        self.caption = Some(caption.into());
        self
    }

    /// Position in drawing coordinates.
    pub fn scaled_position(&self, transform: &Transform) -> Point {
        transform.apply(self.position)
    }

    pub fn ex(&self, transform: &Transform) -> f64 {
        self.position.x * transform.internal_scale
    }

    pub fn ey(&self, transform: &Transform) -> f64 {
        self.position.y * transform.internal_scale
    }

    /// Distance in drawing units.
    pub fn distance_to(&self, other: &Node, transform: &Transform) -> f64 {
        let dx = other.x() - self.x();
        let dy = other.y() - self.y();
        (dx * dx + dy * dy).sqrt() * transform.internal_scale
    }

    /// Bearing of `other` from this node, in degrees (`atan2`, y down).
    pub fn angle_to(&self, other: &Node) -> f64 {
        let dx = other.x() - self.x();
        let dy = other.y() - self.y();
        dy.atan2(dx) * 180.0 / std::f64::consts::PI
    }

    pub fn midway_to(&self, other: &Node) -> Point {
        Point {
            x: self.x() + (other.x() - self.x()) / 2.0,
            y: self.y() + (other.y() - self.y()) / 2.0,
        }
    }

    pub fn is_left_of(&self, other: &Node) -> bool {
        self.x() < other.x()
    }

    /// Moves the node by a delta measured in drawing units.
    pub fn drag(&mut self, dx: f64, dy: f64, transform: &Transform) {
        self.position.x += dx / transform.internal_scale;
        self.position.y += dy / transform.internal_scale;
    }

    /// Class tags including the implicit base tag.
    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        std::iter::once(NODE_BASE_CLASS).chain(self.classes.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: RelationshipId,
    pub start: NodeId,
    pub end: NodeId,
    #[serde(default, rename = "type")]
    pub relationship_type: Option<String>,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub classes: IndexSet<String>,
    #[serde(default)]
    pub style: Style,
}

impl Relationship {
    pub fn new(id: RelationshipId, start: NodeId, end: NodeId) -> Self {
        Self {
            id,
            start,
            end,
            relationship_type: None,
            properties: Properties::new(),
            classes: IndexSet::new(),
            style: Style::new(),
        }
    }

    pub fn set_type(&mut self, relationship_type: impl Into<String>) -> &mut Self {
        self.relationship_type = Some(relationship_type.into());
        self
    }

    /// Swaps start and end in place.
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.start == node || self.end == node
    }

    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        std::iter::once(RELATIONSHIP_BASE_CLASS).chain(self.classes.iter().map(String::as_str))
    }
}

/// Partitions relationships by the unordered pair of nodes they join.
///
/// Groups appear in first-seen order. Within a group, relationships running from the larger
/// node id to the smaller one come first, the rest follow in input order.
pub fn group_by_node_pair<'a>(
    relationships: impl IntoIterator<Item = &'a Relationship>,
) -> Vec<Vec<&'a Relationship>> {
    let mut groups: IndexMap<(NodeId, NodeId), Vec<&'a Relationship>> = IndexMap::new();
    for rel in relationships {
        let key = (rel.start.min(rel.end), rel.start.max(rel.end));
        let group = groups.entry(key).or_default();
        if rel.start > rel.end {
            group.insert(0, rel);
        } else {
            group.push(rel);
        }
    }
    groups.into_values().collect()
}

/// An arena of nodes keyed by id, plus the relationships between them.
///
/// Relationships hold node ids rather than references; deleting a node deletes every
/// relationship that touches it, so no relationship ever names a missing node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GraphSnapshot", into = "GraphSnapshot")]
pub struct GraphModel {
    nodes: BTreeMap<NodeId, Node>,
    relationships: Vec<Relationship>,
    highest_id: u32,
    next_relationship_id: u32,
    transform: Transform,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn generate_node_id(&mut self) -> NodeId {
        while self.nodes.contains_key(&NodeId(self.highest_id)) {
            self.highest_id += 1;
        }
        NodeId(self.highest_id)
    }

    pub fn create_node(&mut self) -> &mut Node {
        let id = self.generate_node_id();
        self.nodes.entry(id).or_insert_with(|| Node::new(id))
    }

    pub fn create_node_with_id(&mut self, id: NodeId) -> Result<&mut Node> {
        if self.nodes.contains_key(&id) {
            return Err(Error::DuplicateNode { id });
        }
        Ok(self.nodes.entry(id).or_insert_with(|| Node::new(id)))
    }

    /// Removes a node and every relationship attached to it.
    pub fn delete_node(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.remove(&id)?;
        let before = self.relationships.len();
        self.relationships.retain(|r| !r.touches(id));
        tracing::debug!(
            node = %id,
            removed_relationships = before - self.relationships.len(),
            "deleted node"
        );
        Some(node)
    }

    pub fn create_relationship(&mut self, start: NodeId, end: NodeId) -> Result<&mut Relationship> {
        for id in [start, end] {
            if !self.nodes.contains_key(&id) {
                return Err(Error::UnknownNode { id });
            }
        }
        let id = RelationshipId(self.next_relationship_id);
        self.next_relationship_id += 1;
        self.relationships.push(Relationship::new(id, start, end));
        let idx = self.relationships.len() - 1;
        Ok(&mut self.relationships[idx])
    }

    pub fn delete_relationship(&mut self, id: RelationshipId) -> Option<Relationship> {
        let idx = self.relationships.iter().position(|r| r.id == id)?;
        Some(self.relationships.remove(idx))
    }

    pub fn lookup_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn lookup_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id == id)
    }

    pub fn relationship_mut(&mut self, id: RelationshipId) -> Option<&mut Relationship> {
        self.relationships.iter_mut().find(|r| r.id == id)
    }

    pub fn node_list(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn relationship_list(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Relationships grouped by node pair; see [`group_by_node_pair`].
    pub fn grouped_relationship_list(&self) -> Vec<Vec<&Relationship>> {
        group_by_node_pair(&self.relationships)
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn internal_scale(&self) -> f64 {
        self.transform.internal_scale
    }

    pub fn set_internal_scale(&mut self, scale: f64) -> &mut Self {
        self.transform.internal_scale = scale;
        self
    }

    pub fn external_scale(&self) -> f64 {
        self.transform.external_scale
    }

    pub fn set_external_scale(&mut self, scale: f64) -> &mut Self {
        self.transform.external_scale = scale;
        self
    }
}

/// Serialized form of a [`GraphModel`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphSnapshot {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    relationships: Vec<Relationship>,
    #[serde(default)]
    transform: Transform,
}

impl TryFrom<GraphSnapshot> for GraphModel {
    type Error = Error;

    fn try_from(snapshot: GraphSnapshot) -> Result<Self> {
        let mut model = GraphModel {
            transform: snapshot.transform,
            ..GraphModel::default()
        };
        for node in snapshot.nodes {
            if model.nodes.contains_key(&node.id) {
                return Err(Error::DuplicateNode { id: node.id });
            }
            model.nodes.insert(node.id, node);
        }
        for relationship in snapshot.relationships {
            for id in [relationship.start, relationship.end] {
                if !model.nodes.contains_key(&id) {
                    return Err(Error::UnknownNode { id });
                }
            }
            model.next_relationship_id = model.next_relationship_id.max(relationship.id.0 + 1);
            model.relationships.push(relationship);
        }
        Ok(model)
    }
}

impl From<GraphModel> for GraphSnapshot {
    fn from(model: GraphModel) -> Self {
        Self {
            nodes: model.nodes.into_values().collect(),
            relationships: model.relationships,
            transform: model.transform,
        }
    }
}
