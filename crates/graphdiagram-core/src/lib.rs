#![forbid(unsafe_code)]

//! Graph model for graph diagrams.
//!
//! Nodes carry a position, an optional caption, ordered properties, class tags and raw style
//! attributes; relationships join two nodes by id. The layout engine (`graphdiagram-render`)
//! reads a [`GraphModel`] snapshot and never mutates it.

pub mod error;
pub mod geometry;
pub mod model;
pub mod properties;
pub mod style;

pub use error::{Error, Result};
pub use geometry::{Point, Transform};
pub use model::{
    GraphModel, NODE_BASE_CLASS, Node, NodeId, RELATIONSHIP_BASE_CLASS, Relationship,
    RelationshipId, group_by_node_pair,
};
pub use properties::{Properties, Property};
pub use style::{Style, parse_number};
