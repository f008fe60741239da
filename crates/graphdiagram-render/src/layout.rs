//! One layout pass over a graph model.
//!
//! Nodes are sized first, then relationships are grouped, offset and outlined between the
//! sized nodes, and finally every drawn box is folded into the diagram extent. Failures are
//! recorded per entity in [`LayoutModel::skipped`]; only a diagram-wide style problem aborts
//! the pass.

use crate::arrow::{curved_arrow_outline, horizontal_arrow_outline};
use crate::caption::fit_caption_into_circle;
use crate::grouping::group_relationships;
use crate::model::{LayoutModel, NodeLayout, RelationshipLayout, SkippedEntity};
use crate::orientation::{choose_node_orientation, choose_relationship_orientation};
use crate::scaling::{box_union, node_box};
use crate::speech_bubble::{layout_speech_bubble, node_bubble_anchor};
use crate::{Error, LayoutOptions, Result};
use graphdiagram_core::{GraphModel, Node, NodeId, Relationship, RelationshipId, Style, Transform};
use rustc_hash::FxHashMap;

pub fn layout_graph(graph: &GraphModel, options: &LayoutOptions) -> Result<LayoutModel> {
    let transform = options.transform.unwrap_or_else(|| graph.transform());
    options.style.resolve_relationship(&Style::new())?;
    let offset_step = options.style.group_offset_step()?;
    let mut skipped = Vec::new();

    let mut neighbours: FxHashMap<NodeId, Vec<&Node>> = FxHashMap::default();
    for rel in graph.relationship_list() {
        if rel.start == rel.end {
            continue;
        }
        if let (Some(start), Some(end)) = (graph.lookup_node(rel.start), graph.lookup_node(rel.end))
        {
            neighbours.entry(rel.start).or_default().push(end);
            neighbours.entry(rel.end).or_default().push(start);
        }
    }

    let mut nodes: Vec<NodeLayout> = Vec::with_capacity(graph.node_count());
    let mut node_index: FxHashMap<NodeId, usize> = FxHashMap::default();
    for node in graph.node_list() {
        let adjacent = neighbours.get(&node.id).map(Vec::as_slice).unwrap_or_default();
        match layout_node(node, adjacent, &transform, options) {
            Ok(layout) => {
                node_index.insert(node.id, nodes.len());
                nodes.push(layout);
            }
            Err(err) => {
                tracing::warn!(node = %node.id, error = %err, "skipping node");
                skipped.push(SkippedEntity::Node {
                    id: node.id,
                    message: err.to_string(),
                });
            }
        }
    }

    let groups = group_relationships(graph.relationship_list(), offset_step);
    let offsets: FxHashMap<RelationshipId, f64> = groups
        .iter()
        .flat_map(|g| g.members.iter())
        .map(|m| (m.relationship, m.offset))
        .collect();

    let endpoint = |id: NodeId| -> Option<(&Node, &NodeLayout)> {
        let layout = nodes.get(*node_index.get(&id)?)?;
        Some((graph.lookup_node(id)?, layout))
    };

    let mut relationships = Vec::with_capacity(graph.relationship_list().len());
    for rel in graph.relationship_list() {
        let (Some(start), Some(end)) = (endpoint(rel.start), endpoint(rel.end)) else {
            tracing::warn!(relationship = %rel.id, "skipping relationship to a skipped node");
            skipped.push(SkippedEntity::Relationship {
                id: rel.id,
                message: format!(
                    "endpoint node {} or {} could not be laid out",
                    rel.start, rel.end
                ),
            });
            continue;
        };
        let offset = offsets.get(&rel.id).copied().unwrap_or(0.0);
        match layout_relationship(rel, start, end, offset, &transform, options) {
            Ok(layout) => relationships.push(layout),
            Err(err) => {
                tracing::warn!(relationship = %rel.id, error = %err, "skipping relationship");
                skipped.push(SkippedEntity::Relationship {
                    id: rel.id,
                    message: err.to_string(),
                });
            }
        }
    }

    let node_boxes = nodes.iter().flat_map(|n| {
        std::iter::once(node_box(n.position, &n.radius))
            .chain(n.speech_bubble.as_ref().map(|b| b.bounding_box))
    });
    let relationship_boxes = relationships
        .iter()
        .filter_map(|r| r.speech_bubble.as_ref().map(|b| b.bounding_box));
    let extent = box_union(node_boxes.chain(relationship_boxes));
    let viewport = options.viewport.fit(extent, &transform);

    tracing::debug!(
        nodes = nodes.len(),
        relationships = relationships.len(),
        skipped = skipped.len(),
        view_box = %viewport.view_box.attribute(),
        "laid out graph"
    );

    Ok(LayoutModel {
        transform,
        nodes,
        relationships,
        groups,
        extent,
        viewport,
        skipped,
    })
}

fn layout_node(
    node: &Node,
    neighbours: &[&Node],
    transform: &Transform,
    options: &LayoutOptions,
) -> Result<NodeLayout> {
    let measurer = options.text_measurer.as_ref();
    let style = options.style.resolve_node(&node.style)?;
    let caption = fit_caption_into_circle(node.caption.as_deref(), &style, measurer);
    let position = node.scaled_position(transform);

    let speech_bubble = if node.properties.is_empty() {
        None
    } else {
        let bubble_style = options.style.resolve_bubble(&node.style)?;
        let bearings: Vec<f64> = neighbours
            .iter()
            .filter(|other| other.position != node.position)
            .map(|other| node.angle_to(other))
            .collect();
        let orientation = choose_node_orientation(&bearings);
        let anchor = node_bubble_anchor(position, &caption.radius, orientation);
        layout_speech_bubble(
            &node.properties,
            &bubble_style,
            orientation,
            anchor,
            measurer,
        )
    };

    Ok(NodeLayout {
        id: node.id,
        position,
        radius: caption.radius,
        caption_lines: caption.lines,
        line_height: caption.line_height,
        class_list: node.class_list().map(str::to_string).collect(),
        speech_bubble,
    })
}

fn layout_relationship(
    rel: &Relationship,
    (start_node, start): (&Node, &NodeLayout),
    (end_node, end): (&Node, &NodeLayout),
    offset: f64,
    transform: &Transform,
    options: &LayoutOptions,
) -> Result<RelationshipLayout> {
    if rel.start == rel.end || start_node.position == end_node.position {
        return Err(Error::AmbiguousGeometry {
            start: rel.start,
            end: rel.end,
        });
    }
    let style = options.style.resolve_relationship(&rel.style)?;
    let distance = start_node.distance_to(end_node, transform);
    let start_radius = start.radius.start_relationship();
    let end_radius = end.radius.end_relationship();
    let bearing = start_node.angle_to(end_node);

    let curved = if offset == 0.0 {
        None
    } else {
        match curved_arrow_outline(
            start_radius,
            end_radius,
            distance,
            offset,
            style.arrow_width,
            style.head_width(),
            style.head_length(),
        ) {
            Ok(arrow) => Some(arrow),
            Err(Error::InvalidOffset { offset }) => {
                tracing::warn!(relationship = %rel.id, offset, "drawing degenerate curve straight");
                None
            }
            Err(err) => return Err(err),
        }
    };

    let (arrow, rotation, is_curved) = match curved {
        Some(arrow) => (arrow, bearing, true),
        None => {
            // Straight arrows are drawn left to right so their labels stay upright.
            let side = if end_node.is_left_of(start_node) {
                -1.0
            } else {
                1.0
            };
            let arrow = horizontal_arrow_outline(
                side * start_radius,
                side * (distance - end_radius),
                style.arrow_width,
            );
            let rotation = if side < 0.0 { bearing + 180.0 } else { bearing };
            (arrow, rotation, false)
        }
    };

    let apex = arrow.apex.rotate(rotation).translate(start.position);
    let speech_bubble = if rel.properties.is_empty() {
        None
    } else {
        let bubble_style = options.style.resolve_bubble(&rel.style)?;
        layout_speech_bubble(
            &rel.properties,
            &bubble_style,
            choose_relationship_orientation(bearing),
            apex,
            options.text_measurer.as_ref(),
        )
    };

    Ok(RelationshipLayout {
        id: rel.id,
        start: rel.start,
        end: rel.end,
        relationship_type: rel.relationship_type.clone(),
        offset,
        curved: is_curved,
        translate: start.position,
        rotation,
        arrow,
        apex,
        class_list: rel.class_list().map(str::to_string).collect(),
        speech_bubble,
    })
}
