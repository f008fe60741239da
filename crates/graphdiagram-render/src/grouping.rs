//! Fans out relationships that join the same pair of nodes.

use graphdiagram_core::{NodeId, Relationship, RelationshipId, group_by_node_pair};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub relationship: RelationshipId,
    pub start: NodeId,
    pub end: NodeId,
    /// Signed lateral offset; zero draws a straight arrow.
    pub offset: f64,
}

/// All relationships between one unordered pair of nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipGroup {
    /// The pair, smaller id first.
    pub nodes: (NodeId, NodeId),
    pub members: Vec<GroupMember>,
}

/// Groups relationships by node pair and offsets each member by `offset_step` per position,
/// centred on zero.
///
/// Members running against the group's leading direction get the opposite sign so that
/// same-direction arrows stay parallel after their frames are rotated.
pub fn group_relationships<'a>(
    relationships: impl IntoIterator<Item = &'a Relationship>,
    offset_step: f64,
) -> Vec<RelationshipGroup> {
    group_by_node_pair(relationships)
        .into_iter()
        .filter_map(|rels| {
            let first = *rels.first()?;
            let middle = (rels.len() as f64 - 1.0) / 2.0;
            let members = rels
                .iter()
                .enumerate()
                .map(|(i, rel)| {
                    let sign = if rel.start == first.start { 1.0 } else { -1.0 };
                    let offset = if rels.len() == 1 {
                        0.0
                    } else {
                        sign * offset_step * (i as f64 - middle)
                    };
                    GroupMember {
                        relationship: rel.id,
                        start: rel.start,
                        end: rel.end,
                        offset,
                    }
                })
                .collect();
            Some(RelationshipGroup {
                nodes: (first.start.min(first.end), first.start.max(first.end)),
                members,
            })
        })
        .collect()
}
