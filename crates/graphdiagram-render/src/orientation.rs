//! Placement of property callouts around nodes and relationships.

use serde::{Deserialize, Serialize};

/// Silhouette family of a callout outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    Horizontal,
    Vertical,
    Diagonal,
}

/// Compass placement of a callout relative to its entity (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum Orientation {
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    North,
    NorthEast,
}

impl Orientation {
    /// Candidate placements for a node callout, in tie-break order.
    pub const ALL: [Orientation; 8] = [
        Orientation::East,
        Orientation::SouthEast,
        Orientation::South,
        Orientation::SouthWest,
        Orientation::West,
        Orientation::NorthWest,
        Orientation::North,
        Orientation::NorthEast,
    ];

    /// Bearing of the placement in degrees, matching [`graphdiagram_core::Node::angle_to`].
    pub fn angle(self) -> f64 {
        match self {
            Orientation::East => 0.0,
            Orientation::SouthEast => 45.0,
            Orientation::South => 90.0,
            Orientation::SouthWest => 135.0,
            Orientation::West => 180.0,
            Orientation::NorthWest => -135.0,
            Orientation::North => -90.0,
            Orientation::NorthEast => -45.0,
        }
    }

    /// Scale applied to the callout template to flip it into this placement's quadrant.
    pub fn mirror(self) -> (f64, f64) {
        match self {
            Orientation::East | Orientation::SouthEast | Orientation::South => (1.0, 1.0),
            Orientation::SouthWest | Orientation::West => (-1.0, 1.0),
            Orientation::NorthWest => (-1.0, -1.0),
            Orientation::North | Orientation::NorthEast => (1.0, -1.0),
        }
    }

    pub fn style(self) -> PathStyle {
        match self {
            Orientation::East | Orientation::West => PathStyle::Horizontal,
            Orientation::North | Orientation::South => PathStyle::Vertical,
            Orientation::SouthEast
            | Orientation::SouthWest
            | Orientation::NorthWest
            | Orientation::NorthEast => PathStyle::Diagonal,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Orientation::East => "EAST",
            Orientation::SouthEast => "SOUTH-EAST",
            Orientation::South => "SOUTH",
            Orientation::SouthWest => "SOUTH-WEST",
            Orientation::West => "WEST",
            Orientation::NorthWest => "NORTH-WEST",
            Orientation::North => "NORTH",
            Orientation::NorthEast => "NORTH-EAST",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

fn angular_separation(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Picks the placement furthest, in angle, from every neighbour bearing.
///
/// With no neighbours every placement scores 180 and the first one wins.
pub fn choose_node_orientation(neighbour_bearings: &[f64]) -> Orientation {
    let score = |orientation: Orientation| {
        neighbour_bearings
            .iter()
            .map(|&bearing| angular_separation(bearing, orientation.angle()))
            .fold(180.0_f64, f64::min)
    };

    let mut best = Orientation::ALL[0];
    let mut best_score = score(best);
    for &candidate in &Orientation::ALL[1..] {
        let s = score(candidate);
        if s > best_score {
            best = candidate;
            best_score = s;
        }
    }
    best
}

/// Placement for a relationship callout, chosen from the arrow's own bearing.
pub fn choose_relationship_orientation(angle: f64) -> Orientation {
    let positive = if angle < 0.0 { angle + 180.0 } else { angle };
    if !(5.0..=175.0).contains(&positive) {
        Orientation::South
    } else if positive < 85.0 {
        Orientation::SouthWest
    } else if positive < 90.0 {
        Orientation::West
    } else if positive == 90.0 {
        if angle > 0.0 {
            Orientation::West
        } else {
            Orientation::East
        }
    } else if positive < 95.0 {
        Orientation::East
    } else {
        Orientation::SouthEast
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_neighbour_pushes_the_callout_opposite() {
        assert_eq!(choose_node_orientation(&[0.0]), Orientation::West);
        assert_eq!(choose_node_orientation(&[180.0]), Orientation::East);
        assert_eq!(choose_node_orientation(&[-90.0]), Orientation::South);
        assert_eq!(choose_node_orientation(&[90.0]), Orientation::North);
    }

    #[test]
    fn diagonal_neighbours_yield_the_opposite_diagonal() {
        assert_eq!(choose_node_orientation(&[45.0]), Orientation::NorthWest);
        assert_eq!(choose_node_orientation(&[135.0]), Orientation::NorthEast);
        assert_eq!(choose_node_orientation(&[-135.0]), Orientation::SouthEast);
        assert_eq!(choose_node_orientation(&[-45.0]), Orientation::SouthWest);
    }

    #[test]
    fn no_neighbours_picks_the_first_placement() {
        assert_eq!(choose_node_orientation(&[]), Orientation::East);
    }

    #[test]
    fn ties_go_to_declaration_order() {
        // East and west neighbours leave north and south equally clear.
        assert_eq!(choose_node_orientation(&[0.0, 180.0]), Orientation::South);
    }

    #[test]
    fn several_neighbours_maximise_the_smallest_gap() {
        assert_eq!(
            choose_node_orientation(&[0.0, 90.0, 180.0]),
            Orientation::North
        );
        assert_eq!(choose_node_orientation(&[10.0, 350.0]), Orientation::West);
    }

    #[test]
    fn relationship_bands() {
        assert_eq!(choose_relationship_orientation(0.0), Orientation::South);
        assert_eq!(choose_relationship_orientation(4.9), Orientation::South);
        assert_eq!(choose_relationship_orientation(180.0), Orientation::South);
        assert_eq!(choose_relationship_orientation(-178.0), Orientation::South);
        assert_eq!(choose_relationship_orientation(5.0), Orientation::SouthWest);
        assert_eq!(choose_relationship_orientation(45.0), Orientation::SouthWest);
        assert_eq!(choose_relationship_orientation(-135.0), Orientation::SouthWest);
        assert_eq!(choose_relationship_orientation(85.0), Orientation::West);
        assert_eq!(choose_relationship_orientation(90.0), Orientation::West);
        assert_eq!(choose_relationship_orientation(-90.0), Orientation::East);
        assert_eq!(choose_relationship_orientation(94.0), Orientation::East);
        assert_eq!(choose_relationship_orientation(95.0), Orientation::SouthEast);
        assert_eq!(choose_relationship_orientation(-95.0), Orientation::West);
        assert_eq!(choose_relationship_orientation(175.0), Orientation::SouthEast);
        assert_eq!(choose_relationship_orientation(175.1), Orientation::South);
        assert_eq!(choose_relationship_orientation(135.0), Orientation::SouthEast);
        assert_eq!(choose_relationship_orientation(-45.0), Orientation::SouthEast);
    }

    #[test]
    fn placements_carry_style_and_mirror() {
        assert_eq!(Orientation::West.style(), PathStyle::Horizontal);
        assert_eq!(Orientation::North.style(), PathStyle::Vertical);
        assert_eq!(Orientation::NorthWest.style(), PathStyle::Diagonal);
        assert_eq!(Orientation::SouthWest.mirror(), (-1.0, 1.0));
        assert_eq!(Orientation::North.mirror(), (1.0, -1.0));
        assert_eq!(Orientation::SouthWest.key(), "SOUTH-WEST");
        assert_eq!(
            serde_json::to_string(&Orientation::NorthEast).unwrap(),
            "\"NORTH-EAST\""
        );
    }
}
