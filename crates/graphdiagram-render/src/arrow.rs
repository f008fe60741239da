//! Relationship arrow outlines.
//!
//! Arrows are built in a local frame: the start node's centre is the origin and the end node's
//! centre lies on the positive x axis. The caller rotates and translates the outline into place.

use crate::path::PathBuilder;
use crate::{Error, Result};
use graphdiagram_core::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowOutline {
    /// Closed SVG path data in the arrow's local frame.
    pub path: String,
    /// Anchor for the relationship's label and property callout, in the local frame.
    pub apex: Point,
}

/// Straight arrow along the x axis from `start` to `end`.
///
/// The shaft is `arrow_width` wide; the head is `4 * arrow_width` wide and long and always
/// points at `end`, whichever side of `start` it lies.
pub fn horizontal_arrow_outline(start: f64, end: f64, arrow_width: f64) -> ArrowOutline {
    let shaft_radius = arrow_width / 2.0;
    let head_radius = arrow_width * 2.0;
    let head_length = arrow_width * 4.0;
    let shoulder = if start < end {
        end - head_length
    } else {
        end + head_length
    };
    let path = PathBuilder::new()
        .move_to(start, shaft_radius)
        .line_to(shoulder, shaft_radius)
        .line_to(shoulder, head_radius)
        .line_to(end, 0.0)
        .line_to(shoulder, -head_radius)
        .line_to(shoulder, -shaft_radius)
        .line_to(start, -shaft_radius)
        .close()
        .finish();
    ArrowOutline {
        path,
        apex: Point::new(start + (shoulder - start) / 2.0, 0.0),
    }
}

fn sub(a: Point, b: Point) -> Point {
    Point::new(a.x - b.x, a.y - b.y)
}

fn add(a: Point, b: Point) -> Point {
    Point::new(a.x + b.x, a.y + b.y)
}

fn scale(a: Point, k: f64) -> Point {
    Point::new(a.x * k, a.y * k)
}

fn dot(a: Point, b: Point) -> f64 {
    a.x * b.x + a.y * b.y
}

fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

fn length(a: Point) -> f64 {
    dot(a, a).sqrt()
}

fn perp(a: Point) -> Point {
    Point::new(-a.y, a.x)
}

/// Arcs wider than this many centre distances are treated as straight lines. Past the
/// offset where the arc flattens out the tangents become parallel and the radius diverges.
const MAX_ARC_RADIUS_RATIO: f64 = 1e6;

fn unit(a: Point) -> Option<Point> {
    let len = length(a);
    (len > f64::EPSILON).then(|| scale(a, 1.0 / len))
}

/// Circular shaft of a curved arrow, in the local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ArcGeometry {
    /// Where the shaft leaves the start node's attachment circle.
    pub start_attach: Point,
    /// Where the shaft meets the end node's attachment circle inflated by the head length.
    pub end_attach: Point,
    pub centre: Point,
    pub radius: f64,
}

/// Intersection of the line `from -> through` with a circle, taking the root nearer to `from`.
fn nearer_intersection(from: Point, through: Point, centre: Point, radius: f64) -> Option<Point> {
    let u = unit(sub(through, from))?;
    let w = sub(from, centre);
    let b = dot(u, w);
    let c = dot(w, w) - radius * radius;
    let discriminant = b * b - c;
    if discriminant.is_nan() || discriminant < 0.0 {
        return None;
    }
    let t = -b - discriminant.sqrt();
    Some(add(from, scale(u, t)))
}

/// Finds the arc joining two node circles at equal angles.
///
/// The attachment points are antihomologous with respect to the circles' external homothetic
/// centre, so the circle through them that is orthogonal to one node circle is orthogonal to
/// the other as well. Its centre is where the two circles' tangents at the attachment points
/// cross.
pub(crate) fn arc_geometry(
    start_radius: f64,
    end_radius: f64,
    end_centre: f64,
    min_offset: f64,
    head_length: f64,
) -> Result<ArcGeometry> {
    let invalid = || Error::InvalidOffset { offset: min_offset };
    let inflated = end_radius + head_length;
    if min_offset == 0.0 || inflated == start_radius || !min_offset.is_finite() {
        return Err(invalid());
    }

    let end_origin = Point::new(end_centre, 0.0);
    let homothetic_centre = Point::new(start_radius * end_centre / (start_radius - inflated), 0.0);

    let (start_attach, end_attach) = if inflated > start_radius {
        let offset_angle = min_offset / start_radius;
        let start_attach = Point::new(
            offset_angle.cos() * start_radius,
            offset_angle.sin() * start_radius,
        );
        let end_attach =
            nearer_intersection(homothetic_centre, start_attach, end_origin, inflated)
                .ok_or_else(invalid)?;
        (start_attach, end_attach)
    } else {
        let offset_angle = min_offset / inflated;
        let end_attach = Point::new(
            end_centre - offset_angle.cos() * inflated,
            offset_angle.sin() * inflated,
        );
        let start_attach =
            nearer_intersection(homothetic_centre, end_attach, Point::ORIGIN, start_radius)
                .ok_or_else(invalid)?;
        (start_attach, end_attach)
    };

    let start_tangent = perp(start_attach);
    let end_tangent = perp(sub(end_attach, end_origin));
    let denominator = cross(start_tangent, end_tangent);
    if denominator.abs() <= f64::EPSILON * length(start_tangent) * length(end_tangent) {
        return Err(invalid());
    }
    let k = cross(sub(end_attach, start_attach), end_tangent) / denominator;
    let centre = add(start_attach, scale(start_tangent, k));
    let radius = length(sub(start_attach, centre));
    if !radius.is_finite() || radius > MAX_ARC_RADIUS_RATIO * end_centre.abs() {
        return Err(invalid());
    }

    Ok(ArcGeometry {
        start_attach,
        end_attach,
        centre,
        radius,
    })
}

/// Arrow whose shaft bows sideways by `min_offset` between two node circles.
///
/// `start_radius` and `end_radius` are the attachment distances of the two nodes and
/// `end_centre` the distance between their centres. A positive offset bows towards +y.
/// `min_offset` must be non-zero; use [`horizontal_arrow_outline`] for the straight case.
pub fn curved_arrow_outline(
    start_radius: f64,
    end_radius: f64,
    end_centre: f64,
    min_offset: f64,
    arrow_width: f64,
    head_width: f64,
    head_length: f64,
) -> Result<ArrowOutline> {
    let arc = arc_geometry(start_radius, end_radius, end_centre, min_offset, head_length)?;
    let invalid = || Error::InvalidOffset { offset: min_offset };

    let shaft_radius = arrow_width / 2.0;
    let head_radius = head_width / 2.0;
    let start_normal = unit(sub(arc.start_attach, arc.centre)).ok_or_else(invalid)?;
    let end_normal = unit(sub(arc.end_attach, arc.centre)).ok_or_else(invalid)?;
    let towards_end = unit(sub(Point::new(end_centre, 0.0), arc.end_attach)).ok_or_else(invalid)?;
    let offset = |p: Point, normal: Point, d: f64| add(p, scale(normal, d));

    // Positive offsets bow towards +y, where the shaft runs towards decreasing angles.
    let sweep = min_offset < 0.0;
    let path = PathBuilder::new()
        .move_to_point(offset(arc.start_attach, start_normal, -shaft_radius))
        .arc_to_point(
            arc.radius - shaft_radius,
            false,
            sweep,
            offset(arc.end_attach, end_normal, -shaft_radius),
        )
        .line_to_point(offset(arc.end_attach, end_normal, -head_radius))
        .line_to_point(offset(arc.end_attach, towards_end, head_length))
        .line_to_point(offset(arc.end_attach, end_normal, head_radius))
        .line_to_point(offset(arc.end_attach, end_normal, shaft_radius))
        .arc_to_point(
            arc.radius + shaft_radius,
            false,
            !sweep,
            offset(arc.start_attach, start_normal, shaft_radius),
        )
        .close()
        .finish();

    Ok(ArrowOutline {
        path,
        apex: arc_midpoint(&arc).ok_or_else(invalid)?,
    })
}

/// Midpoint of the minor arc: the chord midpoint pushed out by the sagitta, away from the
/// arc centre.
fn arc_midpoint(arc: &ArcGeometry) -> Option<Point> {
    let chord = sub(arc.end_attach, arc.start_attach);
    let half_chord = length(chord) / 2.0;
    let midpoint = add(arc.start_attach, scale(chord, 0.5));
    let mut normal = perp(unit(chord)?);
    if dot(normal, sub(midpoint, arc.centre)) < 0.0 {
        normal = scale(normal, -1.0);
    }
    let rise = (arc.radius * arc.radius - half_chord * half_chord).max(0.0).sqrt();
    let sagitta = half_chord * half_chord / (arc.radius + rise);
    Some(add(midpoint, scale(normal, sagitta)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgtypes::{PathParser, PathSegment};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn distance(a: Point, b: Point) -> f64 {
        length(sub(a, b))
    }

    #[test]
    fn arrow_from_left_to_right() {
        let arrow = horizontal_arrow_outline(7.0, 100.0, 8.0);
        assert_eq!(
            arrow.path,
            "M 7 4 L 68 4 L 68 16 L 100 0 L 68 -16 L 68 -4 L 7 -4 Z"
        );
        assert_eq!(arrow.apex, Point::new(37.5, 0.0));
    }

    #[test]
    fn arrow_from_right_to_left() {
        let arrow = horizontal_arrow_outline(100.0, 7.0, 8.0);
        assert_eq!(
            arrow.path,
            "M 100 4 L 39 4 L 39 16 L 7 0 L 39 -16 L 39 -4 L 100 -4 Z"
        );
        assert_eq!(arrow.apex, Point::new(69.5, 0.0));
    }

    #[test]
    fn curved_arrow_needs_a_nonzero_offset() {
        let err = curved_arrow_outline(65.0, 65.0, 200.0, 0.0, 8.0, 32.0, 32.0).unwrap_err();
        assert!(matches!(err, Error::InvalidOffset { .. }));
    }

    #[test]
    fn curved_arrow_rejects_equal_inflated_radii() {
        let err = curved_arrow_outline(97.0, 65.0, 200.0, 20.0, 8.0, 32.0, 32.0).unwrap_err();
        assert!(matches!(err, Error::InvalidOffset { offset } if offset == 20.0));
    }

    #[test]
    fn arc_meets_both_circles_at_right_angles() {
        for (start, end, centre, offset) in [
            (65.0, 65.0, 200.0, 20.0),
            (65.0, 65.0, 200.0, -40.0),
            (100.0, 40.0, 300.0, 30.0),
        ] {
            let arc = arc_geometry(start, end, centre, offset, 32.0).unwrap();
            let end_origin = Point::new(centre, 0.0);
            assert!(close(length(arc.start_attach), start));
            assert!(close(distance(arc.end_attach, end_origin), end + 32.0));
            assert!(close(distance(arc.end_attach, arc.centre), arc.radius));
            assert!(close(dot(sub(arc.start_attach, arc.centre), arc.start_attach), 0.0));
            assert!(close(
                dot(
                    sub(arc.end_attach, arc.centre),
                    sub(arc.end_attach, end_origin)
                ),
                0.0
            ));
            assert_eq!(arc.start_attach.y > 0.0, offset > 0.0);
            assert_eq!(arc.end_attach.y > 0.0, offset > 0.0);
        }
    }

    #[test]
    fn attachment_angle_follows_the_offset() {
        let arc = arc_geometry(65.0, 65.0, 200.0, 20.0, 32.0).unwrap();
        let angle = arc.start_attach.y.atan2(arc.start_attach.x);
        assert!(close(angle, 20.0 / 65.0));
    }

    #[test]
    fn apex_bulges_towards_the_offset_and_mirrors() {
        let up = curved_arrow_outline(65.0, 65.0, 200.0, 20.0, 8.0, 32.0, 32.0).unwrap();
        let down = curved_arrow_outline(65.0, 65.0, 200.0, -20.0, 8.0, 32.0, 32.0).unwrap();
        assert!(up.apex.y > 0.0);
        assert!(close(up.apex.x, down.apex.x));
        assert!(close(up.apex.y, -down.apex.y));

        let arc = arc_geometry(65.0, 65.0, 200.0, 20.0, 32.0).unwrap();
        assert!(close(distance(up.apex, arc.centre), arc.radius));
        assert!(up.apex.y > arc.start_attach.y && up.apex.y > arc.end_attach.y);
    }

    #[test]
    fn apex_stays_on_strongly_bent_arcs() {
        let arc = arc_geometry(73.0, 73.0, 300.0, 110.0, 32.0).unwrap();
        let arrow = curved_arrow_outline(73.0, 73.0, 300.0, 110.0, 8.0, 32.0, 32.0).unwrap();
        assert!((distance(arrow.apex, arc.centre) - arc.radius).abs() < 1e-6);
        assert!((arrow.apex.x - 126.195).abs() < 1e-3, "{:?}", arrow.apex);
        assert!((arrow.apex.y - 199.518).abs() < 1e-3, "{:?}", arrow.apex);
    }

    #[test]
    fn flattened_arcs_are_rejected() {
        for offset in [125.0, 130.0, -130.0, 150.0] {
            let err = curved_arrow_outline(73.0, 73.0, 300.0, offset, 8.0, 32.0, 32.0).unwrap_err();
            assert!(matches!(err, Error::InvalidOffset { .. }), "offset {offset}");
        }
    }

    #[test]
    fn curved_outline_is_two_opposing_arcs_around_the_head() {
        let up = curved_arrow_outline(65.0, 65.0, 200.0, 20.0, 8.0, 32.0, 32.0).unwrap();
        let segments: Vec<PathSegment> = PathParser::from(up.path.as_str()).flatten().collect();
        assert_eq!(segments.len(), 8, "{}", up.path);
        assert!(matches!(segments[0], PathSegment::MoveTo { abs: true, .. }));
        assert!(matches!(
            segments[1],
            PathSegment::EllipticalArc { sweep: false, large_arc: false, .. }
        ));
        assert!(
            segments[2..6]
                .iter()
                .all(|s| matches!(s, PathSegment::LineTo { .. }))
        );
        assert!(matches!(
            segments[6],
            PathSegment::EllipticalArc { sweep: true, .. }
        ));
        assert!(matches!(segments[7], PathSegment::ClosePath { .. }));

        let down = curved_arrow_outline(65.0, 65.0, 200.0, -20.0, 8.0, 32.0, 32.0).unwrap();
        let segments: Vec<PathSegment> = PathParser::from(down.path.as_str()).flatten().collect();
        assert!(matches!(
            segments[1],
            PathSegment::EllipticalArc { sweep: true, .. }
        ));
    }

    #[test]
    fn curved_head_tip_touches_the_end_node() {
        let up = curved_arrow_outline(65.0, 65.0, 200.0, 20.0, 8.0, 32.0, 32.0).unwrap();
        let segments: Vec<PathSegment> = PathParser::from(up.path.as_str()).flatten().collect();
        let PathSegment::LineTo { x, y, .. } = segments[3] else {
            panic!("expected the arrow tip, got {:?}", segments[3]);
        };
        assert!(close(distance(Point::new(x, y), Point::new(200.0, 0.0)), 65.0));
    }
}
