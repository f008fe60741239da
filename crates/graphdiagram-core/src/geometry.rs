use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotates the point about the origin by `degrees` (SVG `rotate()` convention, y down).
    pub fn rotate(self, degrees: f64) -> Self {
        let radians = degrees * std::f64::consts::PI / 180.0;
        let (sin, cos) = radians.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    pub fn translate(self, by: Point) -> Self {
        Self {
            x: self.x + by.x,
            y: self.y + by.y,
        }
    }
}

/// Maps model coordinates to drawing coordinates.
///
/// `internal_scale` multiplies node positions (and therefore inter-node distances);
/// `external_scale` is the display scale applied to the finished drawing, used when the
/// output element is sized to fit the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub internal_scale: f64,
    pub external_scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            internal_scale: 1.0,
            external_scale: 1.0,
        }
    }
}

impl Transform {
    pub fn with_internal_scale(mut self, scale: f64) -> Self {
        self.internal_scale = scale;
        self
    }

    pub fn with_external_scale(mut self, scale: f64) -> Self {
        self.external_scale = scale;
        self
    }

    pub fn apply(&self, p: Point) -> Point {
        Point {
            x: p.x * self.internal_scale,
            y: p.y * self.internal_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn rotate_quarter_turn_follows_svg_convention() {
        let p = Point::new(10.0, 0.0).rotate(90.0);
        assert!(close(p.x, 0.0), "{p:?}");
        assert!(close(p.y, 10.0), "{p:?}");
    }

    #[test]
    fn transform_scales_positions_only_by_internal_scale() {
        let t = Transform::default()
            .with_internal_scale(2.0)
            .with_external_scale(3.0);
        assert_eq!(t.apply(Point::new(12.0, 34.0)), Point::new(24.0, 68.0));
    }
}
