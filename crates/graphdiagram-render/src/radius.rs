use serde::{Deserialize, Serialize};

/// Radii of a drawn node circle.
///
/// `inside` is the content radius, `border` the stroke width and `arrow_margin` the gap left
/// between the stroke and an incident arrow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Radius {
    pub inside: f64,
    pub border: f64,
    pub arrow_margin: f64,
}

impl Radius {
    pub fn new(inside: f64) -> Self {
        Self {
            inside,
            border: 0.0,
            arrow_margin: 0.0,
        }
    }

    pub fn with_border(mut self, border: f64) -> Self {
        self.border = border;
        self
    }

    pub fn with_arrow_margin(mut self, margin: f64) -> Self {
        self.arrow_margin = margin;
        self
    }

    /// Stroke centreline; the radius to draw the circle with.
    pub fn mid(&self) -> f64 {
        self.inside + self.border / 2.0
    }

    pub fn outside(&self) -> f64 {
        self.inside + self.border
    }

    /// Distance from the node centre at which an outgoing arrow starts.
    pub fn start_relationship(&self) -> f64 {
        self.inside + self.border + self.arrow_margin
    }

    /// Distance from the node centre at which an incoming arrow's head ends.
    pub fn end_relationship(&self) -> f64 {
        self.inside + self.border + self.arrow_margin
    }
}
