//! Diagram extent accumulation and viewport fitting.

use crate::path::fmt_number;
use crate::radius::Radius;
use graphdiagram_core::{Point, Transform};
use serde::{Deserialize, Serialize};

/// Axis-aligned box in canonical form (`x1 <= x2`, `y1 <= y2`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.x1 <= other.x1 && self.y1 <= other.y1 && self.x2 >= other.x2 && self.y2 >= other.y2
    }

    pub fn expand(&self, by: f64) -> BoundingBox {
        BoundingBox {
            x1: self.x1 - by,
            y1: self.y1 - by,
            x2: self.x2 + by,
            y2: self.y2 + by,
        }
    }

    pub fn translate(&self, by: Point) -> BoundingBox {
        BoundingBox {
            x1: self.x1 + by.x,
            y1: self.y1 + by.y,
            x2: self.x2 + by.x,
            y2: self.y2 + by.y,
        }
    }
}

/// Rectangle given by a corner and a signed size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub fn box_normalise(rect: Rect) -> BoundingBox {
    let (x1, x2) = if rect.width < 0.0 {
        (rect.x + rect.width, rect.x)
    } else {
        (rect.x, rect.x + rect.width)
    };
    let (y1, y2) = if rect.height < 0.0 {
        (rect.y + rect.height, rect.y)
    } else {
        (rect.y, rect.y + rect.height)
    };
    BoundingBox { x1, y1, x2, y2 }
}

/// Smallest box covering every input; the zero box when there are none.
pub fn box_union(boxes: impl IntoIterator<Item = BoundingBox>) -> BoundingBox {
    boxes
        .into_iter()
        .reduce(|acc, b| acc.union(&b))
        .unwrap_or_default()
}

/// Square around a node's drawn circle, border included.
pub fn node_box(position: Point, radius: &Radius) -> BoundingBox {
    let r = radius.outside();
    BoundingBox::new(position.x - r, position.y - r, position.x + r, position.y + r)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// SVG `viewBox`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn to_box(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn attribute(&self) -> String {
        format!(
            "{} {} {} {}",
            fmt_number(self.x),
            fmt_number(self.y),
            fmt_number(self.width),
            fmt_number(self.height)
        )
    }
}

/// Centres `extent` in a view of the given size, scaling the view up uniformly when the
/// extent overflows it. The view is never scaled down.
pub fn view_box(view: Size, extent: BoundingBox) -> ViewBox {
    let x_scale = extent.width() / view.width;
    let y_scale = extent.height() / view.height;
    let scale = if x_scale < 1.0 && y_scale < 1.0 {
        1.0
    } else {
        x_scale.max(y_scale)
    };
    let width = view.width * scale;
    let height = view.height * scale;
    ViewBox {
        x: (extent.width() - width) / 2.0 + extent.x1,
        y: (extent.height() - height) / 2.0 + extent.y1,
        width,
        height,
    }
}

/// Fitted view box and, when the output element should take the diagram's size, that size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub view_box: ViewBox,
    pub element_size: Option<Size>,
}

/// View box equal to the extent, element sized at the external display scale.
pub fn size_to_fit(extent: BoundingBox, external_scale: f64) -> Viewport {
    Viewport {
        view_box: ViewBox {
            x: extent.x1,
            y: extent.y1,
            width: extent.width(),
            height: extent.height(),
        },
        element_size: Some(Size::new(
            extent.width() * external_scale,
            extent.height() * external_scale,
        )),
    }
}

/// Keeps the current view box while the extent still fits inside it; otherwise grows it to
/// cover both the current box and the ideal fit.
pub fn grow_but_do_not_shrink(current: Option<ViewBox>, view: Size, extent: BoundingBox) -> ViewBox {
    let ideal = view_box(view, extent);
    let Some(current) = current else {
        return ideal;
    };
    let effective = view_box(view, current.to_box());
    if effective.to_box().contains(&extent) {
        return effective;
    }
    view_box(view, current.to_box().union(&ideal.to_box()))
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum ViewportPolicy {
    CenterOrScale {
        view: Size,
    },
    #[default]
    SizeToFit,
    GrowButDoNotShrink {
        view: Size,
        current: Option<ViewBox>,
    },
}

impl ViewportPolicy {
    pub fn fit(&self, extent: BoundingBox, transform: &Transform) -> Viewport {
        match *self {
            ViewportPolicy::CenterOrScale { view } => Viewport {
                view_box: view_box(view, extent),
                element_size: None,
            },
            ViewportPolicy::SizeToFit => size_to_fit(extent, transform.external_scale),
            ViewportPolicy::GrowButDoNotShrink { view, current } => Viewport {
                view_box: grow_but_do_not_shrink(current, view, extent),
                element_size: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_of_nothing_is_the_zero_box() {
        assert_eq!(box_union([]), BoundingBox::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn union_ignores_order_and_grouping() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(-5.0, 3.0, 4.0, 20.0);
        let c = BoundingBox::new(7.0, -8.0, 9.0, 1.0);
        let expected = BoundingBox::new(-5.0, -8.0, 10.0, 20.0);
        assert_eq!(box_union([a, b, c]), expected);
        assert_eq!(box_union([c, a, b]), expected);
        assert_eq!(box_union([box_union([a, b]), c]), expected);
        assert_eq!(box_union([a, box_union([b, c])]), expected);
    }

    #[test]
    fn normalise_flips_negative_extents() {
        let b = box_normalise(Rect {
            x: 10.0,
            y: 5.0,
            width: -4.0,
            height: -5.0,
        });
        assert_eq!(b, BoundingBox::new(6.0, 0.0, 10.0, 5.0));
        let b = box_normalise(Rect {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
        });
        assert_eq!(b, BoundingBox::new(1.0, 2.0, 4.0, 6.0));
    }

    #[test]
    fn node_box_covers_the_outside_radius() {
        let r = Radius::new(46.0).with_border(8.0).with_arrow_margin(15.0);
        assert_eq!(
            node_box(Point::new(100.0, 50.0), &r),
            BoundingBox::new(46.0, -4.0, 154.0, 104.0)
        );
        let r = Radius::new(50.0).with_border(4.0);
        assert_eq!(
            node_box(Point::new(100.0, 100.0), &r),
            BoundingBox::new(46.0, 46.0, 154.0, 154.0)
        );
    }

    #[test]
    fn small_diagram_is_centred_at_natural_scale() {
        let vb = view_box(
            Size::new(1000.0, 500.0),
            BoundingBox::new(33.0, 66.0, 533.0, 316.0),
        );
        assert_eq!(
            vb,
            ViewBox {
                x: -217.0,
                y: -59.0,
                width: 1000.0,
                height: 500.0
            }
        );
        assert_eq!(vb.attribute(), "-217 -59 1000 500");
    }

    #[test]
    fn wide_diagram_scales_up_and_centres_vertically() {
        let vb = view_box(
            Size::new(1000.0, 500.0),
            BoundingBox::new(0.0, 0.0, 2000.0, 500.0),
        );
        assert_eq!(
            vb,
            ViewBox {
                x: 0.0,
                y: -250.0,
                width: 2000.0,
                height: 1000.0
            }
        );
    }

    #[test]
    fn size_to_fit_uses_the_external_scale() {
        let vp = size_to_fit(BoundingBox::new(-10.0, -20.0, 90.0, 30.0), 0.5);
        assert_eq!(
            vp.view_box,
            ViewBox {
                x: -10.0,
                y: -20.0,
                width: 100.0,
                height: 50.0
            }
        );
        assert_eq!(vp.element_size, Some(Size::new(50.0, 25.0)));
    }

    #[test]
    fn grow_keeps_a_view_that_still_fits() {
        let view = Size::new(100.0, 100.0);
        let current = ViewBox {
            x: -100.0,
            y: -100.0,
            width: 400.0,
            height: 400.0,
        };
        let vb = grow_but_do_not_shrink(Some(current), view, BoundingBox::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(vb, current);
    }

    #[test]
    fn grow_expands_to_cover_a_larger_diagram() {
        let view = Size::new(100.0, 100.0);
        let current = ViewBox {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        };
        let extent = BoundingBox::new(50.0, 0.0, 250.0, 100.0);
        let vb = grow_but_do_not_shrink(Some(current), view, extent);
        assert!(vb.to_box().contains(&extent));
        assert!(vb.to_box().contains(&current.to_box()));
        assert_eq!(vb.width, vb.height);
    }

    #[test]
    fn grow_without_a_current_view_is_the_ideal_fit() {
        let view = Size::new(100.0, 50.0);
        let extent = BoundingBox::new(0.0, 0.0, 20.0, 20.0);
        assert_eq!(
            grow_but_do_not_shrink(None, view, extent),
            view_box(view, extent)
        );
    }

    #[test]
    fn policies_dispatch() {
        let extent = BoundingBox::new(0.0, 0.0, 20.0, 10.0);
        let t = Transform::default().with_external_scale(2.0);
        let vp = ViewportPolicy::SizeToFit.fit(extent, &t);
        assert_eq!(vp.element_size, Some(Size::new(40.0, 20.0)));
        let vp = ViewportPolicy::CenterOrScale {
            view: Size::new(40.0, 40.0),
        }
        .fit(extent, &t);
        assert_eq!(vp.element_size, None);
        assert_eq!(vp.view_box.width, 40.0);
        assert_eq!(vp.view_box.x, -10.0);
    }
}
