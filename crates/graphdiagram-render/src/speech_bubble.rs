//! Property callouts ("speech bubbles").
//!
//! Each callout is drawn from one of three templates whose pointed corner sits at the origin
//! and whose body lies in the +x/+y direction. The chosen [`Orientation`] mirrors the template
//! into place and the whole outline is translated to the entity's anchor point.

use crate::orientation::{Orientation, PathStyle};
use crate::path::{PathBuilder, fmt_number};
use crate::radius::Radius;
use crate::scaling::{BoundingBox, Rect, Size, box_normalise};
use crate::style::BubbleStyle;
use crate::text::{TextMeasurer, TextStyle};
use graphdiagram_core::{Point, Properties};
use serde::{Deserialize, Serialize};

/// One `key: value` line of a callout, with text origins in drawing coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRow {
    pub key: String,
    pub value: String,
    /// Top-left corner of the key text.
    pub key_origin: Point,
    /// Top-left corner of the value text.
    pub value_origin: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechBubble {
    pub orientation: Orientation,
    /// Outline in template coordinates; place it with `outline_transform`.
    pub outline_path: String,
    /// SVG `transform` attribute moving the template onto the anchor.
    pub outline_transform: String,
    pub anchor: Point,
    pub text_size: Size,
    pub line_height: f64,
    pub rows: Vec<PropertyRow>,
    pub bounding_box: BoundingBox,
}

/// Rounded callout outline around a `text` block, pointed corner at the origin.
pub fn speech_bubble_path(style: PathStyle, text: Size, margin: f64, padding: f64) -> String {
    let (w, h, m, p) = (text.width, text.height, margin, padding);
    let b = PathBuilder::new().move_to(0.0, 0.0);
    match style {
        PathStyle::Diagonal => b
            .line_to(m + p, m)
            .line_to(m + p + w, m)
            .arc_to(p, false, true, m + 2.0 * p + w, m + p)
            .line_to(m + 2.0 * p + w, m + p + h)
            .arc_to(p, false, true, m + p + w, m + 2.0 * p + h)
            .line_to(m + p, m + 2.0 * p + h)
            .arc_to(p, false, true, m, m + p + h)
            .line_to(m, m + p),
        PathStyle::Horizontal => b
            .line_to(m, -p)
            .line_to(m, -h / 2.0)
            .arc_to(p, false, true, m + p, -h / 2.0 - p)
            .line_to(m + p + w, -h / 2.0 - p)
            .arc_to(p, false, true, m + 2.0 * p + w, -h / 2.0)
            .line_to(m + 2.0 * p + w, h / 2.0)
            .arc_to(p, false, true, m + p + w, h / 2.0 + p)
            .line_to(m + p, h / 2.0 + p)
            .arc_to(p, false, true, m, h / 2.0)
            .line_to(m, p),
        PathStyle::Vertical => b
            .line_to(-p, m)
            .line_to(-w / 2.0, m)
            .arc_to(p, false, false, -w / 2.0 - p, m + p)
            .line_to(-w / 2.0 - p, m + p + h)
            .arc_to(p, false, false, -w / 2.0, m + 2.0 * p + h)
            .line_to(w / 2.0, m + 2.0 * p + h)
            .arc_to(p, false, false, w / 2.0 + p, m + p + h)
            .line_to(w / 2.0 + p, m + p)
            .arc_to(p, false, false, w / 2.0, m)
            .line_to(p, m),
    }
    .close()
    .finish()
}

/// Text block of the unmirrored template.
fn text_block(style: PathStyle, text: Size, margin: f64, padding: f64) -> Rect {
    let inset = margin + padding;
    match style {
        PathStyle::Diagonal => Rect {
            x: inset,
            y: inset,
            width: text.width,
            height: text.height,
        },
        PathStyle::Horizontal => Rect {
            x: inset,
            y: -text.height / 2.0,
            width: text.width,
            height: text.height,
        },
        PathStyle::Vertical => Rect {
            x: -text.width / 2.0,
            y: inset,
            width: text.width,
            height: text.height,
        },
    }
}

/// Point on a node's drawn circle where a callout in `orientation` attaches.
pub fn node_bubble_anchor(centre: Point, radius: &Radius, orientation: Orientation) -> Point {
    let (mx, my) = orientation.mirror();
    let mid = radius.mid();
    let offset = match orientation.style() {
        PathStyle::Horizontal => Point::new(mid * mx, 0.0),
        PathStyle::Vertical => Point::new(0.0, mid * my),
        PathStyle::Diagonal => {
            let d = mid * std::f64::consts::FRAC_1_SQRT_2;
            Point::new(d * mx, d * my)
        }
    };
    centre.translate(offset)
}

/// Lays out the callout for `properties`, or `None` when there are none to show.
pub fn layout_speech_bubble(
    properties: &Properties,
    style: &BubbleStyle,
    orientation: Orientation,
    anchor: Point,
    measurer: &dyn TextMeasurer,
) -> Option<SpeechBubble> {
    if properties.is_empty() {
        return None;
    }

    let text_style = TextStyle::new(style.font_size, style.font_family.clone());
    let line_height = style.font_size;
    let measure = |text: &str| measurer.measure_width(text, &text_style);
    let keys_width = properties
        .list()
        .map(|p| measure(&format!("{}: ", p.key)))
        .fold(0.0_f64, f64::max);
    let values_width = properties
        .list()
        .map(|p| measure(p.value))
        .fold(0.0_f64, f64::max);
    let text_size = Size::new(
        keys_width + values_width,
        properties.len() as f64 * line_height,
    );

    let path_style = orientation.style();
    let (mx, my) = orientation.mirror();
    let template = text_block(path_style, text_size, style.margin, style.padding);
    let mirrored = box_normalise(Rect {
        x: template.x * mx,
        y: template.y * my,
        width: template.width * mx,
        height: template.height * my,
    })
    .translate(anchor);

    let rows = properties
        .list()
        .enumerate()
        .map(|(i, p)| {
            let top = mirrored.y1 + i as f64 * line_height;
            PropertyRow {
                key: format!("{}: ", p.key),
                value: p.value.to_string(),
                key_origin: Point::new(mirrored.x1, top),
                value_origin: Point::new(mirrored.x1 + keys_width, top),
            }
        })
        .collect();

    Some(SpeechBubble {
        orientation,
        outline_path: speech_bubble_path(path_style, text_size, style.margin, style.padding),
        outline_transform: format!(
            "translate({},{}) scale({},{})",
            fmt_number(anchor.x),
            fmt_number(anchor.y),
            fmt_number(mx),
            fmt_number(my)
        ),
        anchor,
        text_size,
        line_height,
        rows,
        bounding_box: mirrored.expand(style.padding + style.border_width / 2.0),
    })
}
