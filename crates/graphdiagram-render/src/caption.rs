//! Fits a node caption into a near-minimal circle.
//!
//! Words are laid out greedily against the chords of an "ideal" circle whose area equals the
//! caption's single-line area, then the smallest circle enclosing the wrapped lines is
//! measured.

use crate::radius::Radius;
use crate::style::NodeStyle;
use crate::text::{TextMeasurer, TextStyle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionLine {
    pub text: String,
    pub width: f64,
    /// Vertical offset of the line's centre from the node centre.
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionLayout {
    pub radius: Radius,
    pub lines: Vec<CaptionLine>,
    pub line_height: f64,
}

struct IdealCircle {
    radius: f64,
    rows: f64,
    line_height: f64,
}

impl IdealCircle {
    /// Chord available to text row `row`, measured at the row edge nearest the centre.
    fn chord(&self, row: usize) -> f64 {
        let centre_distance = ((row as f64 + 0.5) - self.rows / 2.0).abs() - 0.5;
        let row_offset = self.line_height * centre_distance.max(0.0);
        if row_offset >= self.radius {
            return 0.0;
        }
        (self.radius * self.radius - row_offset * row_offset).sqrt() * 2.0
    }
}

/// Wraps `caption` into lines and sizes the node circle around them.
///
/// Rows are measured at their band edges rather than their centre lines: a line's chord is
/// taken at the edge nearest the node centre, and the enclosing radius reaches the outer corners
/// of each line box. A single line of half-width `w` therefore needs
/// `sqrt(w² + (line_height / 2)²) + padding`, not `w + padding`.
pub fn fit_caption_into_circle(
    caption: Option<&str>,
    style: &NodeStyle,
    measurer: &dyn TextMeasurer,
) -> CaptionLayout {
    let text_style = TextStyle::new(style.font_size, style.font_family.clone());
    let line_height = style.font_size;
    let min_radius = style.min_width / 2.0;
    let radius_with = |inside: f64| {
        Radius::new(inside)
            .with_border(style.border_width)
            .with_arrow_margin(style.arrow_margin)
    };

    let words: Vec<&str> = caption
        .unwrap_or("")
        .split(' ')
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return CaptionLayout {
            radius: radius_with(min_radius),
            lines: Vec::new(),
            line_height,
        };
    }

    let measure = |text: &str| measurer.measure_width(text, &text_style);
    let total_width = measure(&words.join(" "));
    let ideal_radius = (total_width * line_height / std::f64::consts::PI).sqrt();
    let ideal = IdealCircle {
        radius: ideal_radius,
        rows: ideal_radius * 2.0 / line_height,
        line_height,
    };

    let mut lines: Vec<String> = Vec::new();
    let mut words = words.into_iter().peekable();
    while let Some(first) = words.next() {
        let chord = ideal.chord(lines.len());
        // Words are atomic: the first word of a line is kept even if it overflows.
        let mut line = first.to_string();
        while let Some(next) = words.peek() {
            let candidate = format!("{line} {next}");
            if measure(&candidate) > chord {
                break;
            }
            line = candidate;
            words.next();
        }
        lines.push(line);
    }

    let middle = (lines.len() as f64 - 1.0) / 2.0;
    let mut inside = min_radius;
    let mut out = Vec::with_capacity(lines.len());
    for (i, text) in lines.into_iter().enumerate() {
        let width = measure(&text);
        let centre_offset = (i as f64 - middle) * line_height;
        let edge_offset = centre_offset.abs() + line_height / 2.0;
        let half_width = width / 2.0;
        let enclosing = (half_width * half_width + edge_offset * edge_offset).sqrt();
        inside = inside.max(enclosing + style.padding);
        out.push(CaptionLine {
            text,
            width,
            y: centre_offset,
        });
    }

    CaptionLayout {
        radius: radius_with(inside),
        lines: out,
        line_height,
    }
}
