#![forbid(unsafe_code)]

//! Headless layout engine for graph diagrams.
//!
//! [`layout_graph`] turns a [`GraphModel`] snapshot into a [`LayoutModel`]: node radii and
//! wrapped captions, relationship arrow outlines, property callouts and a fitted viewport.
//! The engine holds no state between calls.

pub mod arrow;
pub mod caption;
pub mod grouping;
pub mod layout;
pub mod model;
pub mod orientation;
pub mod path;
pub mod radius;
pub mod scaling;
pub mod speech_bubble;
pub mod style;
pub mod text;

use crate::scaling::ViewportPolicy;
use crate::style::DiagramStyle;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use graphdiagram_core::{NodeId, Transform};
use std::sync::Arc;

pub use graphdiagram_core::GraphModel;
pub use layout::layout_graph;
pub use model::LayoutModel;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("relationship between nodes {start} and {end} has no defined direction")]
    AmbiguousGeometry { start: NodeId, end: NodeId },
    #[error("curved arrow cannot be built with offset {offset}")]
    InvalidOffset { offset: f64 },
    #[error("style attribute `{attribute}` is not set")]
    MissingStyle { attribute: String },
    #[error("style attribute `{attribute}` is not a number: {value:?}")]
    InvalidStyle { attribute: String, value: String },
    #[error(transparent)]
    Model(#[from] graphdiagram_core::Error),
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub style: DiagramStyle,
    pub viewport: ViewportPolicy,
    /// Overrides the model's own scales when set.
    pub transform: Option<Transform>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            style: DiagramStyle::default(),
            viewport: ViewportPolicy::default(),
            transform: None,
        }
    }
}

impl LayoutOptions {
    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        self.text_measurer = measurer;
        self
    }

    pub fn with_style(mut self, style: DiagramStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_viewport(mut self, viewport: ViewportPolicy) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }
}
