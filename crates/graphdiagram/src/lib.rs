#![forbid(unsafe_code)]

//! `graphdiagram` draws labelled directed graphs as precise vector diagrams.
//!
//! Node positions are supplied by the caller; the engine sizes nodes around their captions,
//! outlines straight and curved arrows between them, places property callouts and fits a
//! viewport around the result.
//!
//! # Features
//!
//! - `render` (default): enable the layout engine (`graphdiagram::render`)

pub use graphdiagram_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use graphdiagram_render::model::{
        LayoutModel, NodeLayout, RelationshipLayout, SkippedEntity,
    };
    pub use graphdiagram_render::scaling::{BoundingBox, Size, ViewBox, Viewport, ViewportPolicy};
    pub use graphdiagram_render::style::DiagramStyle;
    pub use graphdiagram_render::text::{
        CachingTextMeasurer, DeterministicTextMeasurer, TextMeasurer, TextStyle,
    };
    pub use graphdiagram_render::{LayoutOptions, layout_graph};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Model(#[from] graphdiagram_core::Error),
        #[error(transparent)]
        Layout(#[from] graphdiagram_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Lays out a JSON graph snapshot and returns the layout as JSON.
    pub fn layout_json(graph_json: &str, options: &LayoutOptions) -> Result<String> {
        let graph = crate::GraphModel::from_json(graph_json)?;
        Ok(layout_graph(&graph, options)?.to_json()?)
    }

    /// Bundles layout options for repeated headless layout calls.
    #[derive(Clone, Default)]
    pub struct HeadlessLayout {
        pub options: LayoutOptions,
    }

    impl HeadlessLayout {
        pub fn new() -> Self {
            Self::default()
        }

        /// Applies diagram style defaults given as JSON (see [`DiagramStyle::from_json`]).
        pub fn with_style_json(mut self, style_json: &str) -> Result<Self> {
            self.options.style = DiagramStyle::from_json(style_json)?;
            Ok(self)
        }

        pub fn with_viewport(mut self, viewport: ViewportPolicy) -> Self {
            self.options.viewport = viewport;
            self
        }

        pub fn layout(&self, graph: &crate::GraphModel) -> Result<LayoutModel> {
            Ok(layout_graph(graph, &self.options)?)
        }

        pub fn layout_json(&self, graph_json: &str) -> Result<String> {
            layout_json(graph_json, &self.options)
        }
    }
}
