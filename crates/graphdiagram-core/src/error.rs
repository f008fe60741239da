use crate::model::NodeId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph model has no node with id {id}")]
    UnknownNode { id: NodeId },
    #[error("graph model already contains a node with id {id}")]
    DuplicateNode { id: NodeId },
    #[error("style attribute `{attribute}` is not a number: {value:?}")]
    InvalidStyleValue { attribute: String, value: String },
    #[error("graph model JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
