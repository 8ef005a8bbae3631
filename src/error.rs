use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum TopoIndexError {
    /// Invalid index construction parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An insertion outside the fixed region of the index.
    #[error("point ({x}, {y}) lies outside the indexed region")]
    OutOfBounds {
        /// x coordinate of the rejected point.
        x: f64,
        /// y coordinate of the rejected point.
        y: f64,
    },

    /// A point lookup miss. This is a normal, expected outcome of
    /// [`QuadTree::get`](crate::quadtree::QuadTree::get), not a crash
    /// condition.
    #[error("no matching point in the index")]
    NotFound,

    /// A malformed coordinate sequence.
    #[error("invalid coordinate sequence: {0}")]
    InvalidInput(String),

    /// A bounding-box union over an empty set.
    #[error("union of an empty set of bounding boxes")]
    EmptyUnion,
}

/// Alias for `Result` with [`TopoIndexError`].
pub type Result<T> = std::result::Result<T, TopoIndexError>;
