#![doc = include_str!("../README.md")]

pub mod bbox;
mod error;
#[cfg(feature = "use-geo_0_31")]
pub mod geo;
pub mod quadtree;
pub mod topology;
mod r#type;

pub use bbox::{BoundingBox, Quadrant};
pub use error::{Result, TopoIndexError};
pub use r#type::CoordNum;
