//! Junction detection over coordinate sequences, and ring-orientation
//! helpers.

#![warn(missing_docs)]

mod junction;
mod seq;
mod winding;

pub use junction::find_junctions;
pub use seq::{CoordSeq, Position};
pub use winding::{is_counter_clockwise, is_left};
