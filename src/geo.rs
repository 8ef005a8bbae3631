//! Conversions from [`geo`](geo_0_31) geometry types into coordinate
//! sequences.

use geo_0_31::{LineString, Polygon};

use crate::topology::{CoordSeq, Position};

/// Convert a line string into an open sequence.
pub fn line_string_coords(line: &LineString<f64>) -> CoordSeq {
    CoordSeq::open(line.coords().map(|c| Position::new(c.x, c.y)).collect())
}

/// Convert a ring into a closed sequence, dropping the duplicated closing
/// coordinate when present.
pub fn ring_coords(ring: &LineString<f64>) -> CoordSeq {
    let mut positions: Vec<Position> = ring.coords().map(|c| Position::new(c.x, c.y)).collect();
    if positions.len() > 1 && positions.first() == positions.last() {
        positions.pop();
    }
    CoordSeq::ring(positions)
}

/// Convert a polygon into closed sequences: the exterior ring first, then
/// the interior rings.
pub fn polygon_rings(polygon: &Polygon<f64>) -> Vec<CoordSeq> {
    let mut rings = vec![ring_coords(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(ring_coords));
    rings
}
