use crate::topology::seq::Position;

/// True when `q` lies strictly left of the directed line from `p0` to `p1`.
///
/// The test is a strict cross-product sign; collinear points are not left.
pub fn is_left(q: Position, p0: Position, p1: Position) -> bool {
    (p1.x - p0.x) * (q.y - p0.y) - (q.x - p0.x) * (p1.y - p0.y) > 0.0
}

/// True when `ring` winds counter-clockwise.
///
/// `ring` must be closed with its first position repeated at the end and
/// hold at least four positions. The winding is read off the turn at the
/// lexicographically minimal vertex (lowest y, tie-broken by lowest x),
/// whose interior angle unambiguously reflects the ring's overall winding.
pub fn is_counter_clockwise(ring: &[Position]) -> bool {
    debug_assert!(
        ring.len() >= 4,
        "ring must be closed with at least 4 positions"
    );
    // Drop the duplicated closing vertex.
    let trimmed = &ring[..ring.len() - 1];
    let n = trimmed.len();

    let mut imin = n - 1;
    let mut min = trimmed[imin];
    for (i, &pos) in trimmed.iter().enumerate().take(n - 1) {
        if pos.y < min.y || (pos.y == min.y && pos.x < min.x) {
            imin = i;
            min = pos;
        }
    }

    let prev = trimmed[(imin + n - 1) % n];
    let next = trimmed[(imin + 1) % n];
    is_left(prev, min, next)
}
