use std::collections::HashSet;

use log::debug;

use crate::bbox::BoundingBox;
use crate::error::{Result, TopoIndexError};
use crate::quadtree::QuadTree;
use crate::topology::seq::{CoordSeq, Position};

/// Leaf capacity of the scratch index used to deduplicate visited
/// positions. Tuning only, not part of the observable contract.
const LEAF_CAPACITY: usize = 20;

/// Per-coordinate tolerance when matching incident-edge geometry.
const EDGE_TOLERANCE: f64 = 1e-12;

/// The first-seen location of a distinct position, plus every incident-edge
/// pair observed at it so far.
struct VisitRecord {
    seq: usize,
    vertex: usize,
    edges: Vec<(Position, Position)>,
}

/// Find the junction vertices of a set of coordinate sequences.
///
/// Treating the sequences as a network whose nodes are positions and whose
/// edges are pairs of adjacent positions, a junction is a vertex where three
/// or more distinct edges meet, or one revisited with a different pair of
/// incident edges than previously seen. Terminal vertices of open sequences
/// are always junctions, independent of sharing.
///
/// Returns one set of junction vertex indices per input sequence, aligned by
/// index. An empty input yields an empty vector.
///
/// Positions are matched across sequences by **exact** coordinate equality,
/// while incident-edge geometry is compared within 1e-12 per coordinate.
/// The asymmetry is deliberate: exact lookup deduplicates
/// literally-identical vertices, the tolerance absorbs floating round-off
/// from upstream transforms.
///
/// Fails with [`TopoIndexError::InvalidInput`] when a sequence has fewer
/// than two positions. No partial results are returned on failure.
///
/// ```
/// use topo_index::topology::{find_junctions, CoordSeq};
///
/// // Two open lines crossing at the shared vertex (2, 4).
/// let line1 = CoordSeq::open(vec![(1.0, 1.0).into(), (2.0, 4.0).into(), (3.0, 9.0).into()]);
/// let line2 = CoordSeq::open(vec![
///     (1.0, 7.0).into(),
///     (2.0, 4.0).into(),
///     (3.0, -1.0).into(),
///     (4.0, -2.0).into(),
/// ]);
///
/// let junctions = find_junctions(&[line1, line2]).unwrap();
/// assert!(junctions[0].contains(&1));
/// assert!(junctions[1].contains(&1));
/// ```
pub fn find_junctions(sequences: &[CoordSeq]) -> Result<Vec<HashSet<usize>>> {
    if sequences.is_empty() {
        return Ok(Vec::new());
    }

    let mut boxes = Vec::with_capacity(sequences.len());
    for (i, seq) in sequences.iter().enumerate() {
        if seq.len() < 2 {
            return Err(TopoIndexError::InvalidInput(format!(
                "sequence {} has {} positions; junction detection needs at least 2",
                i,
                seq.len()
            )));
        }
        if let Some(bbox) = seq.bbox() {
            boxes.push(bbox);
        }
    }

    // Widen the union so positions attaining its maxima pass the half-open
    // insert test; this also de-degenerates axis-aligned inputs.
    let region = BoundingBox::union(boxes)?.half_open_cover();
    let mut index = QuadTree::new(region, LEAF_CAPACITY)?;

    let mut junctions: Vec<HashSet<usize>> = vec![HashSet::new(); sequences.len()];
    let mut records: Vec<VisitRecord> = Vec::new();

    for (igeom, seq) in sequences.iter().enumerate() {
        let last = seq.len() - 1;
        for vertex in 0..seq.len() {
            let pos = seq.at(vertex);
            let (prev, next) = seq.adjacent(vertex);

            // Terminal vertices of open paths are always breakpoints.
            if !seq.is_closed() && (vertex == 0 || vertex == last) {
                junctions[igeom].insert(vertex);
            }

            match index.get(pos.x, pos.y) {
                Ok(label) => {
                    let record = &mut records[label as usize];
                    let pair = (prev, next);
                    // More than one recorded pair means the position already
                    // has three or more distinct incident edges.
                    if record.edges.len() > 1 || edges_differ(record.edges[0], pair) {
                        junctions[igeom].insert(vertex);
                        junctions[record.seq].insert(record.vertex);
                        record.edges.push(pair);
                    }
                }
                Err(TopoIndexError::NotFound) => {
                    let label = records.len() as u32;
                    // The region covers every sequence; an out-of-bounds
                    // failure here is an internal invariant break and must
                    // surface.
                    index.insert(pos.x, pos.y, label)?;
                    records.push(VisitRecord {
                        seq: igeom,
                        vertex,
                        edges: vec![(prev, next)],
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }

    debug!(
        "junction detection: {} sequences, {} distinct positions, {} junction vertices",
        sequences.len(),
        records.len(),
        junctions.iter().map(HashSet::len).sum::<usize>()
    );

    Ok(junctions)
}

/// Order the two endpoints of an edge pair lexicographically on (x, y).
fn canonical(pair: (Position, Position)) -> (Position, Position) {
    let (a, b) = pair;
    if a.x > b.x || (a.x == b.x && a.y > b.y) {
        (b, a)
    } else {
        (a, b)
    }
}

/// True when two incident-edge pairs describe different geometry, compared
/// order-independently and within [`EDGE_TOLERANCE`] per coordinate.
fn edges_differ(recorded: (Position, Position), observed: (Position, Position)) -> bool {
    let (r0, r1) = canonical(recorded);
    let (o0, o1) = canonical(observed);
    !(r0.almost_eq(o0, EDGE_TOLERANCE) && r1.almost_eq(o1, EDGE_TOLERANCE))
}
