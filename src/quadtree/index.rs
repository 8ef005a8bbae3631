use std::mem;

use geo_traits::{CoordTrait, RectTrait};
use log::trace;
use num_traits::ToPrimitive;
use tinyvec::TinyVec;

use crate::bbox::{BoundingBox, Quadrant};
use crate::error::{Result, TopoIndexError};
use crate::quadtree::node::{Node, NodeId, ROOT};
use crate::r#type::CoordNum;

/// Maximum leaf depth (root leaf = 1). A full leaf at this depth grows past
/// `max_children` instead of splitting, which bounds the degenerate case of
/// more than `max_children` coincident points.
const MAX_DEPTH: usize = 64;

/// A region quadtree indexing labeled 2-D points over a fixed bounding
/// rectangle.
///
/// The region is set at construction and never grows; inserting a point
/// outside it is an error. Labels are caller-assigned and the index enforces
/// no uniqueness on them.
///
/// ```
/// use topo_index::bbox::BoundingBox;
/// use topo_index::quadtree::QuadTree;
///
/// let mut tree = QuadTree::new(BoundingBox::new(0.0, 0.0, 10.0, 10.0), 4).unwrap();
/// tree.insert(1.0, 2.0, 7).unwrap();
/// assert_eq!(tree.get(1.0, 2.0).unwrap(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct QuadTree<N: CoordNum> {
    /// Node arena; the root lives at slot 0 and children are addressed by
    /// index, so splits are purely local mutations.
    nodes: Vec<Node<N>>,
    region: BoundingBox<N>,
    max_children: usize,
    num_items: usize,
}

impl<N: CoordNum> QuadTree<N> {
    /// Create an empty index over `region` with the given leaf capacity.
    ///
    /// Fails with [`TopoIndexError::InvalidConfig`] when `max_children < 1`
    /// or `region` is degenerate (`min_x >= max_x` or `min_y >= max_y`).
    pub fn new(region: BoundingBox<N>, max_children: usize) -> Result<Self> {
        if max_children < 1 {
            return Err(TopoIndexError::InvalidConfig(
                "leaf capacity must be at least 1".to_string(),
            ));
        }
        if !(region.min_x() < region.max_x()) || !(region.min_y() < region.max_y()) {
            return Err(TopoIndexError::InvalidConfig(format!(
                "degenerate region {:?}",
                region
            )));
        }
        Ok(Self {
            nodes: vec![Node::empty_leaf()],
            region,
            max_children,
            num_items: 0,
        })
    }

    /// The fixed region this index covers.
    pub fn region(&self) -> BoundingBox<N> {
        self.region
    }

    /// The leaf capacity.
    pub fn max_children(&self) -> usize {
        self.max_children
    }

    /// The number of points stored in the index.
    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// The number of nodes in the tree, counting both leaves and internal
    /// nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Insert a labeled point.
    ///
    /// Fails with [`TopoIndexError::OutOfBounds`] when the point fails the
    /// region's half-open containment test. A full leaf is split at its
    /// region midpoint, its points redistributed in insertion order, and the
    /// insertion retried against the now-internal node.
    pub fn insert(&mut self, x: N, y: N, label: u32) -> Result<()> {
        if !self.region.contains(x, y) {
            return Err(TopoIndexError::OutOfBounds {
                x: lossy_f64(x),
                y: lossy_f64(y),
            });
        }

        let mut node_id = ROOT;
        let mut bbox = self.region;
        let mut depth = 1;
        loop {
            let descend = match &mut self.nodes[node_id as usize] {
                Node::Internal { children } => {
                    let quad = bbox.quadrant_of(x, y);
                    Some((children[quad.index()], quad))
                }
                Node::Leaf { coords, labels } => {
                    if labels.len() < self.max_children || depth >= MAX_DEPTH {
                        coords.push(x);
                        coords.push(y);
                        labels.push(label);
                        self.num_items += 1;
                        return Ok(());
                    }
                    None
                }
            };
            match descend {
                Some((child, quad)) => {
                    node_id = child;
                    bbox = bbox.quadrant(quad);
                    depth += 1;
                }
                None => self.split(node_id, &bbox),
            }
        }
    }

    /// Look up the label stored under a point, comparing coordinates for
    /// exact equality.
    ///
    /// When several points with identical coordinates were inserted, the
    /// first match in insertion order wins; last-write semantics are not
    /// guaranteed. Lookup is deliberately exact rather than fuzzy: it
    /// deduplicates literally-identical vertices, while junction edge
    /// comparison separately tolerates floating round-off.
    ///
    /// Fails with [`TopoIndexError::NotFound`] on a miss, including points
    /// outside the region.
    pub fn get(&self, x: N, y: N) -> Result<u32> {
        if !self.region.contains(x, y) {
            return Err(TopoIndexError::NotFound);
        }

        let mut node_id = ROOT;
        let mut bbox = self.region;
        loop {
            match &self.nodes[node_id as usize] {
                Node::Internal { children } => {
                    let quad = bbox.quadrant_of(x, y);
                    node_id = children[quad.index()];
                    bbox = bbox.quadrant(quad);
                }
                Node::Leaf { coords, labels } => {
                    for (i, pair) in coords.chunks_exact(2).enumerate() {
                        if pair[0] == x && pair[1] == y {
                            return Ok(labels[i]);
                        }
                    }
                    return Err(TopoIndexError::NotFound);
                }
            }
        }
    }

    /// The labels of all points inside `query`, using the half-open
    /// containment test.
    ///
    /// Result order is traversal-dependent and unspecified; callers must not
    /// rely on it.
    pub fn select(&self, query: &BoundingBox<N>) -> Vec<u32> {
        let mut results = Vec::new();
        let mut stack: TinyVec<[(NodeId, BoundingBox<N>); 16]> = TinyVec::new();
        stack.push((ROOT, self.region));

        while let Some((node_id, bbox)) = stack.pop() {
            match &self.nodes[node_id as usize] {
                Node::Leaf { coords, labels } => {
                    for (i, pair) in coords.chunks_exact(2).enumerate() {
                        if query.contains(pair[0], pair[1]) {
                            results.push(labels[i]);
                        }
                    }
                }
                Node::Internal { children } => {
                    for quad in Quadrant::ALL {
                        let child_bbox = bbox.quadrant(quad);
                        if query.overlaps(&child_bbox) {
                            stack.push((children[quad.index()], child_bbox));
                        }
                    }
                }
            }
        }
        results
    }

    /// The maximum leaf depth; a tree whose root is still a leaf has
    /// depth 1.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: TinyVec<[(NodeId, usize); 16]> = TinyVec::new();
        stack.push((ROOT, 1));

        while let Some((node_id, depth)) = stack.pop() {
            match &self.nodes[node_id as usize] {
                Node::Leaf { .. } => max_depth = max_depth.max(depth),
                Node::Internal { children } => {
                    for &child in children {
                        stack.push((child, depth + 1));
                    }
                }
            }
        }
        max_depth
    }

    /// Insert a labeled point given as any `geo-traits` coordinate.
    pub fn insert_coord(&mut self, coord: &impl CoordTrait<T = N>, label: u32) -> Result<()> {
        self.insert(coord.x(), coord.y(), label)
    }

    /// Look up the label stored under any `geo-traits` coordinate.
    pub fn get_coord(&self, coord: &impl CoordTrait<T = N>) -> Result<u32> {
        self.get(coord.x(), coord.y())
    }

    /// [`select`](Self::select) over any `geo-traits` rectangle.
    pub fn select_rect(&self, rect: &impl RectTrait<T = N>) -> Vec<u32> {
        self.select(&BoundingBox::from_rect(rect))
    }

    /// Convert a full leaf into an internal node, redistributing its points
    /// into four fresh child leaves in their original insertion order.
    fn split(&mut self, node_id: NodeId, bbox: &BoundingBox<N>) {
        let first_child = self.nodes.len() as NodeId;
        self.nodes.extend((0..4).map(|_| Node::empty_leaf()));
        let children = [
            first_child,
            first_child + 1,
            first_child + 2,
            first_child + 3,
        ];

        let old = mem::replace(
            &mut self.nodes[node_id as usize],
            Node::Internal { children },
        );
        if let Node::Leaf { coords, labels } = old {
            trace!("splitting leaf {} holding {} points", node_id, labels.len());
            for (pair, label) in coords.chunks_exact(2).zip(labels) {
                let quad = bbox.quadrant_of(pair[0], pair[1]);
                if let Node::Leaf { coords, labels } =
                    &mut self.nodes[children[quad.index()] as usize]
                {
                    coords.extend_from_slice(pair);
                    labels.push(label);
                }
            }
        }
    }
}

fn lossy_f64<N: CoordNum>(value: N) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
