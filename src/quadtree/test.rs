use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bbox::BoundingBox;
use crate::error::TopoIndexError;
use crate::quadtree::QuadTree;

const EXTENT: f64 = 50.0;

fn random_points(n: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (EXTENT * rng.gen::<f64>(), EXTENT * rng.gen::<f64>()))
        .collect()
}

fn filled_tree(points: &[(f64, f64)], max_children: usize) -> QuadTree<f64> {
    let mut tree = QuadTree::new(BoundingBox::new(0.0, 0.0, EXTENT, EXTENT), max_children).unwrap();
    for (label, &(x, y)) in points.iter().enumerate() {
        tree.insert(x, y, label as u32).unwrap();
    }
    tree
}

#[test]
fn rejects_zero_capacity() {
    let result = QuadTree::<f64>::new(BoundingBox::new(0.0, 0.0, 1.0, 1.0), 0);
    assert!(matches!(result, Err(TopoIndexError::InvalidConfig(_))));
}

#[test]
fn rejects_degenerate_region() {
    let flat_x = QuadTree::<f64>::new(BoundingBox::new(1.0, 0.0, 1.0, 2.0), 4);
    assert!(matches!(flat_x, Err(TopoIndexError::InvalidConfig(_))));

    let flat_y = QuadTree::<f64>::new(BoundingBox::new(0.0, 2.0, 1.0, 2.0), 4);
    assert!(matches!(flat_y, Err(TopoIndexError::InvalidConfig(_))));
}

#[test]
fn insert_then_get_returns_the_label() {
    let points = random_points(1000, 49);
    let tree = filled_tree(&points, 5);

    assert_eq!(tree.num_items(), 1000);
    for (label, &(x, y)) in points.iter().enumerate() {
        assert_eq!(tree.get(x, y).unwrap(), label as u32);
    }
}

#[test]
fn depth_starts_at_one_and_grows() {
    let empty = QuadTree::<f64>::new(BoundingBox::new(0.0, 0.0, EXTENT, EXTENT), 5).unwrap();
    assert_eq!(empty.depth(), 1);
    assert_eq!(empty.num_nodes(), 1);

    let tree = filled_tree(&random_points(1000, 49), 5);
    assert!(tree.depth() > 1);
}

#[test]
fn out_of_bounds_insert_is_rejected() {
    let mut tree = QuadTree::new(BoundingBox::new(0.0, 0.0, EXTENT, EXTENT), 4).unwrap();
    let result = tree.insert(60.0, 25.0, 0);
    assert!(matches!(result, Err(TopoIndexError::OutOfBounds { .. })));

    // The upper bound is exclusive.
    let result = tree.insert(EXTENT, 25.0, 0);
    assert!(matches!(result, Err(TopoIndexError::OutOfBounds { .. })));
    assert_eq!(tree.num_items(), 0);
}

#[test]
fn lookup_misses_report_not_found() {
    let mut tree = QuadTree::new(BoundingBox::new(0.0, 0.0, EXTENT, EXTENT), 4).unwrap();
    tree.insert(1.0, 1.0, 0).unwrap();

    assert!(matches!(tree.get(2.0, 2.0), Err(TopoIndexError::NotFound)));
    // Points outside the region miss without descending.
    assert!(matches!(
        tree.get(-1.0, 1.0),
        Err(TopoIndexError::NotFound)
    ));
}

#[test]
fn first_inserted_label_wins_for_identical_points() {
    let mut tree = QuadTree::new(BoundingBox::new(0.0, 0.0, EXTENT, EXTENT), 4).unwrap();
    tree.insert(3.0, 4.0, 11).unwrap();
    tree.insert(3.0, 4.0, 22).unwrap();

    // First match in scan order, not last write.
    assert_eq!(tree.get(3.0, 4.0).unwrap(), 11);
    assert_eq!(tree.num_items(), 2);
}

#[test]
fn split_preserves_all_points() {
    let points = [
        (1.0, 1.0),
        (40.0, 2.0),
        (2.0, 45.0),
        (44.0, 43.0),
        (25.5, 25.5),
    ];
    let mut tree = QuadTree::new(BoundingBox::new(0.0, 0.0, EXTENT, EXTENT), 4).unwrap();
    for (label, &(x, y)) in points.iter().enumerate() {
        tree.insert(x, y, label as u32).unwrap();
    }

    assert!(tree.depth() >= 2);
    for (label, &(x, y)) in points.iter().enumerate() {
        assert_eq!(tree.get(x, y).unwrap(), label as u32);
    }
}

#[test]
fn select_matches_brute_force() {
    let points = random_points(500, 7);
    let tree = filled_tree(&points, 8);
    let query = BoundingBox::new(10.0, 10.0, 30.0, 30.0);

    let mut selected = tree.select(&query);
    selected.sort_unstable();

    let mut expected: Vec<u32> = points
        .iter()
        .enumerate()
        .filter(|(_, &(x, y))| query.contains(x, y))
        .map(|(label, _)| label as u32)
        .collect();
    expected.sort_unstable();

    assert!(!expected.is_empty());
    assert_eq!(selected, expected);

    let mut all = tree.select(&tree.region());
    all.sort_unstable();
    let everything: Vec<u32> = (0..points.len() as u32).collect();
    assert_eq!(all, everything);
}

#[test]
fn select_upper_bound_is_exclusive() {
    let mut tree = QuadTree::new(BoundingBox::new(0.0, 0.0, EXTENT, EXTENT), 4).unwrap();
    tree.insert(2.0, 2.0, 9).unwrap();

    assert!(tree.select(&BoundingBox::new(0.0, 0.0, 2.0, 2.0)).is_empty());
    assert_eq!(tree.select(&BoundingBox::new(1.5, 1.5, 2.5, 2.5)), vec![9]);
}

#[test]
fn half_open_cover_admits_region_maximum() {
    let region = BoundingBox::new(0.0, 0.0, 1.0, 1.0).half_open_cover();
    let mut tree = QuadTree::new(region, 4).unwrap();

    tree.insert(1.0, 1.0, 5).unwrap();
    assert_eq!(tree.get(1.0, 1.0).unwrap(), 5);
}

#[test]
fn coincident_points_beyond_capacity_terminate() {
    let mut tree = QuadTree::new(BoundingBox::new(0.0, 0.0, EXTENT, EXTENT), 2).unwrap();
    for label in 0..10 {
        tree.insert(25.0, 25.0, label).unwrap();
    }

    assert_eq!(tree.num_items(), 10);
    assert_eq!(tree.get(25.0, 25.0).unwrap(), 0);
}

#[test]
fn geo_trait_inputs() {
    use geo_0_31::{coord, Rect};

    let mut tree = QuadTree::new(BoundingBox::new(0.0, 0.0, EXTENT, EXTENT), 4).unwrap();
    tree.insert_coord(&coord! { x: 1.0, y: 2.0 }, 3).unwrap();

    assert_eq!(tree.get_coord(&coord! { x: 1.0, y: 2.0 }).unwrap(), 3);

    let query = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 5.0, y: 5.0 });
    assert_eq!(tree.select_rect(&query), vec![3]);
}
