use std::fmt::Debug;

use float_next_after::NextAfter;
use num_traits::Float;

/// A trait for scalar types that can be used as quadtree coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Region
/// splitting partitions a box at its floating midpoint, and the half-open
/// containment convention relies on exact IEEE comparison semantics, so only
/// `f32` and `f64` are supported.
pub trait CoordNum:
    private::Sealed + Float + NextAfter + Default + Debug + Send + Sync + 'static
{
}

impl CoordNum for f32 {}

impl CoordNum for f64 {}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
