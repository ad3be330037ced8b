//! Rigid line segment storage and canonical ordering.

use super::vector::Vec2;
use std::cmp::Ordering;

/// An opaque presentational color, carried through unchanged by the core.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A rigid line segment moving at a constant velocity.
///
/// `length` and `speed` are caches refreshed by [`crate::world::World::step`]'s Advance
/// stage; callers should never need to recompute them on a hot path.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub id: u32,
    pub p1: Vec2,
    pub p2: Vec2,
    pub v: Vec2,
    pub color: Color,
    pub length: f64,
    pub speed: f64,
}

impl Segment {
    /// Construct a new segment, computing its initial `length`/`speed` caches.
    pub fn new(id: u32, p1: Vec2, p2: Vec2, v: Vec2, color: Color) -> Self {
        Self {
            id,
            p1,
            p2,
            v,
            color,
            length: (p2 - p1).length(),
            speed: v.length(),
        }
    }

    /// Recompute the `length`/`speed` caches from current geometry. Called once per
    /// segment per frame, after Advance has translated the endpoints.
    pub fn refresh_caches(&mut self) {
        self.length = (self.p2 - self.p1).length();
        self.speed = self.v.length();
    }
}

/// Total order on segments: `p1.x`, then `p1.y`, then `p2.x`, then `p2.y`; ties break by id.
///
/// Candidate pairs and events are always canonicalized with `compare(a, b) < 0` so that
/// the intersection predicate's asymmetric `L1WithL2`/`L2WithL1` output is stable between
/// the brute-force and quadtree detection paths.
pub fn compare(a: &Segment, b: &Segment) -> Ordering {
    a.p1
        .x
        .partial_cmp(&b.p1.x)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.p1.y.partial_cmp(&b.p1.y).unwrap_or(Ordering::Equal))
        .then_with(|| a.p2.x.partial_cmp(&b.p2.x).unwrap_or(Ordering::Equal))
        .then_with(|| a.p2.y.partial_cmp(&b.p2.y).unwrap_or(Ordering::Equal))
        .then_with(|| a.id.cmp(&b.id))
}
