//! Vector algebra, segment representation, and the continuous intersection predicate.

pub mod intersect;
pub mod segment;
pub mod vector;

pub use intersect::{intersect, line_intersection_point, IntersectionKind};
pub use segment::{compare, Color, Segment};
pub use vector::Vec2;
