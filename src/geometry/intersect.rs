//! Continuous segment/parallelogram intersection predicate.

use super::segment::{compare, Segment};
use super::vector::Vec2;

const EPS: f64 = 1e-9;

/// Classification of a continuous-time intersection test between two segments over one
/// timestep. Returned by value — no dynamic dispatch is needed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntersectionKind {
    /// No collision will occur during this step.
    None,
    /// `l1` runs into `l2` (crosses the corridor swept by one of `l2`'s endpoints).
    L1WithL2,
    /// `l2` runs into `l1` (by the end of the step, `l2`'s position overlaps `l1`).
    L2WithL1,
    /// `l1` and `l2` already overlap at the start of the step; resolved by the "unstick"
    /// heuristic rather than the elastic-collision solver.
    AlreadyIntersected,
}

fn sign(v: f64) -> i32 {
    if v > EPS {
        1
    } else if v < -EPS {
        -1
    } else {
        0
    }
}

fn orient(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    (b - a).cross(c - a)
}

/// True if point `p`, known to be collinear with segment `(a, b)`, lies within its bounding
/// box (closed interval, consistent with the "closed on the lower side" tie-break policy).
fn on_segment(a: Vec2, b: Vec2, p: Vec2) -> bool {
    p.x >= a.x.min(b.x) - EPS
        && p.x <= a.x.max(b.x) + EPS
        && p.y >= a.y.min(b.y) - EPS
        && p.y <= a.y.max(b.y) + EPS
}

/// Standard orientation-test segment-segment intersection, including the colinear-overlap
/// special cases. Returns true for any shared point, including touching endpoints.
fn segments_overlap(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let o1 = sign(orient(p1, p2, p3));
    let o2 = sign(orient(p1, p2, p4));
    let o3 = sign(orient(p3, p4, p1));
    let o4 = sign(orient(p3, p4, p2));

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == 0 && on_segment(p1, p2, p3))
        || (o2 == 0 && on_segment(p1, p2, p4))
        || (o3 == 0 && on_segment(p3, p4, p1))
        || (o4 == 0 && on_segment(p3, p4, p2))
}

/// Intersection point of the two *infinite lines* through `(p1, p2)` and `(p3, p4)`, solved
/// via Cramer's rule. `None` for parallel (including colinear) lines.
pub fn line_intersection_point(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let denom = d1.cross(d2);
    if denom.abs() < EPS {
        return None;
    }
    let t = (p3 - p1).cross(d2) / denom;
    Some(p1 + d1 * t)
}

/// Continuous intersection predicate. Precondition: `compare(l1, l2)` is `Less` — callers
/// must canonicalize pair order first so `L1WithL2`/`L2WithL1` are stable.
///
/// `l1` is treated as stationary; `l2`'s motion relative to `l1` sweeps a parallelogram with
/// vertices `l2.p1`, `l2.p2`, `l2.p2 + v_rel*dt`, `l2.p1 + v_rel*dt`. A pre-existing overlap
/// is reported as [`IntersectionKind::AlreadyIntersected`] (this subsumes testing `l1` against
/// the parallelogram's near edge, which is exactly segment `l2` itself). Of the remaining
/// three edges: `l1` crossing the far edge (`l2`'s end-of-step position) means `l2` arrives
/// into `l1` by the end of the step (`L2WithL1`); `l1` crossing either side edge (the path
/// traced by one of `l2`'s endpoints) means `l1` itself sweeps across `l2`'s corridor
/// (`L1WithL2`).
pub fn intersect(l1: &Segment, l2: &Segment, dt: f64) -> IntersectionKind {
    debug_assert_eq!(
        compare(l1, l2),
        std::cmp::Ordering::Less,
        "intersect() precondition violated: compare(l1, l2) must be Less"
    );

    if segments_overlap(l1.p1, l1.p2, l2.p1, l2.p2) {
        return IntersectionKind::AlreadyIntersected;
    }

    let v_rel = l2.v - l1.v;
    let disp = v_rel * dt;
    let l2_p1_future = l2.p1 + disp;
    let l2_p2_future = l2.p2 + disp;

    if segments_overlap(l1.p1, l1.p2, l2_p1_future, l2_p2_future) {
        return IntersectionKind::L2WithL1;
    }

    if segments_overlap(l1.p1, l1.p2, l2.p1, l2_p1_future)
        || segments_overlap(l1.p1, l1.p2, l2.p2, l2_p2_future)
    {
        return IntersectionKind::L1WithL2;
    }

    IntersectionKind::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::segment::Color;

    fn seg(id: u32, p1: (f64, f64), p2: (f64, f64), v: (f64, f64)) -> Segment {
        Segment::new(
            id,
            Vec2::new(p1.0, p1.1),
            Vec2::new(p2.0, p2.1),
            Vec2::new(v.0, v.1),
            Color::default(),
        )
    }

    #[test]
    fn stationary_non_crossing_segments_report_none() {
        let l1 = seg(0, (0.0, 0.0), (1.0, 0.0), (0.0, 0.0));
        let l2 = seg(1, (0.0, 5.0), (1.0, 5.0), (0.0, 0.0));
        assert_eq!(intersect(&l1, &l2, 1.0), IntersectionKind::None);
    }

    #[test]
    fn already_overlapping_segments_report_already_intersected() {
        let l1 = seg(0, (0.0, 0.0), (2.0, 2.0), (0.0, 0.0));
        let l2 = seg(1, (0.0, 2.0), (2.0, 0.0), (0.0, 0.0));
        assert_eq!(
            intersect(&l1, &l2, 1.0),
            IntersectionKind::AlreadyIntersected
        );
    }

    #[test]
    fn l2_arriving_into_l1_by_end_of_step_is_l2_with_l1() {
        // l1 is a short horizontal bar sitting still; l2 approaches from below and arrives
        // exactly at l1's height by the end of the step, not overlapping beforehand.
        let l1 = seg(0, (-1.0, 5.0), (1.0, 5.0), (0.0, 0.0));
        let l2 = seg(1, (-1.0, 0.0), (1.0, 0.0), (0.0, 5.0));
        assert_eq!(intersect(&l1, &l2, 1.0), IntersectionKind::L2WithL1);
    }

    #[test]
    fn l1_sweeping_into_l2_corridor_is_l1_with_l2() {
        // l2 sits still; l1 moves sideways such that its own body sweeps across the path
        // traced by one of l2's endpoints.
        let l1 = seg(0, (-5.0, -1.0), (-5.0, 1.0), (10.0, 0.0));
        let l2 = seg(1, (0.0, -1.0), (0.0, 1.0), (0.0, 0.0));
        assert_eq!(intersect(&l1, &l2, 1.0), IntersectionKind::L1WithL2);
    }

    #[test]
    fn parallel_non_overlapping_motion_reports_none() {
        let l1 = seg(0, (0.0, 0.0), (1.0, 0.0), (1.0, 0.0));
        let l2 = seg(1, (0.0, 10.0), (1.0, 10.0), (1.0, 0.0));
        assert_eq!(intersect(&l1, &l2, 1.0), IntersectionKind::None);
    }

    #[test]
    fn line_intersection_point_solves_two_by_two_system() {
        let p = line_intersection_point(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(2.0, 0.0),
        )
        .unwrap();
        assert!((p.x - 1.0).abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn line_intersection_point_is_none_for_parallel_lines() {
        let p = line_intersection_point(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        );
        assert!(p.is_none());
    }
}
