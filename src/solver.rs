//! Collision response: elastic velocity update and the "unstick" recovery case
//! for segments that are found already overlapping.

use crate::event::Event;
use crate::geometry::{line_intersection_point, IntersectionKind, Segment, Vec2};

/// Apply the collision response for `event` to `segments`, mutating velocities in place.
/// The solver never fails: the calling predicate's classification guarantees `face`/
/// `normal` are well-defined before an event reaches here.
pub fn apply(segments: &mut [Segment], event: &Event) {
    match event.kind {
        IntersectionKind::None => {
            debug_assert!(false, "solver received a None-kind event");
        }
        IntersectionKind::L1WithL2 | IntersectionKind::L2WithL1 => {
            apply_elastic(segments, event);
        }
        IntersectionKind::AlreadyIntersected => {
            apply_unstick(segments, event);
        }
    }
}

fn apply_elastic(segments: &mut [Segment], event: &Event) {
    let struck = if event.kind == IntersectionKind::L1WithL2 {
        event.b
    } else {
        event.a
    };
    let struck_seg = &segments[struck];
    let face = (struck_seg.p2 - struck_seg.p1).normalize_or_zero();
    debug_assert!(
        face != Vec2::ZERO,
        "solver received a collision against a degenerate (zero-length) segment"
    );
    let normal = face.orthogonal();

    let v1 = segments[event.a].v;
    let v2 = segments[event.b].v;
    let v1n = v1.dot(normal);
    let v1f = v1.dot(face);
    let v2n = v2.dot(normal);
    let v2f = v2.dot(face);

    let m1 = segments[event.a].length;
    let m2 = segments[event.b].length;
    let msum = m1 + m2;
    debug_assert!(msum > 0.0, "solver received two zero-length segments");

    let v1n_new = ((m1 - m2) / msum) * v1n + (2.0 * m2 / msum) * v2n;
    let v2n_new = (2.0 * m1 / msum) * v1n + ((m2 - m1) / msum) * v2n;

    segments[event.a].v = normal * v1n_new + face * v1f;
    segments[event.b].v = normal * v2n_new + face * v2f;
}

fn apply_unstick(segments: &mut [Segment], event: &Event) {
    let (l1, l2) = (segments[event.a], segments[event.b]);

    let p = line_intersection_point(l1.p1, l1.p2, l2.p1, l2.p2).unwrap_or_else(|| {
        // Colinear overlap: the two lines coincide rather than crossing at a single
        // point. Any point in the shared interval separates them correctly once
        // velocities are redirected, so the midpoint of the two segment midpoints is a
        // reasonable representative.
        ((l1.p1 + l1.p2) * 0.5 + (l2.p1 + l2.p2) * 0.5) * 0.5
    });

    segments[event.a].v = unstick_velocity(&l1, p);
    segments[event.b].v = unstick_velocity(&l2, p);
}

/// Redirect `segment`'s velocity to point from `p` toward whichever endpoint is farther
/// from `p`, preserving the segment's current speed.
fn unstick_velocity(segment: &Segment, p: Vec2) -> Vec2 {
    let far = if (segment.p1 - p).length_squared() >= (segment.p2 - p).length_squared() {
        segment.p1
    } else {
        segment.p2
    };
    let direction = (far - p).normalize_or_zero();
    direction * segment.speed
}
