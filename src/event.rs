//! Intersection events and their canonical ordering.

use crate::geometry::IntersectionKind;

/// A detected intersection between segments at indices `a` and `b` into the slice the
/// detect phase ran over. `a`/`b` satisfy `compare(segments[a], segments[b]) < 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Event {
    pub a: usize,
    pub b: usize,
    pub kind: IntersectionKind,
}

impl Event {
    pub fn new(a: usize, b: usize, kind: IntersectionKind) -> Self {
        Self { a, b, kind }
    }
}

/// Sort events by `(segment id at a, segment id at b)` lexicographically, the uniqueness
/// key that makes a parallel detect run byte-for-byte identical to a serial one despite
/// non-deterministic discovery order.
pub fn sort_canonical(events: &mut [Event], segments: &[crate::geometry::Segment]) {
    events.sort_unstable_by_key(|e| (segments[e.a].id, segments[e.b].id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Color, Segment, Vec2};

    fn seg(id: u32) -> Segment {
        Segment::new(id, Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::ZERO, Color::default())
    }

    #[test]
    fn sort_canonical_orders_by_segment_id_pair() {
        let segments = vec![seg(5), seg(1), seg(3)];
        let mut events = vec![
            Event::new(0, 1, IntersectionKind::None),
            Event::new(1, 2, IntersectionKind::None),
            Event::new(0, 2, IntersectionKind::None),
        ];
        sort_canonical(&mut events, &segments);
        let ids: Vec<(u32, u32)> = events
            .iter()
            .map(|e| (segments[e.a].id, segments[e.b].id))
            .collect();
        assert_eq!(ids, vec![(1, 3), (1, 5), (3, 5)]);
    }

    #[test]
    fn sort_canonical_is_idempotent() {
        let segments = vec![seg(2), seg(0), seg(1)];
        let mut events = vec![
            Event::new(0, 2, IntersectionKind::None),
            Event::new(1, 2, IntersectionKind::None),
            Event::new(0, 1, IntersectionKind::None),
        ];
        sort_canonical(&mut events, &segments);
        let once = events.clone();
        sort_canonical(&mut events, &segments);
        assert_eq!(events, once);
    }
}
