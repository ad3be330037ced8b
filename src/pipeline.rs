//! Per-frame orchestration: Detect, Resolve, Advance, Wall-bounce.
//!
//! Kept as a unit independent of [`crate::world::World`] so the brute-force/quadtree
//! path-equivalence property can be exercised directly against a segment slice, without
//! constructing a full world.

use crate::config::Config;
use crate::event::{sort_canonical, Event};
use crate::geometry::{intersect, Segment};
use crate::quadtree::Quadtree;
use crate::solver;
use crate::world::{DetectionMode, World};

/// Stateless per-frame driver.
pub struct Pipeline;

impl Pipeline {
    /// Run one full frame against `world`: Detect, Resolve, Advance, Wall-bounce.
    pub fn run_frame(world: &mut World) {
        let mut events = Self::detect(&world.segments, world.dt, world.mode, &world.config);
        sort_canonical(&mut events, &world.segments);

        for event in &events {
            solver::apply(&mut world.segments, event);
            world.line_line_collisions += 1;
        }

        advance(&mut world.segments, world.dt);
        wall_bounce(&mut world.segments, &world.arena, &mut world.line_wall_collisions);
    }

    /// Run Detect in isolation: brute-force or quadtree, chosen by `mode`. On a quadtree
    /// allocation failure, falls back to brute-force for this call only and logs a
    /// diagnostic.
    pub fn detect(segments: &[Segment], dt: f64, mode: DetectionMode, config: &Config) -> Vec<Event> {
        match mode {
            DetectionMode::BruteForce => brute_force_detect(segments, dt),
            DetectionMode::Quadtree => match quadtree_detect(segments, dt, config) {
                Ok(events) => events,
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        "quadtree detect failed this frame, falling back to brute force"
                    );
                    brute_force_detect(segments, dt)
                }
            },
        }
    }
}

/// The O(n^2) reference detection path. Infallible by construction.
pub fn brute_force_detect(segments: &[Segment], dt: f64) -> Vec<Event> {
    let mut events = Vec::new();
    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            let (a, b) = canonical_pair(segments, i, j);
            let kind = intersect(&segments[a], &segments[b], dt);
            if kind != crate::geometry::IntersectionKind::None {
                events.push(Event::new(a, b, kind));
            }
        }
    }
    events
}

/// The quadtree-accelerated detection path.
pub fn quadtree_detect(
    segments: &[Segment],
    dt: f64,
    config: &Config,
) -> crate::error::Result<Vec<Event>> {
    let tree = Quadtree::build(segments, dt, config)?;
    let pairs = tree.find_candidate_pairs(config);

    let test_pair = |&(a, b): &(usize, usize)| -> Option<Event> {
        let kind = intersect(&segments[a], &segments[b], dt);
        if kind == crate::geometry::IntersectionKind::None {
            None
        } else {
            Some(Event::new(a, b, kind))
        }
    };

    let events = if config.parallel {
        use rayon::prelude::*;
        pairs.par_iter().filter_map(test_pair).collect()
    } else {
        pairs.iter().filter_map(test_pair).collect()
    };

    Ok(events)
}

fn canonical_pair(segments: &[Segment], i: usize, j: usize) -> (usize, usize) {
    if crate::geometry::compare(&segments[i], &segments[j]) == std::cmp::Ordering::Less {
        (i, j)
    } else {
        (j, i)
    }
}

/// Translate every segment's endpoints by `v * dt` and refresh its length/speed caches.
fn advance(segments: &mut [Segment], dt: f64) {
    for segment in segments.iter_mut() {
        let disp = segment.v * dt;
        segment.p1 = segment.p1 + disp;
        segment.p2 = segment.p2 + disp;
        segment.refresh_caches();
    }
}

/// Reflect the velocity component of any segment whose endpoint has crossed an arena wall
/// moving outward, and count each reflection.
fn wall_bounce(segments: &mut [Segment], arena: &crate::arena::Arena, counter: &mut u64) {
    for segment in segments.iter_mut() {
        let min_x = segment.p1.x.min(segment.p2.x);
        let max_x = segment.p1.x.max(segment.p2.x);
        if min_x < arena.xmin && segment.v.x < 0.0 {
            segment.v.x = -segment.v.x;
            *counter += 1;
        } else if max_x > arena.xmax && segment.v.x > 0.0 {
            segment.v.x = -segment.v.x;
            *counter += 1;
        }

        let min_y = segment.p1.y.min(segment.p2.y);
        let max_y = segment.p1.y.max(segment.p2.y);
        if min_y < arena.ymin && segment.v.y < 0.0 {
            segment.v.y = -segment.v.y;
            *counter += 1;
        } else if max_y > arena.ymax && segment.v.y > 0.0 {
            segment.v.y = -segment.v.y;
            *counter += 1;
        }
    }
}
