//! Owned segment store and per-frame orchestration entry point.

use crate::arena::Arena;
use crate::config::Config;
use crate::error::{CoreError, Result};
use crate::geometry::{Color, Segment, Vec2};
use crate::pipeline::Pipeline;

/// Which detection path `World::step` uses. Brute-force is the infallible reference
/// implementation; quadtree is the accelerated path the two must agree with on every
/// input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DetectionMode {
    #[default]
    BruteForce,
    Quadtree,
}

/// The default timestep a `World` uses unless overridden at construction.
pub const DEFAULT_DT: f64 = 0.5;

/// Owns every segment in the simulation plus the counters and configuration a frame
/// needs. The quadtree and event list built during `step` are strictly local to that call
/// and never outlive it.
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) segments: Vec<Segment>,
    pub(crate) arena: Arena,
    pub(crate) dt: f64,
    pub(crate) mode: DetectionMode,
    pub(crate) config: Config,
    pub(crate) line_line_collisions: u64,
    pub(crate) line_wall_collisions: u64,
}

impl World {
    /// Construct an empty world with the default timestep, arena, and configuration.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: Vec::with_capacity(capacity),
            arena: Arena::DEFAULT,
            dt: DEFAULT_DT,
            mode: DetectionMode::BruteForce,
            config: Config::from_env(),
            line_line_collisions: 0,
            line_wall_collisions: 0,
        }
    }

    pub fn with_arena(mut self, arena: Arena) -> Self {
        self.arena = arena;
        self
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        debug_assert!(dt > 0.0, "timestep must be positive");
        self.dt = dt;
        self
    }

    pub fn with_mode(mut self, mode: DetectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Append a new segment with the next dense id. Rejects a segment with either
    /// endpoint outside the arena at construction time.
    pub fn push_segment(&mut self, p1: Vec2, p2: Vec2, v: Vec2, color: Color) -> Result<u32> {
        if !self.arena.contains(p1) || !self.arena.contains(p2) {
            return Err(CoreError::InvalidInput(format!(
                "segment endpoint outside arena: p1={:?} p2={:?}",
                p1, p2
            )));
        }
        let id = self.segments.len() as u32;
        self.segments.push(Segment::new(id, p1, p2, v, color));
        Ok(id)
    }

    /// Bulk-ingest `segments` in order, the entry point a parser collaborator reading a
    /// whole input file up front would use instead of repeated `push_segment` calls. Ids
    /// are re-stamped 0..N in iteration order so the dense-id invariant holds regardless
    /// of what the caller's segments carried; rejects the whole batch on the first
    /// out-of-arena endpoint.
    pub fn from_segments(
        arena: Arena,
        segments: impl IntoIterator<Item = Segment>,
    ) -> Result<Self> {
        let mut world = Self::new().with_arena(arena);
        for segment in segments {
            world.push_segment(segment.p1, segment.p2, segment.v, segment.color)?;
        }
        Ok(world)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> DetectionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DetectionMode) {
        self.mode = mode;
    }

    pub fn line_line_collisions(&self) -> u64 {
        self.line_line_collisions
    }

    pub fn line_wall_collisions(&self) -> u64 {
        self.line_wall_collisions
    }

    /// Run one frame: Detect, Resolve, Advance, Wall-bounce.
    pub fn step(&mut self) {
        Pipeline::run_frame(self);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_segment_assigns_dense_ids_in_insertion_order() {
        let mut world = World::new();
        let id0 = world.push_segment(Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::ZERO, Color::default())
            .unwrap();
        let id1 = world.push_segment(Vec2::new(2.0, 2.0), Vec2::new(3.0, 3.0), Vec2::ZERO, Color::default())
            .unwrap();
        assert_eq!(id0, 0);
        assert_eq!(id1, 1);
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn push_segment_rejects_endpoint_outside_arena() {
        let mut world = World::new();
        let result = world.push_segment(
            Vec2::new(-10.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::ZERO,
            Color::default(),
        );
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn empty_world_step_is_a_no_op() {
        let mut world = World::new();
        world.step();
        assert_eq!(world.line_line_collisions(), 0);
        assert_eq!(world.line_wall_collisions(), 0);
    }

    #[test]
    fn single_segment_world_never_reports_line_line_collisions() {
        let mut world = World::new();
        world
            .push_segment(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0), Vec2::new(1.0, 1.0), Color::default())
            .unwrap();
        for _ in 0..10 {
            world.step();
        }
        assert_eq!(world.line_line_collisions(), 0);
    }

    #[test]
    fn advance_translates_endpoints_by_velocity_times_dt() {
        let mut world = World::new().with_dt(1.0);
        world
            .push_segment(Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0), Vec2::new(2.0, 0.0), Color::default())
            .unwrap();
        world.step();
        assert_eq!(world.segments()[0].p1, Vec2::new(12.0, 10.0));
        assert_eq!(world.segments()[0].p2, Vec2::new(22.0, 10.0));
    }

    #[test]
    fn from_segments_assigns_dense_ids_and_rejects_out_of_arena_batches() {
        let arena = Arena::new(0.0, 100.0, 0.0, 100.0);
        let segments = vec![
            Segment::new(7, Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0), Vec2::ZERO, Color::default()),
            Segment::new(9, Vec2::new(3.0, 3.0), Vec2::new(4.0, 4.0), Vec2::ZERO, Color::default()),
        ];
        let world = World::from_segments(arena, segments).unwrap();
        assert_eq!(world.len(), 2);
        assert_eq!(world.segments()[0].id, 0);
        assert_eq!(world.segments()[1].id, 1);

        let out_of_bounds = vec![Segment::new(
            0,
            Vec2::new(-5.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::ZERO,
            Color::default(),
        )];
        assert!(World::from_segments(arena, out_of_bounds).is_err());
    }
}
