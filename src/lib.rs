//! Linesim Core - Quadtree-Accelerated Continuous Collision Detection
//!
//! This library simulates 2D rigid line segments moving at constant per-step velocities
//! inside an axis-aligned square arena. Its hard engineering is the collision detection
//! core: a dynamic quadtree spatial index that, together with a continuous-time
//! segment/parallelogram intersection test, enumerates every pair of segments that could
//! collide in the upcoming step, guarantees the same set of reported collisions as an
//! O(n^2) pairwise test, and exposes parallelism across the query and test phases.
//!
//! # Architecture
//!
//! - **[`geometry`]**: vector algebra, segment representation, canonical ordering, and the
//!   continuous intersection predicate.
//! - **[`quadtree::Quadtree`]**: the per-frame spatial index over segment swept boxes.
//! - **[`World`]**: the owned segment store, counters, and per-frame entry point (`step`).
//! - **[`Pipeline`]**: per-frame orchestration (Detect, Resolve, Advance, Wall-bounce).
//!
//! Parsing input files, rendering frames, and exposing a command-line binary are left to
//! external collaborators; this crate exposes everything such a driver needs.
//!
//! # Performance characteristics
//!
//! - **Detect (quadtree path)**: O(n log n) expected for uniformly distributed swept boxes,
//!   degrading gracefully to the O(n^2) brute-force path on allocation failure.
//! - **Detect (brute-force path)**: O(n^2), used as both the default and the reference
//!   implementation the quadtree path is checked against.
//! - **Resolve/Advance/Wall-bounce**: O(n + e) where e is the number of events in the frame.

pub mod arena;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod pipeline;
pub mod quadtree;
pub mod solver;
pub mod world;

pub use arena::Arena;
pub use config::Config;
pub use error::{CoreError, Result};
pub use event::Event;
pub use geometry::{compare, Color, IntersectionKind, Segment, Vec2};
pub use pipeline::Pipeline;
pub use quadtree::{Quadtree, QuadtreeStats};
pub use world::{DetectionMode, World, DEFAULT_DT};
