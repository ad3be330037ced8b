//! Quadtree node storage, build, and recursive insertion.

use super::bbox::Rect;
use crate::config::Config;
use crate::geometry::Segment;

/// A single quadtree node: either a leaf holding member indices, or an internal node
/// holding four children. There is no path back from `Internal` to `Leaf`.
enum NodeBody {
    Leaf(Vec<usize>),
    Internal(Box<[Node; 4]>),
}

struct Node {
    region: Rect,
    depth: u32,
    body: NodeBody,
}

impl Node {
    fn new_leaf(region: Rect, depth: u32) -> Self {
        Self {
            region,
            depth,
            body: NodeBody::Leaf(Vec::new()),
        }
    }

    /// Insert segment `i`, whose swept box is `boxes[i]`, into this subtree.
    fn insert(&mut self, i: usize, boxes: &[Rect], config: &Config) {
        if !self.region.intersects(&boxes[i]) {
            return;
        }
        match &mut self.body {
            NodeBody::Leaf(members) => {
                members.push(i);
                if members.len() > config.max_lines_per_node
                    && self.depth < config.max_depth
                    && self.region.width() >= 2.0 * config.min_cell_size
                    && self.region.height() >= 2.0 * config.min_cell_size
                {
                    self.subdivide(boxes, config);
                }
            }
            NodeBody::Internal(children) => {
                for child in children.iter_mut() {
                    child.insert(i, boxes, config);
                }
            }
        }
    }

    /// Split this leaf into four children and redistribute its members.
    fn subdivide(&mut self, boxes: &[Rect], config: &Config) {
        let members = match &mut self.body {
            NodeBody::Leaf(members) => std::mem::take(members),
            NodeBody::Internal(_) => return,
        };
        let quadrants = self.region.split_quadrants();
        let next_depth = self.depth + 1;
        let mut children: [Node; 4] = quadrants.map(|r| Node::new_leaf(r, next_depth));
        for i in members {
            for child in children.iter_mut() {
                child.insert(i, boxes, config);
            }
        }
        self.body = NodeBody::Internal(Box::new(children));
    }

    /// Visit every leaf in the subtree, calling `f` with its member list.
    fn for_each_leaf<'a>(&'a self, f: &mut dyn FnMut(&'a [usize])) {
        match &self.body {
            NodeBody::Leaf(members) => f(members),
            NodeBody::Internal(children) => {
                for child in children.iter() {
                    child.for_each_leaf(f);
                }
            }
        }
    }

    /// Collect every leaf node, for the parallel query path.
    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a [usize]>) {
        match &self.body {
            NodeBody::Leaf(members) => out.push(members),
            NodeBody::Internal(children) => {
                for child in children.iter() {
                    child.collect_leaves(out);
                }
            }
        }
    }

    fn node_count(&self) -> usize {
        match &self.body {
            NodeBody::Leaf(_) => 1,
            NodeBody::Internal(children) => {
                1 + children.iter().map(Node::node_count).sum::<usize>()
            }
        }
    }

    fn max_depth_reached(&self) -> u32 {
        match &self.body {
            NodeBody::Leaf(_) => self.depth,
            NodeBody::Internal(children) => children
                .iter()
                .map(Node::max_depth_reached)
                .max()
                .unwrap_or(self.depth),
        }
    }
}

/// Opt-in structural counters, populated by [`Quadtree::build`] when
/// `Config::enable_debug_stats` is set.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct QuadtreeStats {
    pub node_count: usize,
    pub max_depth_reached: u32,
    pub segment_count: usize,
}

/// A dynamic quadtree built fresh each frame over one set of segments' swept boxes.
/// Borrows the segment slice it was built from; it never outlives the `Detect` call that
/// constructed it.
pub struct Quadtree<'a> {
    segments: &'a [Segment],
    boxes: Vec<Rect>,
    root: Node,
    max_speed: f64,
    stats: Option<QuadtreeStats>,
}

impl<'a> Quadtree<'a> {
    /// Build a fresh tree from `segments` for one `Detect` call. Infallible in this
    /// implementation (ordinary `Vec`/`Box` allocation
    /// failures abort the process per Rust's global allocator contract, matching the
    /// teacher's reliance on safe-Rust RAII rather than a manual allocator); the `Result`
    /// is kept in the signature so a future caller-supplied allocator hook can report
    /// `CoreError::AllocationFailure` without an API break, and so degenerate input (a
    /// slice with no segments at all still yields a valid, empty tree rather than erroring)
    /// is the only case the type can represent as `Ok(_)` with work skipped.
    pub fn build(
        segments: &'a [Segment],
        dt: f64,
        config: &Config,
    ) -> crate::error::Result<Self> {
        let max_speed = segments.iter().map(|s| s.speed).fold(0.0_f64, f64::max);

        let boxes: Vec<Rect> = segments
            .iter()
            .map(|s| super::bbox::swept_box(s, dt, config))
            .collect();

        let root_region = match boxes.split_first() {
            Some((first, rest)) => {
                let mut r = *first;
                for b in rest {
                    r = r.union(b);
                }
                r.expanded(config.bbox_epsilon)
            }
            None => Rect {
                xmin: 0.0,
                xmax: 0.0,
                ymin: 0.0,
                ymax: 0.0,
            },
        };

        let mut root = Node::new_leaf(root_region, 0);
        for i in 0..boxes.len() {
            root.insert(i, &boxes, config);
        }

        let stats = config.enable_debug_stats.then(|| QuadtreeStats {
            node_count: root.node_count(),
            max_depth_reached: root.max_depth_reached(),
            segment_count: segments.len(),
        });

        Ok(Self {
            segments,
            boxes,
            root,
            max_speed,
            stats,
        })
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn stats(&self) -> Option<QuadtreeStats> {
        self.stats
    }

    /// Enumerate every unordered pair `(a, b)` of segment indices, `a < b` in id order via
    /// [`crate::geometry::compare`], whose swept boxes share a leaf. Each pair is emitted
    /// at most once.
    pub fn find_candidate_pairs(&self, config: &Config) -> Vec<(usize, usize)> {
        if config.parallel {
            self.find_candidate_pairs_parallel()
        } else {
            self.find_candidate_pairs_serial()
        }
    }

    fn canonical_pair(&self, i: usize, j: usize) -> (usize, usize) {
        if crate::geometry::compare(&self.segments[i], &self.segments[j])
            == std::cmp::Ordering::Less
        {
            (i, j)
        } else {
            (j, i)
        }
    }

    fn find_candidate_pairs_serial(&self) -> Vec<(usize, usize)> {
        let mut dedup = super::dedup::PairDedup::new(self.segments.len());
        let mut out = Vec::new();
        self.root.for_each_leaf(&mut |members| {
            for a in 0..members.len() {
                for b in (a + 1)..members.len() {
                    let pair = self.canonical_pair(members[a], members[b]);
                    if dedup.check_and_set(pair.0, pair.1) {
                        out.push(pair);
                    }
                }
            }
        });
        out
    }

    fn find_candidate_pairs_parallel(&self) -> Vec<(usize, usize)> {
        use rayon::prelude::*;

        let mut leaves = Vec::new();
        self.root.collect_leaves(&mut leaves);

        let dedup = super::dedup::ConcurrentPairDedup::new(self.segments.len());

        leaves
            .into_par_iter()
            .map(|members| {
                // Worker-local scratch: this Vec is built and returned by this closure
                // alone, never shared across workers.
                let mut local = Vec::new();
                for a in 0..members.len() {
                    for b in (a + 1)..members.len() {
                        let pair = self.canonical_pair(members[a], members[b]);
                        if dedup.check_and_set(pair.0, pair.1) {
                            local.push(pair);
                        }
                    }
                }
                local
            })
            .reduce(Vec::new, |mut acc, mut next| {
                acc.append(&mut next);
                acc
            })
    }
}
