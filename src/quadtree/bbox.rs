//! Axis-aligned swept boxes and quadtree regions.

use crate::config::Config;
use crate::geometry::Segment;

/// An axis-aligned rectangle, used both as a quadtree node's region and as a segment's
/// swept box over one timestep.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Rect {
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Whether two rectangles share any area or boundary. Boundary-touching counts as
    /// intersecting, so a swept box that merely grazes another is never missed.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.xmin <= other.xmax
            && self.xmax >= other.xmin
            && self.ymin <= other.ymax
            && self.ymax >= other.ymin
    }

    /// Split into four quadrants at the midpoint, in SW, SE, NW, NE order.
    pub fn split_quadrants(&self) -> [Rect; 4] {
        let mx = (self.xmin + self.xmax) / 2.0;
        let my = (self.ymin + self.ymax) / 2.0;
        [
            Rect {
                xmin: self.xmin,
                xmax: mx,
                ymin: self.ymin,
                ymax: my,
            },
            Rect {
                xmin: mx,
                xmax: self.xmax,
                ymin: self.ymin,
                ymax: my,
            },
            Rect {
                xmin: self.xmin,
                xmax: mx,
                ymin: my,
                ymax: self.ymax,
            },
            Rect {
                xmin: mx,
                xmax: self.xmax,
                ymin: my,
                ymax: self.ymax,
            },
        ]
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            xmin: self.xmin.min(other.xmin),
            xmax: self.xmax.max(other.xmax),
            ymin: self.ymin.min(other.ymin),
            ymax: self.ymax.max(other.ymax),
        }
    }

    pub fn expanded(&self, margin: f64) -> Rect {
        Rect {
            xmin: self.xmin - margin,
            xmax: self.xmax + margin,
            ymin: self.ymin - margin,
            ymax: self.ymax + margin,
        }
    }
}

/// Conservative axis-aligned bounding box of a segment's motion over `dt`, expanded per
/// `config.bbox_epsilon` and `config.bbox_vel_factor`.
pub fn swept_box(segment: &Segment, dt: f64, config: &Config) -> Rect {
    let disp = segment.v * dt;
    let p1b = segment.p1 + disp;
    let p2b = segment.p2 + disp;

    let xmin = segment.p1.x.min(segment.p2.x).min(p1b.x).min(p2b.x);
    let xmax = segment.p1.x.max(segment.p2.x).max(p1b.x).max(p2b.x);
    let ymin = segment.p1.y.min(segment.p2.y).min(p1b.y).min(p2b.y);
    let ymax = segment.p1.y.max(segment.p2.y).max(p1b.y).max(p2b.y);

    let margin = config.bbox_epsilon + config.bbox_vel_factor * segment.speed * dt;
    Rect {
        xmin,
        xmax,
        ymin,
        ymax,
    }
    .expanded(margin)
}
