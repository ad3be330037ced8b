//! Tuning configuration for the quadtree index and detection pipeline.

/// Tuning knobs recognized by the quadtree.
///
/// Constructed once per world via [`Config::default`] or [`Config::from_env`]; fields are
/// read many times per frame but never re-derived from the environment after construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Subdivision threshold: a leaf splits once it holds more than this many segments.
    pub max_lines_per_node: usize,
    /// Hard cap on recursion depth, overridable by the `QUADTREE_MAXDEPTH` environment
    /// variable at construction time.
    pub max_depth: u32,
    /// Lower bound on cell width/height; a node never subdivides below this size.
    pub min_cell_size: f64,
    /// Absolute expansion applied to every swept box, to avoid boundary-coincidence
    /// dropouts.
    pub bbox_epsilon: f64,
    /// Velocity-dependent expansion factor `k` applied to each swept box as `k * |v| * dt`,
    /// conservatively covering relative-velocity space being larger than either segment's
    /// absolute motion. Tunable in the documented 0.15-0.3 range.
    pub bbox_vel_factor: f64,
    /// Enables the optional [`crate::quadtree::QuadtreeStats`] structural counters.
    pub enable_debug_stats: bool,
    /// Enables the `rayon`-parallel candidate-enumeration path. Tests that need a
    /// byte-identical trace against a forced-serial run set this to `false`.
    pub parallel: bool,
}

impl Config {
    const DEFAULT_MAX_LINES_PER_NODE: usize = 32;
    const DEFAULT_MAX_DEPTH: u32 = 12;
    const DEFAULT_MIN_CELL_SIZE: f64 = 0.001;
    const DEFAULT_BBOX_EPSILON: f64 = 1e-4;
    const DEFAULT_BBOX_VEL_FACTOR: f64 = 0.2;

    /// Name of the environment variable that overrides `max_depth`, read once by
    /// [`Config::from_env`].
    pub const MAX_DEPTH_ENV_VAR: &'static str = "QUADTREE_MAXDEPTH";

    /// Build a default configuration, then apply the `QUADTREE_MAXDEPTH` environment
    /// override if it is set to a positive integer. Mirrors `Config::default` but is the
    /// entry point a driver binary would actually call.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(Self::MAX_DEPTH_ENV_VAR) {
            match raw.parse::<u32>() {
                Ok(depth) if depth > 0 => config.max_depth = depth,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        "ignoring {} with non-positive-integer value",
                        Self::MAX_DEPTH_ENV_VAR
                    );
                }
            }
        }
        config
    }

    /// Whether the quadtree should populate [`crate::quadtree::QuadtreeStats`] during build.
    pub fn debug_stats(&self) -> bool {
        self.enable_debug_stats
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_lines_per_node: Self::DEFAULT_MAX_LINES_PER_NODE,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            min_cell_size: Self::DEFAULT_MIN_CELL_SIZE,
            bbox_epsilon: Self::DEFAULT_BBOX_EPSILON,
            bbox_vel_factor: Self::DEFAULT_BBOX_VEL_FACTOR,
            enable_debug_stats: false,
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-global; serialize tests that touch them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn default_matches_documented_defaults() {
        let config = Config::default();
        assert_eq!(config.max_lines_per_node, 32);
        assert_eq!(config.max_depth, 12);
        assert_eq!(config.min_cell_size, 0.001);
        assert_eq!(config.bbox_epsilon, 1e-4);
        assert_eq!(config.bbox_vel_factor, 0.2);
        assert!(!config.enable_debug_stats);
        assert!(config.parallel);
    }

    #[test]
    fn from_env_overrides_max_depth_when_set() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var(Config::MAX_DEPTH_ENV_VAR, "7");
        }
        let config = Config::from_env();
        unsafe {
            std::env::remove_var(Config::MAX_DEPTH_ENV_VAR);
        }
        assert_eq!(config.max_depth, 7);
    }

    #[test]
    fn debug_stats_accessor_mirrors_the_field() {
        let mut config = Config::default();
        assert!(!config.debug_stats());
        config.enable_debug_stats = true;
        assert!(config.debug_stats());
    }

    #[test]
    fn from_env_ignores_non_positive_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var(Config::MAX_DEPTH_ENV_VAR, "0");
        }
        let config = Config::from_env();
        unsafe {
            std::env::remove_var(Config::MAX_DEPTH_ENV_VAR);
        }
        assert_eq!(config.max_depth, Config::DEFAULT_MAX_DEPTH);
    }
}
