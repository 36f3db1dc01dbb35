//! Node grid generation
//!
//! Builds the point grids every block hangs off: the main-street node walk
//! and rectangular grids grown outward from a boundary edge. Grids are
//! row-major, row 0 is always the seed edge, and all rows share the seed
//! edge's length. Rows are appended during construction and never mutated
//! afterwards.

use geo::Point;
use rand::Rng;

use crate::config::CityConfig;

/// Row-major grid of nodes; `grid[0]` is the seed boundary edge.
pub type NodeGrid = Vec<Vec<Point<f64>>>;

/// Lower bound on the spacing between adjacent nodes in a row
pub const MIN_SPACING: f64 = 200.0;
/// Upper bound on the spacing between adjacent nodes in a row
pub const MAX_SPACING: f64 = 300.0;

/// Mean step between consecutive main-street nodes
pub const STREET_STEP_BASE: f64 = 300.0;
/// Uniform half-spread around [`STREET_STEP_BASE`]
pub const STREET_STEP_SPREAD: f64 = 107.0;

/// Generates node grids anchored to boundary edges.
pub struct NodeGenerator {
    offset: f64,
}

impl NodeGenerator {
    pub fn new(config: &CityConfig) -> Self {
        Self {
            offset: config.offset,
        }
    }

    /// Jitter drawn for one coordinate axis.
    fn jitter(&self, rng: &mut impl Rng) -> f64 {
        rng.gen_range(-self.offset..=self.offset)
    }

    /// Generate `grid` main-street nodes walking left to right from the origin.
    ///
    /// Cumulative X steps of `STREET_STEP_BASE ± STREET_STEP_SPREAD`, then
    /// each node is jittered by `±offset` on both axes. The walk stays
    /// monotonic in X as long as the spread is below the base step.
    pub fn main_street(&self, grid: usize, rng: &mut impl Rng) -> Vec<Point<f64>> {
        self.main_street_from(grid, Point::new(0.0, 0.0), rng)
    }

    /// Same walk as [`main_street`](Self::main_street), started at `origin`.
    pub fn main_street_from(
        &self,
        grid: usize,
        origin: Point<f64>,
        rng: &mut impl Rng,
    ) -> Vec<Point<f64>> {
        if grid == 0 {
            return Vec::new();
        }

        let mut xs = Vec::with_capacity(grid);
        xs.push(origin.x());
        for i in 1..grid {
            let step =
                STREET_STEP_BASE + rng.gen_range(-STREET_STEP_SPREAD..=STREET_STEP_SPREAD);
            xs.push(xs[i - 1] + step);
        }

        let mut nodes = Vec::with_capacity(grid);
        for &x in &xs {
            let nx = x + self.jitter(rng);
            let ny = origin.y() + self.jitter(rng);
            nodes.push(Point::new(nx, ny));
        }
        nodes
    }

    /// Grow `rows` new rows below `top_side`.
    ///
    /// Each node steps down from the node above it by `uniform[min_d, max_d]`
    /// plus jitter on both axes; the row is then clamped left to right so the
    /// X gap to the row predecessor stays within `[min_d, max_d]`.
    pub fn grid_down(
        &self,
        top_side: &[Point<f64>],
        rows: usize,
        min_d: f64,
        max_d: f64,
        rng: &mut impl Rng,
    ) -> NodeGrid {
        self.grid_stepped(top_side, rows, min_d, max_d, -1.0, rng)
    }

    /// Grow `rows` new rows above `bottom_side`. Mirror of
    /// [`grid_down`](Self::grid_down) with the vertical step sign flipped.
    pub fn grid_up(
        &self,
        bottom_side: &[Point<f64>],
        rows: usize,
        min_d: f64,
        max_d: f64,
        rng: &mut impl Rng,
    ) -> NodeGrid {
        self.grid_stepped(bottom_side, rows, min_d, max_d, 1.0, rng)
    }

    fn grid_stepped(
        &self,
        side: &[Point<f64>],
        rows: usize,
        min_d: f64,
        max_d: f64,
        dir: f64,
        rng: &mut impl Rng,
    ) -> NodeGrid {
        let grid = side.len();
        let mut nodes: NodeGrid = vec![side.to_vec()];

        for i in 1..=rows {
            let mut new_row: Vec<Point<f64>> = Vec::with_capacity(grid);
            for j in 0..grid {
                let p = nodes[i - 1][j];
                let dy = rng.gen_range(min_d..=max_d);
                let mut x = p.x() + self.jitter(rng);
                let y = p.y() + dir * dy + self.jitter(rng);

                // spacing clamp: the gap to the row predecessor decides the
                // final X, whatever the jitter produced
                if j > 0 {
                    let prev_x = new_row[j - 1].x();
                    let dx = x - prev_x;
                    if dx < min_d {
                        x = prev_x + min_d;
                    }
                    if dx > max_d {
                        x = prev_x + max_d;
                    }
                }
                new_row.push(Point::new(x, y));
            }
            nodes.push(new_row);
        }
        nodes
    }

    /// Grow `rows` new rows where the first column of each row is pinned to
    /// `adjacent` and the rest of the row steps rightward.
    ///
    /// `adjacent[i]` seeds row `i` directly; subsequent nodes in the row step
    /// `uniform[min_d, max_d]` in X from their row predecessor with Y jitter.
    /// The clamp runs on the vertical axis here: the Y gap to the previous
    /// row's same column is clamped into `[min_d, max_d]`, signed by the
    /// direction the adjacent edge grows in.
    pub fn grid_from_corner(
        &self,
        primary: &[Point<f64>],
        adjacent: &[Point<f64>],
        rows: usize,
        min_d: f64,
        max_d: f64,
        rng: &mut impl Rng,
    ) -> NodeGrid {
        let grid = primary.len();
        let mut nodes: NodeGrid = vec![primary.to_vec()];

        for i in 1..=rows {
            let anchor = adjacent[i];
            let dir = if anchor.y() >= nodes[i - 1][0].y() {
                1.0
            } else {
                -1.0
            };

            let mut new_row: Vec<Point<f64>> = Vec::with_capacity(grid);
            new_row.push(anchor);
            for j in 1..grid {
                let prev = new_row[j - 1];
                let x = prev.x() + rng.gen_range(min_d..=max_d);
                let mut y = prev.y() + self.jitter(rng);

                let above = nodes[i - 1][j];
                let gap = (y - above.y()) * dir;
                if gap < min_d {
                    y = above.y() + dir * min_d;
                } else if gap > max_d {
                    y = above.y() + dir * max_d;
                }
                new_row.push(Point::new(x, y));
            }
            nodes.push(new_row);
        }
        nodes
    }

    /// Grid spanning two existing edges.
    ///
    /// The first row is `top_side`, the last row is `bottom_side`, and the
    /// `rows - 1` interior rows are per-column linear interpolations between
    /// them. Draws nothing from the RNG. Both edges must have equal length.
    pub fn grid_between(
        &self,
        top_side: &[Point<f64>],
        bottom_side: &[Point<f64>],
        rows: usize,
    ) -> NodeGrid {
        assert_eq!(
            top_side.len(),
            bottom_side.len(),
            "edges bounding a grid must have equal length"
        );
        if rows == 0 {
            return vec![top_side.to_vec()];
        }

        let mut nodes: NodeGrid = Vec::with_capacity(rows + 1);
        for i in 0..=rows {
            let t = i as f64 / rows as f64;
            let row = top_side
                .iter()
                .zip(bottom_side.iter())
                .map(|(a, b)| {
                    Point::new(
                        a.x() + (b.x() - a.x()) * t,
                        a.y() + (b.y() - a.y()) * t,
                    )
                })
                .collect();
            nodes.push(row);
        }
        nodes
    }
}
