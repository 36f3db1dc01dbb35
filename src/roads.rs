//! Road construction
//!
//! Turns node sequences and node grids into road polylines, and perturbs
//! straight segments into slightly organic curves for spur roads.

use std::f64::consts::TAU;

use geo::{LineString, Point, Simplify};
use rand::Rng;

use crate::nodes::NodeGrid;

/// Tolerance used to simplify perturbed curves back to meaningful vertices
const CURVE_SIMPLIFY_TOLERANCE: f64 = 0.5;

/// Builds road polylines from points, grids and curve endpoints.
pub struct RoadBuilder;

impl RoadBuilder {
    pub fn new() -> Self {
        Self
    }

    /// One straight two-point road per consecutive pair in `points`.
    pub fn roads_from_points(&self, points: &[Point<f64>]) -> Vec<LineString<f64>> {
        let mut roads = Vec::with_capacity(points.len().saturating_sub(1));
        for pair in points.windows(2) {
            roads.push(LineString::from(vec![pair[0], pair[1]]));
        }
        roads
    }

    /// Roads along every grid adjacency.
    ///
    /// Row-major scan; each node first connects to its right neighbor, then
    /// to the node below it. For an R x C grid this yields
    /// `R*(C-1) + (R-1)*C` roads in a stable order.
    pub fn roads_from_grid(&self, nodes: &NodeGrid) -> Vec<LineString<f64>> {
        let mut roads = Vec::new();
        let rows = nodes.len();
        if rows == 0 {
            return roads;
        }

        let cols = nodes[0].len();
        for i in 0..rows {
            for j in 0..cols {
                if j + 1 < cols {
                    roads.push(LineString::from(vec![nodes[i][j], nodes[i][j + 1]]));
                }
                if i + 1 < rows {
                    roads.push(LineString::from(vec![nodes[i][j], nodes[i + 1][j]]));
                }
            }
        }
        roads
    }

    /// Organic curve between `p1` and `p2`.
    ///
    /// The midpoint is displaced by a random vector of length `uniform[1, 4]`
    /// at a uniform angle; `rate` is then added to both displaced
    /// coordinates. (Additive, not a scale of the offset vector - kept
    /// compatible with the historical behavior.) The 3-point polyline is
    /// simplified so a negligible bulge collapses back to a segment.
    pub fn noisy_curve(
        &self,
        p1: Point<f64>,
        p2: Point<f64>,
        rate: i32,
        rng: &mut impl Rng,
    ) -> LineString<f64> {
        let mut mid_x = (p1.x() + p2.x()) / 2.0;
        let mut mid_y = (p1.y() + p2.y()) / 2.0;

        let angle = rng.gen_range(0.0..TAU);
        let dist = rng.gen_range(1.0..=4.0);
        mid_x += angle.cos() * dist + rate as f64;
        mid_y += angle.sin() * dist + rate as f64;

        let curve = LineString::from(vec![p1, Point::new(mid_x, mid_y), p2]);
        curve.simplify(&CURVE_SIMPLIFY_TOLERANCE)
    }
}

impl Default for RoadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn chain(n: usize) -> Vec<Point<f64>> {
        (0..n)
            .map(|i| Point::new(i as f64 * 300.0, (i % 2) as f64 * 10.0))
            .collect()
    }

    #[test]
    fn test_roads_from_points_round_trip() {
        let points = chain(6);
        let roads = RoadBuilder::new().roads_from_points(&points);
        assert_eq!(roads.len(), 5);
        for (i, road) in roads.iter().enumerate() {
            assert_eq!(road.0.len(), 2);
            assert_eq!(Point::from(road.0[0]), points[i]);
            assert_eq!(Point::from(road.0[1]), points[i + 1]);
        }
    }

    #[test]
    fn test_roads_from_points_degenerate() {
        let builder = RoadBuilder::new();
        assert!(builder.roads_from_points(&[]).is_empty());
        assert!(builder.roads_from_points(&chain(1)).is_empty());
    }

    #[test]
    fn test_grid_road_count() {
        // 3 rows x 5 cols: 3*4 horizontal + 2*5 vertical = 22
        let nodes: NodeGrid = (0..3)
            .map(|i| {
                (0..5)
                    .map(|j| Point::new(j as f64 * 300.0, i as f64 * -250.0))
                    .collect()
            })
            .collect();
        let roads = RoadBuilder::new().roads_from_grid(&nodes);
        assert_eq!(roads.len(), 22);
    }

    #[test]
    fn test_empty_grid_yields_no_roads() {
        let builder = RoadBuilder::new();
        assert!(builder.roads_from_grid(&Vec::new()).is_empty());
        assert!(builder.roads_from_grid(&vec![Vec::new()]).is_empty());
    }

    #[test]
    fn test_noisy_curve_preserves_endpoints() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let builder = RoadBuilder::new();
        for rate in 0..=6 {
            let p1 = Point::new(0.0, 0.0);
            let p2 = Point::new(100.0, 50.0);
            let curve = builder.noisy_curve(p1, p2, rate, &mut rng);
            assert!(curve.0.len() >= 2);
            assert_eq!(Point::from(curve.0[0]), p1);
            assert_eq!(Point::from(*curve.0.last().unwrap()), p2);
        }
    }
}
