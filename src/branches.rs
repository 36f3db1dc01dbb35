//! Spur branch generation
//!
//! Adds short perpendicular side roads off existing roads. Every candidate
//! is gated by the configured probability, grown as an organic curve, and
//! dropped unless it stays fully inside the supplied bounding polygon.

use geo::{Contains, LineInterpolatePoint, LineString, Point, Polygon};
use rand::Rng;

use crate::config::CityConfig;
use crate::geometry::unit_normal;
use crate::roads::RoadBuilder;

/// Fraction along a road where a branch sprouts
const BRANCH_ANCHOR: f64 = 0.4;

/// Generates perpendicular spur roads off a road set.
pub struct BranchGenerator {
    config: CityConfig,
    road_builder: RoadBuilder,
}

impl BranchGenerator {
    pub fn new(config: &CityConfig) -> Self {
        Self {
            config: config.clone(),
            road_builder: RoadBuilder::new(),
        }
    }

    /// Branches for `roads`, order-preserving, each fully inside `boundary`.
    pub fn generate(
        &self,
        roads: &[LineString<f64>],
        boundary: &Polygon<f64>,
        rng: &mut impl Rng,
    ) -> Vec<LineString<f64>> {
        let mut branches = Vec::new();

        for road in roads {
            let Some(segment) = road.lines().next() else {
                continue;
            };
            let Some((nx, ny)) = unit_normal(segment.start.into(), segment.end.into()) else {
                continue;
            };
            let Some(anchor) = road.line_interpolate_point(BRANCH_ANCHOR) else {
                continue;
            };

            if rng.gen::<f64>() > self.config.branch_prob {
                continue;
            }

            let mut length = self.config.cell
                * rng.gen_range(self.config.branch_min..=self.config.branch_max);
            if rng.gen_bool(0.5) {
                length = -length;
            }

            let tip = Point::new(anchor.x() + nx * length, anchor.y() + ny * length);
            let rate = rng.gen_range(0..=6);
            let branch = self.road_builder.noisy_curve(anchor, tip, rate, rng);

            if !boundary.contains(&branch) {
                continue;
            }
            branches.push(branch);
        }
        branches
    }
}
