//! House footprint placement
//!
//! Fills each cell of a block grid with building footprints in two passes:
//! rectangular strips walked along the cell edges (facing the surrounding
//! roads), then small squares scattered into the interior under a minimum
//! separation constraint. Placement is best effort; a footprint that cannot
//! be fitted within its attempt budget is simply skipped.

use geo::{Contains, EuclideanDistance, LineString, Point, Polygon};
use rand::Rng;

use crate::config::CityConfig;
use crate::geometry::square_polygon;
use crate::nodes::NodeGrid;

/// Attempts per scattered square before giving up on it
const PLACEMENT_ATTEMPTS: usize = 15;

/// Scattered squares requested per cell (inclusive bounds)
const SCATTER_MIN: u32 = 5;
const SCATTER_MAX: u32 = 9;

/// Fractions of the configured cell size defining footprint geometry
const SQUARE_SIZE_FRAC: f64 = 0.11;
const SQUARE_SPACING_FRAC: f64 = 0.02;
const STRIP_LEN_FRAC: f64 = 0.27;
const STRIP_HEIGHT_FRAC: f64 = 0.12;
const ROAD_OFFSET_FRAC: f64 = 0.14;

/// Fraction of the edge length between consecutive strip footprints
const STRIP_STEP_FRAC: f64 = 0.023;
/// Strip walk starts this far along the edge
const STRIP_START_FRAC: f64 = 0.3;
/// Strip walk stops once the next footprint would pass this fraction
const STRIP_STOP_FRAC: f64 = 0.95;

/// Places house footprints inside the cells of a node grid.
pub struct HouseGenerator {
    config: CityConfig,
}

impl HouseGenerator {
    pub fn new(config: &CityConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// All footprints for the block, in placement order.
    pub fn generate(&self, nodes: &NodeGrid, rng: &mut impl Rng) -> Vec<Polygon<f64>> {
        self.generate_with(nodes, rng, |_| {})
    }

    /// Like [`generate`](Self::generate), invoking `on_placed` as each
    /// footprint is accepted so a consumer can animate placement.
    pub fn generate_with(
        &self,
        nodes: &NodeGrid,
        rng: &mut impl Rng,
        mut on_placed: impl FnMut(&Polygon<f64>),
    ) -> Vec<Polygon<f64>> {
        let rows = nodes.len().saturating_sub(1);
        let cols = nodes.first().map_or(0, |row| row.len().saturating_sub(1));

        let cell_size = self.config.cell;
        let sq_size = cell_size * SQUARE_SIZE_FRAC;
        let sq_spacing = cell_size * SQUARE_SPACING_FRAC;

        let mut houses: Vec<Polygon<f64>> = Vec::new();

        for i in 0..rows {
            for j in 0..cols {
                let p_tl = nodes[i][j];
                let p_tr = nodes[i][j + 1];
                let p_br = nodes[i + 1][j + 1];
                let p_bl = nodes[i + 1][j];
                let cell = Polygon::new(
                    LineString::from(vec![p_tl, p_tr, p_br, p_bl]),
                    vec![],
                );

                let edges = [
                    (p_tl, p_tr),
                    (p_tr, p_br),
                    (p_br, p_bl),
                    (p_bl, p_tl),
                ];
                for (a, b) in edges {
                    self.place_strip(a, b, &cell, &mut houses, &mut on_placed);
                }

                let num_sq = rng.gen_range(SCATTER_MIN..=SCATTER_MAX);
                let corners = [p_tl, p_tr, p_br, p_bl];
                let min_x = corners.iter().map(|p| p.x()).fold(f64::INFINITY, f64::min);
                let max_x = corners.iter().map(|p| p.x()).fold(f64::NEG_INFINITY, f64::max);
                let min_y = corners.iter().map(|p| p.y()).fold(f64::INFINITY, f64::min);
                let max_y = corners.iter().map(|p| p.y()).fold(f64::NEG_INFINITY, f64::max);

                for _ in 0..num_sq {
                    if let Some(house) = self.try_place_square(
                        &cell,
                        (min_x, min_y, max_x, max_y),
                        &houses,
                        sq_size,
                        sq_spacing,
                        rng,
                    ) {
                        on_placed(&house);
                        houses.push(house);
                    }
                }
            }
        }
        houses
    }

    /// Walk one cell edge, laying rectangular footprints offset toward the
    /// cell interior.
    fn place_strip(
        &self,
        a: Point<f64>,
        b: Point<f64>,
        cell: &Polygon<f64>,
        houses: &mut Vec<Polygon<f64>>,
        on_placed: &mut impl FnMut(&Polygon<f64>),
    ) {
        let cell_size = self.config.cell;
        let strip_len = cell_size * STRIP_LEN_FRAC;
        let strip_height = cell_size * STRIP_HEIGHT_FRAC;
        let road_offset = cell_size * ROAD_OFFSET_FRAC;

        let dx = b.x() - a.x();
        let dy = b.y() - a.y();
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 {
            return;
        }
        let (ux, uy) = (dx / length, dy / length);
        let (mut nx, mut ny) = (-uy, ux);

        let step = STRIP_STEP_FRAC * length;
        let mut total = STRIP_START_FRAC * length;

        while total + strip_len < length * STRIP_STOP_FRAC {
            let bx = a.x() + ux * total;
            let by = a.y() + uy * total;

            // flip the normal if the offset probe lands outside the cell
            let probe = Point::new(bx + nx * road_offset, by + ny * road_offset);
            if !cell.contains(&probe) {
                nx = -nx;
                ny = -ny;
            }

            let hx = bx + nx * road_offset;
            let hy = by + ny * road_offset;
            let house = Polygon::new(
                LineString::from(vec![
                    (
                        hx - ux * strip_len / 2.0 - nx * strip_height / 2.0,
                        hy - uy * strip_len / 2.0 - ny * strip_height / 2.0,
                    ),
                    (
                        hx + ux * strip_len / 2.0 - nx * strip_height / 2.0,
                        hy + uy * strip_len / 2.0 - ny * strip_height / 2.0,
                    ),
                    (
                        hx + ux * strip_len / 2.0 + nx * strip_height / 2.0,
                        hy + uy * strip_len / 2.0 + ny * strip_height / 2.0,
                    ),
                    (
                        hx - ux * strip_len / 2.0 + nx * strip_height / 2.0,
                        hy - uy * strip_len / 2.0 + ny * strip_height / 2.0,
                    ),
                ]),
                vec![],
            );

            on_placed(&house);
            houses.push(house);
            total += strip_len + step;
        }
    }

    /// One scattered square, or `None` when no attempt satisfied both the
    /// containment and the separation constraint.
    fn try_place_square(
        &self,
        cell: &Polygon<f64>,
        (min_x, min_y, max_x, max_y): (f64, f64, f64, f64),
        placed: &[Polygon<f64>],
        sq_size: f64,
        sq_spacing: f64,
        rng: &mut impl Rng,
    ) -> Option<Polygon<f64>> {
        let lo_x = min_x + sq_spacing;
        let hi_x = max_x - sq_size - sq_spacing;
        let lo_y = min_y + sq_spacing;
        let hi_y = max_y - sq_size - sq_spacing;
        if hi_x < lo_x || hi_y < lo_y {
            // cell too small to hold even one square
            return None;
        }

        for _ in 0..PLACEMENT_ATTEMPTS {
            let hx = rng.gen_range(lo_x..=hi_x);
            let hy = rng.gen_range(lo_y..=hi_y);
            let house = square_polygon(hx, hy, sq_size);

            if cell.contains(&house)
                && placed
                    .iter()
                    .all(|other| house.euclidean_distance(other) > sq_spacing)
            {
                return Some(house);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Single-cell grid: one square cell of the configured size.
    fn one_cell_grid(cell: f64) -> NodeGrid {
        vec![
            vec![Point::new(0.0, cell), Point::new(cell, cell)],
            vec![Point::new(0.0, 0.0), Point::new(cell, 0.0)],
        ]
    }

    /// Number of footprints the strip walk deterministically yields per edge.
    fn strips_per_edge(edge_len: f64, cell: f64) -> usize {
        let strip_len = cell * STRIP_LEN_FRAC;
        let step = STRIP_STEP_FRAC * edge_len;
        let mut total = STRIP_START_FRAC * edge_len;
        let mut count = 0;
        while total + strip_len < edge_len * STRIP_STOP_FRAC {
            count += 1;
            total += strip_len + step;
        }
        count
    }

    #[test]
    fn test_empty_grid_places_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let generator = HouseGenerator::new(&CityConfig::default());
        assert!(generator.generate(&Vec::new(), &mut rng).is_empty());
        assert!(generator
            .generate(&vec![vec![Point::new(0.0, 0.0)]], &mut rng)
            .is_empty());
    }

    #[test]
    fn test_perimeter_strips_come_first() {
        let config = CityConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let generator = HouseGenerator::new(&config);
        let houses = generator.generate(&one_cell_grid(config.cell), &mut rng);

        let per_edge = strips_per_edge(config.cell, config.cell);
        assert!(per_edge > 0);
        // 4 edges of strips, then at least SCATTER_MIN - allowing for skips
        assert!(houses.len() >= per_edge * 4);
    }

    #[test]
    fn test_scattered_squares_keep_separation() {
        let config = CityConfig::default();
        let sq_spacing = config.cell * SQUARE_SPACING_FRAC;
        let generator = HouseGenerator::new(&config);

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let houses = generator.generate(&one_cell_grid(config.cell), &mut rng);
            let per_edge = strips_per_edge(config.cell, config.cell);
            let scattered = &houses[per_edge * 4..];

            for (i, sq) in scattered.iter().enumerate() {
                // separation holds against every earlier footprint
                for other in &houses[..per_edge * 4 + i] {
                    let d = sq.euclidean_distance(other);
                    assert!(
                        d > sq_spacing,
                        "seed {seed}: separation {d} <= {sq_spacing}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_scattered_squares_inside_cell() {
        let config = CityConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let generator = HouseGenerator::new(&config);
        let grid = one_cell_grid(config.cell);
        let cell = Polygon::new(
            LineString::from(vec![grid[0][0], grid[0][1], grid[1][1], grid[1][0]]),
            vec![],
        );

        let houses = generator.generate(&grid, &mut rng);
        let per_edge = strips_per_edge(config.cell, config.cell);
        for sq in &houses[per_edge * 4..] {
            assert!(cell.contains(sq));
        }
    }

    #[test]
    fn test_callback_sees_every_footprint() {
        let config = CityConfig::default();
        let generator = HouseGenerator::new(&config);
        let grid = one_cell_grid(config.cell);

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let batch = generator.generate(&grid, &mut rng);

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut observed = 0usize;
        let streamed = generator.generate_with(&grid, &mut rng, |_| observed += 1);

        assert_eq!(batch.len(), streamed.len());
        assert_eq!(observed, streamed.len());
    }
}
