//! Block construction
//!
//! A block is one node grid plus the roads and house footprints derived
//! from it. [`BlockBuilder`] owns the generators and dispatches on
//! [`BlockAttachment`], the edge pattern a new block hangs off.

use geo::{LineString, Point, Polygon};
use rand::Rng;

use crate::config::CityConfig;
use crate::houses::HouseGenerator;
use crate::nodes::{NodeGenerator, NodeGrid, MAX_SPACING, MIN_SPACING};
use crate::roads::RoadBuilder;

/// Rows generated for every block grid
pub const BLOCK_ROWS: usize = 2;

/// One city block: its node grid, internal roads, and house footprints.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Block {
    pub nodes: NodeGrid,
    pub roads: Vec<LineString<f64>>,
    pub houses: Vec<Polygon<f64>>,
}

impl Block {
    /// Last (outermost) row of the grid.
    pub fn last_row(&self) -> Vec<Point<f64>> {
        self.nodes.last().cloned().unwrap_or_default()
    }

    /// First column of the grid, top to bottom.
    pub fn left_column(&self) -> Vec<Point<f64>> {
        self.nodes
            .iter()
            .filter_map(|row| row.first().copied())
            .collect()
    }

    /// Last column of the grid, top to bottom.
    pub fn right_column(&self) -> Vec<Point<f64>> {
        self.nodes
            .iter()
            .filter_map(|row| row.last().copied())
            .collect()
    }
}

/// Which edge pattern a new block attaches to.
///
/// Each variant carries exactly the edges its grid generation needs.
#[derive(Clone, Debug)]
pub enum BlockAttachment {
    /// Grow downward from a top edge
    Down { top_side: Vec<Point<f64>> },
    /// Grow upward from a bottom edge
    Up { bottom_side: Vec<Point<f64>> },
    /// Grow down-right: top edge plus a left edge pinning the first column
    RightDown {
        top_side: Vec<Point<f64>>,
        left_side: Vec<Point<f64>>,
    },
    /// Grow up-right: bottom edge plus a left edge pinning the first column
    UpRight {
        bottom_side: Vec<Point<f64>>,
        left_side: Vec<Point<f64>>,
    },
    /// Span the gap between two existing roads
    BetweenTwoRoads {
        top_side: Vec<Point<f64>>,
        bottom_side: Vec<Point<f64>>,
    },
}

/// Builds blocks: nodes, then roads, then houses.
pub struct BlockBuilder {
    config: CityConfig,
    node_generator: NodeGenerator,
    road_builder: RoadBuilder,
    house_generator: HouseGenerator,
}

impl BlockBuilder {
    pub fn new(config: &CityConfig) -> Self {
        Self {
            config: config.clone(),
            node_generator: NodeGenerator::new(config),
            road_builder: RoadBuilder::new(),
            house_generator: HouseGenerator::new(config),
        }
    }

    /// Build one block attached per `attachment`.
    ///
    /// House placement is skipped when the animation flag is set; the
    /// consumer drives [`HouseGenerator::generate_with`] itself in that case.
    pub fn build(&self, attachment: BlockAttachment, rng: &mut impl Rng) -> Block {
        let nodes = self.generate_nodes(attachment, rng);
        let roads = self.road_builder.roads_from_grid(&nodes);
        let houses = if self.config.animate_houses {
            Vec::new()
        } else {
            self.house_generator.generate(&nodes, rng)
        };
        Block {
            nodes,
            roads,
            houses,
        }
    }

    fn generate_nodes(&self, attachment: BlockAttachment, rng: &mut impl Rng) -> NodeGrid {
        match attachment {
            BlockAttachment::Down { top_side } => self.node_generator.grid_down(
                &top_side,
                BLOCK_ROWS,
                MIN_SPACING,
                MAX_SPACING,
                rng,
            ),
            BlockAttachment::Up { bottom_side } => self.node_generator.grid_up(
                &bottom_side,
                BLOCK_ROWS,
                MIN_SPACING,
                MAX_SPACING,
                rng,
            ),
            BlockAttachment::RightDown {
                top_side,
                left_side,
            } => self.node_generator.grid_from_corner(
                &top_side,
                &left_side,
                BLOCK_ROWS,
                MIN_SPACING,
                MAX_SPACING,
                rng,
            ),
            BlockAttachment::UpRight {
                bottom_side,
                left_side,
            } => self.node_generator.grid_from_corner(
                &bottom_side,
                &left_side,
                BLOCK_ROWS,
                MIN_SPACING,
                MAX_SPACING,
                rng,
            ),
            BlockAttachment::BetweenTwoRoads {
                top_side,
                bottom_side,
            } => self
                .node_generator
                .grid_between(&top_side, &bottom_side, BLOCK_ROWS),
        }
    }
}
