//! City generation pipeline
//!
//! Sequences the generators into one layout: main street, five blocks hung
//! off it in a fixed pattern, the park, a second parallel main street, and
//! spur branches. All randomness flows through a single sequential RNG
//! seeded at the top, so a seed fully determines the layout.

use geo::Point;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::block::{BlockAttachment, BlockBuilder};
use crate::branches::BranchGenerator;
use crate::config::CityConfig;
use crate::geometry::bounding_polygon;
use crate::layout::CityLayout;
use crate::nodes::NodeGenerator;
use crate::park::ParkGenerator;
use crate::roads::RoadBuilder;

/// Nodes per main street
const MAIN_STREET_NODES: usize = 10;
/// Origin of the second, parallel main street
const SECOND_STREET_ORIGIN: (f64, f64) = (0.0, -1550.0);

/// Runs the full generation pipeline.
pub struct CityGenerator {
    config: CityConfig,
    node_generator: NodeGenerator,
    road_builder: RoadBuilder,
    block_builder: BlockBuilder,
    park_generator: ParkGenerator,
    branch_generator: BranchGenerator,
}

impl CityGenerator {
    pub fn new(config: CityConfig) -> Self {
        Self {
            node_generator: NodeGenerator::new(&config),
            road_builder: RoadBuilder::new(),
            block_builder: BlockBuilder::new(&config),
            park_generator: ParkGenerator::new(),
            branch_generator: BranchGenerator::new(&config),
            config,
        }
    }

    /// Generate a layout from `seed`.
    pub fn generate(&self, seed: u64) -> CityLayout {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate_with_rng(&mut rng)
    }

    /// Generate a layout drawing from an already-seeded RNG.
    pub fn generate_with_rng(&self, rng: &mut impl Rng) -> CityLayout {
        let main_street_nodes = self.node_generator.main_street(MAIN_STREET_NODES, rng);
        let main_street_roads = self.road_builder.roads_from_points(&main_street_nodes);

        let first_block = self.block_builder.build(
            BlockAttachment::Down {
                top_side: main_street_nodes[5..9].to_vec(),
            },
            rng,
        );

        let park_polygon = self.park_generator.polygon_from_sides(
            &first_block.left_column(),
            &main_street_nodes[3..5],
        );
        let bottom_park_side = ParkGenerator::bottom_side(&park_polygon);

        let second_block = self.block_builder.build(
            BlockAttachment::Down {
                top_side: bottom_park_side,
            },
            rng,
        );

        let third_block = self.block_builder.build(
            BlockAttachment::RightDown {
                top_side: first_block.last_row(),
                left_side: second_block.right_column(),
            },
            rng,
        );

        let fourth_block = self.block_builder.build(
            BlockAttachment::Up {
                bottom_side: main_street_nodes[3..6].to_vec(),
            },
            rng,
        );

        let fifth_block = self.block_builder.build(
            BlockAttachment::UpRight {
                bottom_side: main_street_nodes[5..9].to_vec(),
                left_side: fourth_block.right_column(),
            },
            rng,
        );

        let second_street_nodes = self.node_generator.main_street_from(
            MAIN_STREET_NODES,
            Point::new(SECOND_STREET_ORIGIN.0, SECOND_STREET_ORIGIN.1),
            rng,
        );
        let second_street_roads = self.road_builder.roads_from_points(&second_street_nodes);

        // the upward fourth block only lends its right column to the fifth;
        // the version between the second block and the new street replaces it
        let fourth_block = self.block_builder.build(
            BlockAttachment::BetweenTwoRoads {
                top_side: second_block.last_row(),
                bottom_side: second_street_nodes[3..7].to_vec(),
            },
            rng,
        );

        let blocks = vec![
            first_block,
            second_block,
            third_block,
            fourth_block,
            fifth_block,
        ];

        let mut all_roads: Vec<_> = blocks
            .iter()
            .flat_map(|block| block.roads.iter().cloned())
            .collect();
        all_roads.extend(main_street_roads.iter().cloned());
        all_roads.extend(second_street_roads.iter().cloned());

        let park = self.park_generator.populate(park_polygon, rng);

        let city_bounds = bounding_polygon(
            blocks
                .iter()
                .flat_map(|block| block.nodes.iter().flatten().copied())
                .chain(main_street_nodes.iter().copied())
                .chain(second_street_nodes.iter().copied()),
            self.config.cell,
        );
        let branches = match &city_bounds {
            Some(bounds) => self.branch_generator.generate(&all_roads, bounds, rng),
            None => Vec::new(),
        };

        let mut nodes = main_street_nodes;
        nodes.extend(second_street_nodes);

        CityLayout {
            main_street_nodes: nodes,
            main_street_roads,
            blocks,
            park,
            all_roads,
            branches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BLOCK_ROWS;

    #[test]
    fn test_pipeline_is_deterministic() {
        let generator = CityGenerator::new(CityConfig::default());
        let a = generator.generate(42);
        let b = generator.generate(42);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_different_seeds_differ() {
        let generator = CityGenerator::new(CityConfig::default());
        let a = generator.generate(1);
        let b = generator.generate(2);
        assert_ne!(
            serde_json::to_string(&a.main_street_nodes).unwrap(),
            serde_json::to_string(&b.main_street_nodes).unwrap()
        );
    }

    #[test]
    fn test_layout_shape() {
        let generator = CityGenerator::new(CityConfig::default());
        let layout = generator.generate(42);

        assert_eq!(layout.blocks.len(), 5);
        assert_eq!(layout.main_street_nodes.len(), MAIN_STREET_NODES * 2);
        assert_eq!(layout.main_street_roads.len(), MAIN_STREET_NODES - 1);
        assert!(layout.house_count() > 0);

        // every block grid is rectangular with the fixed row count
        for block in &layout.blocks {
            assert_eq!(block.nodes.len(), BLOCK_ROWS + 1);
            let width = block.nodes[0].len();
            assert!(block.nodes.iter().all(|row| row.len() == width));
        }
    }

    #[test]
    fn test_all_roads_aggregates_blocks_and_streets() {
        let generator = CityGenerator::new(CityConfig::default());
        let layout = generator.generate(42);
        let block_roads: usize = layout.blocks.iter().map(|b| b.roads.len()).sum();
        // both streets contribute node_count - 1 roads each
        assert_eq!(
            layout.all_roads.len(),
            block_roads + 2 * (MAIN_STREET_NODES - 1)
        );
    }

    #[test]
    fn test_zero_branch_probability() {
        let config = CityConfig {
            branch_prob: 0.0,
            ..CityConfig::default()
        };
        let layout = CityGenerator::new(config).generate(42);
        assert!(layout.branches.is_empty());
    }

    #[test]
    fn test_park_contents_populated() {
        let layout = CityGenerator::new(CityConfig::default()).generate(42);
        assert!(!layout.park.trees.is_empty());
        assert!(layout.park.boundary.exterior().0.len() >= 4);
    }
}
