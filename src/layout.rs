//! City layout container
//!
//! The root aggregate handed to a renderer: main streets, blocks, the park,
//! and the flattened road list, all frozen after generation.

use geo::{LineString, Point};

use crate::block::Block;
use crate::park::ParkLayout;

/// Everything one generation run produces.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CityLayout {
    /// Nodes of both main streets, first street then second
    pub main_street_nodes: Vec<Point<f64>>,
    /// Roads of the first main street
    pub main_street_roads: Vec<LineString<f64>>,
    /// Blocks in generation order
    pub blocks: Vec<Block>,
    /// The park with its contents
    pub park: ParkLayout,
    /// Every block road followed by both streets' roads, generation order
    pub all_roads: Vec<LineString<f64>>,
    /// Accepted spur branches off `all_roads`
    pub branches: Vec<LineString<f64>>,
}

impl CityLayout {
    /// Total house footprints across all blocks.
    pub fn house_count(&self) -> usize {
        self.blocks.iter().map(|b| b.houses.len()).sum()
    }

    /// Total grid nodes across all blocks.
    pub fn node_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|b| b.nodes.iter().map(Vec::len).sum::<usize>())
            .sum()
    }

    /// Roads in the flattened list (excludes branches).
    pub fn road_count(&self) -> usize {
        self.all_roads.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::park::ParkGenerator;

    #[test]
    fn test_counts_on_empty_layout() {
        let layout = CityLayout {
            main_street_nodes: Vec::new(),
            main_street_roads: Vec::new(),
            blocks: Vec::new(),
            park: ParkLayout {
                boundary: ParkGenerator::reference_polygon(),
                lawns: Vec::new(),
                paths: Vec::new(),
                trees: Vec::new(),
            },
            all_roads: Vec::new(),
            branches: Vec::new(),
        };
        assert_eq!(layout.house_count(), 0);
        assert_eq!(layout.node_count(), 0);
        assert_eq!(layout.road_count(), 0);
    }
}
