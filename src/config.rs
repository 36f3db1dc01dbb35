//! Generation parameters
//!
//! A single immutable bundle of tunables consumed by every generator. The
//! engine never mutates it after construction; callers build one up front
//! (or take the defaults) and pass it to [`crate::city::CityGenerator`].

/// Configuration for city layout generation
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CityConfig {
    /// Nominal side length of one block cell in world units
    pub cell: f64,
    /// Jitter bound applied to generated node coordinates (both axes)
    pub offset: f64,
    /// Probability that a road spawns a spur branch (0.0-1.0)
    pub branch_prob: f64,
    /// Lower bound of branch length as a fraction of `cell`
    pub branch_min: f64,
    /// Upper bound of branch length as a fraction of `cell`
    pub branch_max: f64,
    /// Defer house placement so a renderer can animate it footprint by footprint
    pub animate_houses: bool,
    /// Hint for interactive consumers to display the layout locally
    pub show_local: bool,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            cell: 250.0,
            offset: 20.0,
            branch_prob: 0.5,
            branch_min: 0.3,
            branch_max: 0.8,
            animate_houses: false,
            show_local: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_sane() {
        let config = CityConfig::default();
        assert!(config.cell > 0.0);
        assert!(config.offset >= 0.0);
        assert!((0.0..=1.0).contains(&config.branch_prob));
        assert!(config.branch_min <= config.branch_max);
    }
}
