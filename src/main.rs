use clap::Parser;

use city_generator::city::CityGenerator;
use city_generator::config::CityConfig;

#[derive(Parser, Debug)]
#[command(name = "city_generator")]
#[command(about = "Generate a procedural city layout")]
struct Args {
    /// Random seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Block cell size in world units
    #[arg(long)]
    cell: Option<f64>,

    /// Node jitter bound in world units
    #[arg(long)]
    offset: Option<f64>,

    /// Probability of a spur branch per road (0.0-1.0)
    #[arg(long)]
    branch_prob: Option<f64>,

    /// Write the generated layout as JSON to this path
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut config = CityConfig::default();
    if let Some(cell) = args.cell {
        config.cell = cell;
    }
    if let Some(offset) = args.offset {
        config.offset = offset;
    }
    if let Some(branch_prob) = args.branch_prob {
        config.branch_prob = branch_prob;
    }

    println!("Generating city with seed: {}", seed);
    let generator = CityGenerator::new(config);
    let layout = generator.generate(seed);

    println!(
        "Blocks: {} ({} nodes, {} houses)",
        layout.blocks.len(),
        layout.node_count(),
        layout.house_count()
    );
    println!(
        "Roads: {} ({} spur branches)",
        layout.road_count(),
        layout.branches.len()
    );
    println!(
        "Park: {} trees, {} lawns, {} paths",
        layout.park.trees.len(),
        layout.park.lawns.len(),
        layout.park.paths.len()
    );

    if let Some(path) = args.output {
        let json = serde_json::to_string_pretty(&layout)?;
        std::fs::write(&path, json)?;
        println!("Layout written to {}", path);
    }

    Ok(())
}
