//! Stained-glass rendering of the reference grid as ASCII art

use grid_voronoi::*;

const GLYPHS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

fn main() -> Result<()> {
    println!("=== grid_voronoi Stained Glass Demo ===\n");

    // Step 1: Configure grid
    println!("Step 1: Configuring grid...");
    let config = GridConfigBuilder::new()
        .domain(300, 200)
        .square_cells(50)?
        .margins(5, 5)
        .hash(SeedHash::Legacy)
        .hash_seed(0)
        .build()?;

    println!("  Domain: {}x{}", config.domain_width, config.domain_height);
    println!("  Cells: {}x{} ({} seeds)", config.columns(), config.rows(), config.cell_count());
    println!("  Hash: {:?}", config.hash);

    // Step 2: Build diagram
    println!("\nStep 2: Building diagram...");
    let diagram = VoronoiGrid::build(config)?;
    for seed in diagram.seeds() {
        let radius = seed
            .radius
            .map_or_else(|| "none".to_string(), |r| format!("{:.2}", r));
        let neighbors: Vec<usize> = seed.neighbors.iter().map(|n| n.index).collect();
        println!(
            "  Seed {:2} at ({:3}, {:3}) radius {:>6} neighbors {:?}",
            seed.index,
            seed.x(),
            seed.y(),
            radius,
            neighbors
        );
    }
    println!("  {} edges", diagram.edges().len());

    // Step 3: Render regions; uppercase marks boundary pixels
    println!("\nStep 3: Rendering (4x4 pixels per character)...\n");
    for row in 0..50 {
        let line: String = (0..75)
            .map(|col| {
                let point = Point::new(f64::from(col) * 4.0 + 2.0, f64::from(row) * 4.0 + 2.0);
                match diagram.classify(point) {
                    Ok(region) => {
                        let glyph = GLYPHS[region.seed() % GLYPHS.len()] as char;
                        if region.is_core() {
                            glyph
                        } else {
                            glyph.to_ascii_uppercase()
                        }
                    }
                    Err(_) => ' ',
                }
            })
            .collect();
        println!("  {}", line);
    }

    // Step 4: Blend a few sample points
    println!("\nStep 4: Blended hues:");
    let count = diagram.seed_count() as f32;
    let hue = |seed: &Seed| 2.0 * seed.index as f32 / (count + 1.0);
    for point in [Point::new(130.0, 70.0), Point::new(100.0, 100.0), Point::new(150.0, 50.0)] {
        let recipe = diagram.blend_recipe(point)?;
        let value = diagram.sample(point, &hue)?;
        println!(
            "  ({}, {}) -> seeds {:?} hue {:.3}",
            point.x,
            point.y,
            recipe.members().collect::<Vec<_>>(),
            value
        );
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
