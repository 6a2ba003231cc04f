//! Example: Planning a square tool path.
//!
//! This example demonstrates how to:
//! - Build an axis snapshot from TOML configuration
//! - Queue a closed square path at rapid rate
//! - Inspect the trapezoid every block carries for the step generator
//!
//! Run with: `cargo run --example plan_square --features std`

use stepper_planner::config::parse_config;
use stepper_planner::{Axes, Planner, Result};

fn main() -> Result<()> {
    println!("=== Square Path Planning Example ===\n");

    // Two symmetric axes, 100 steps/mm, 10 m/min rapids
    let toml_content = r#"
junction_deviation_mm = 0.013

[[axes]]
name = "x"
steps_per_mm = 100.0
max_rate_mm_per_min = 10000.0
acceleration_mm_per_sec2 = 10.0
max_travel_mm = 300.0

[[axes]]
name = "y"
steps_per_mm = 100.0
max_rate_mm_per_min = 10000.0
acceleration_mm_per_sec2 = 10.0
max_travel_mm = 300.0
"#;

    let config = parse_config(toml_content)?;
    let axes = Axes::from_config(&config);

    println!(
        "Machine: {} axes, junction deviation {} mm",
        axes.number_axis, axes.junction_deviation
    );

    // Plan a 100 mm square at maximum rate. Each corner is a 90° junction,
    // so the planner slows to the junction-deviation limit between sides.
    let mut planner: Planner = Planner::new();
    let corners = [
        [100.0, 0.0],
        [100.0, 100.0],
        [0.0, 100.0],
        [0.0, 0.0],
    ];
    for corner in &corners {
        planner.add(corner, f32::INFINITY, &axes);
    }

    println!("Planned {} blocks:\n", planner.len());

    // Consume the queue the way a step generator would
    let mut side = 0;
    while let Some(index) = planner.claim_next() {
        let block = planner.block(index);
        side += 1;

        println!(
            "Side {}: {:.1} mm, {} steps, nominal {:.1} mm/s",
            side, block.millimeters, block.total_step_count, block.nominal_speed
        );
        println!(
            "  entry speed² {:.4} (mm/s)², junction limit² {:.4} (mm/s)²",
            block.entry_speed_sqr, block.max_junction_speed_sqr
        );
        println!(
            "  rates: {} -> {} -> {} steps/s",
            block.initial_rate, block.cruise_rate, block.final_rate
        );
        println!(
            "  accelerate until step {}, decelerate after step {}\n",
            block.accelerate_until_step, block.decelerate_after_step
        );

        planner.retire_front();
    }

    println!("Queue drained; planner is empty: {}", planner.is_empty());

    Ok(())
}
