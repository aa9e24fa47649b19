use std::error::Error;

use dyna::{
    algo::{DynaAgent, DynaAgentConfig},
    exploration::Uniform,
    gym::GridMazeConfig,
};

const NUM_STEPS: usize = 3000;
const NUM_RUNS: u64 = 20;
const PLANNING_BUDGETS: [Option<usize>; 3] = [None, Some(10), Some(50)];

/// Compares planning budgets on the classic 9x6 Dyna maze and writes the
/// averaged cumulative reward per step to stdout as csv.
fn main() -> Result<(), Box<dyn Error>> {
    let maze = GridMazeConfig {
        width: 9,
        height: 6,
        blocked_states: vec![7, 11, 16, 20, 25, 29, 41],
        start_state: 18,
        goal_state: 8,
        reward_at_goal: 1,
    }
    .build()?;

    let mut totals = vec![[0.0f64; PLANNING_BUDGETS.len()]; NUM_STEPS];
    for seed in 0..NUM_RUNS {
        for (i, &budget) in PLANNING_BUDGETS.iter().enumerate() {
            let mut agent = DynaAgent::from_seed(
                &maze,
                DynaAgentConfig {
                    alpha: 0.5,
                    gamma: 0.95,
                    epsilon: 0.001,
                },
                Uniform::new(54),
                seed,
            );
            agent.simulate(&maze, NUM_STEPS, true, budget);
            for (step, &reward) in agent.performance().iter().enumerate() {
                totals[step][i] += reward as f64 / NUM_RUNS as f64;
            }
        }
    }

    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    wtr.write_record(["step", "no_planning", "plan_10", "plan_50"])?;
    for (step, row) in totals.iter().enumerate() {
        wtr.write_record([
            step.to_string(),
            format!("{:.2}", row[0]),
            format!("{:.2}", row[1]),
            format!("{:.2}", row[2]),
        ])?;
    }
    wtr.flush()?;

    Ok(())
}
