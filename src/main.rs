//! Headless simulator (default binary).
//!
//! Plays one game with the autopilot and prints the final report as JSON.
//! Configuration comes from `FEEDTRIS_*` environment variables, then flags.

use anyhow::Result;

use feedtris::sim::{self, SimConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = SimConfig::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    config.apply_args(&args)?;

    let report = sim::run(&config);
    println!("{}", report.to_json(config.pretty)?);
    Ok(())
}
