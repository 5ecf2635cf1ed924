use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use nexus_admission::{SimConfig, Simulation, Summary};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Number of steps with request generation.
    #[arg(long)]
    steps: Option<u64>,

    /// Configuration JSON file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Event log path.
    #[arg(long, default_value = "log.txt")]
    log: PathBuf,

    /// Random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Fewest requests generated per step.
    #[arg(long)]
    min_arrivals: Option<u32>,

    /// Most requests generated per step.
    #[arg(long)]
    max_arrivals: Option<u32>,

    /// Lowest request priority.
    #[arg(long, allow_hyphen_values = true)]
    min_priority: Option<i32>,

    /// Highest request priority.
    #[arg(long, allow_hyphen_values = true)]
    max_priority: Option<i32>,

    /// Initial queue capacity.
    #[arg(long)]
    capacity: Option<usize>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<(SimConfig, PathBuf)> {
        let mut cfg = match &self.config {
            Some(path) => SimConfig::from_file(path)?,
            None => SimConfig::default(),
        };
        if let Some(v) = self.steps {
            cfg.steps = v;
        }
        if let Some(v) = self.seed {
            cfg.seed = v;
        }
        if let Some(v) = self.min_arrivals {
            cfg.min_arrivals = v;
        }
        if let Some(v) = self.max_arrivals {
            cfg.max_arrivals = v;
        }
        if let Some(v) = self.min_priority {
            cfg.min_priority = v;
        }
        if let Some(v) = self.max_priority {
            cfg.max_priority = v;
        }
        if let Some(v) = self.capacity {
            cfg.initial_capacity = v;
        }
        Ok((cfg, self.log))
    }
}

fn print_summary(summary: &Summary, log_path: &std::path::Path) {
    let rule = "=".repeat(50);
    println!();
    println!("Requests created:          {}", summary.total_created);
    println!("Served while generating:   {}", summary.served_during_generation);
    println!("Served while draining:     {}", summary.served_during_drain);
    println!("{}", rule);
    match &summary.max_wait {
        Some(served) => {
            println!("Longest wait: {} steps", served.wait_time());
            println!("  request:      #{}", served.request.id());
            println!("  priority:     {}", served.request.priority());
            println!("  added at:     {}", served.request.step_added());
            println!("  removed at:   {}", served.step_removed);
        }
        None => println!("No requests were served"),
    }
    println!("{}", rule);
    println!(
        "Event log: {} ({} bytes)",
        log_path.display(),
        summary.log_bytes
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config, log_path) = Args::parse().into_config()?;
    log::info!(
        "running {} steps (seed {}, arrivals {:?}, priorities {:?})",
        config.steps,
        config.seed,
        config.arrivals(),
        config.priorities()
    );

    let file = File::create(&log_path)
        .with_context(|| format!("creating event log {}", log_path.display()))?;
    let rng = Pcg64::seed_from_u64(config.seed);
    let mut sim = Simulation::new(config, rng, file)?;
    let summary = sim.run()?;
    let mut file = sim.into_log()?;
    file.flush()?;

    print_summary(&summary, &log_path);
    Ok(())
}
