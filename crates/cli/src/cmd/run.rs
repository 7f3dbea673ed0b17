//! Implementation of the `run` command.
//!
//! Reads the action inputs, computes the setup plan, and executes it on a
//! tokio runtime. A failing step surfaces as an `::error::` annotation plus
//! a non-zero exit, so the job is never left in an ambiguous state.

use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use setup_opencv_lib::actions;
use setup_opencv_lib::apply::apply;
use setup_opencv_lib::config::Config;
use setup_opencv_lib::plan::compute_plan;

use crate::output::{OutputFormat, format_duration, print_json, print_stat, print_success};

#[derive(Debug, Serialize)]
struct RunSummary {
  version: String,
  cached: bool,
  steps: usize,
  duration_ms: u128,
}

pub fn cmd_run(output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let config = Config::from_env();
  info!(version = %config.version, cached = config.cached, "starting OpenCV setup");

  let plan = compute_plan(&config);

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  if let Err(e) = rt.block_on(apply(&plan)) {
    actions::error(&e.to_string());
    std::process::exit(1);
  }

  let summary = RunSummary {
    version: config.version,
    cached: config.cached,
    steps: plan.step_count(),
    duration_ms: start.elapsed().as_millis(),
  };

  if output.is_json() {
    print_json(&summary)?;
  } else {
    println!();
    print_success("OpenCV setup complete!");
    print_stat("Version", &summary.version);
    print_stat("Cached", &summary.cached.to_string());
    print_stat("Steps", &summary.steps.to_string());
    print_stat("Duration", &format_duration(start.elapsed()));
  }

  Ok(())
}
