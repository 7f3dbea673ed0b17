//! Implementation of the `plan` command.
//!
//! Dry-run: prints the steps the current inputs would execute, grouped the
//! way the job log would group them, without spawning anything.

use anyhow::Result;

use setup_opencv_lib::config::Config;
use setup_opencv_lib::plan::compute_plan;

use crate::output::{OutputFormat, print_json, print_section};

pub fn cmd_plan(output: OutputFormat) -> Result<()> {
  let config = Config::from_env();
  let plan = compute_plan(&config);

  if output.is_json() {
    return print_json(&plan);
  }

  for section in &plan.sections {
    print_section(&section.title);
    for step in &section.steps {
      println!("  {}", step.describe());
    }
  }

  println!();
  println!("{} step(s) would run", plan.step_count());

  Ok(())
}
