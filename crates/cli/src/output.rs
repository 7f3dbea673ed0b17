//! CLI output formatting utilities.

use std::time::Duration;

use anyhow::Result;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

pub fn print_success(message: &str) {
  println!("{} {}", "✓".if_supports_color(Stream::Stdout, |s| s.green()), message);
}

pub fn print_section(title: &str) {
  println!(
    "{} {}",
    "::".if_supports_color(Stream::Stdout, |s| s.cyan()),
    title.if_supports_color(Stream::Stdout, |s| s.bold())
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!("  {:<10} {}", format!("{}:", label), value);
}

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  if secs >= 60 {
    format!("{}m {}s", secs / 60, secs % 60)
  } else if secs > 0 {
    format!("{}.{:01}s", secs, duration.subsec_millis() / 100)
  } else {
    format!("{}ms", duration.subsec_millis())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn duration_formatting() {
    assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
    assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
    assert_eq!(format_duration(Duration::from_secs(75)), "1m 15s");
  }
}
