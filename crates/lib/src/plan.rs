//! Setup plan construction.
//!
//! The configuration is translated into an ordered [`SetupPlan`] before
//! anything runs. Keeping the plan as plain data separates command
//! construction from process execution: the `plan` subcommand prints it
//! without side effects, and the tests assert on its shape instead of
//! spawning package managers.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::{CmakeOptions, Config};
use crate::consts::{
  APT_PACKAGES, BUILD_DIR, CONFLICTING_PACKAGES, CONTRIB_DIR, CONTRIB_MODULES_PATH, MAKE_JOBS, OPENCV_CONTRIB_REPO,
  OPENCV_REPO, SECURITY_REPO, SOURCE_DIR,
};
use crate::exec::Invocation;

/// A single step of the setup procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
  /// Spawn an external command and wait for it to exit.
  Run(Invocation),
  /// Create a directory and any missing parents.
  CreateDir(PathBuf),
  /// Rename a directory into its final location.
  Move { from: PathBuf, to: PathBuf },
  /// Delete a directory tree. A missing path is a no-op, not an error.
  RemoveDir(PathBuf),
}

impl Step {
  /// One-line description for plan output and logs.
  pub fn describe(&self) -> String {
    match self {
      Step::Run(invocation) => format!("$ {}", invocation),
      Step::CreateDir(path) => format!("create directory {}", path.display()),
      Step::Move { from, to } => format!("move {} -> {}", from.display(), to.display()),
      Step::RemoveDir(path) => format!("remove {}", path.display()),
    }
  }
}

/// A titled group of steps, rendered as one collapsible log section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
  pub title: String,
  pub steps: Vec<Step>,
}

impl Section {
  fn new(title: &str, steps: Vec<Step>) -> Self {
    Self {
      title: title.to_string(),
      steps,
    }
  }
}

/// The full ordered plan for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetupPlan {
  pub sections: Vec<Section>,
}

impl SetupPlan {
  /// Total number of steps across all sections.
  pub fn step_count(&self) -> usize {
    self.sections.iter().map(|s| s.steps.len()).sum()
  }

  /// Iterate over every step in execution order.
  pub fn steps(&self) -> impl Iterator<Item = &Step> {
    self.sections.iter().flat_map(|s| s.steps.iter())
  }
}

/// Translate a configuration into the ordered list of steps to execute.
///
/// Cached mode skips the bootstrap/clone/compile sections entirely; the
/// final install section is the only one present in both modes.
pub fn compute_plan(config: &Config) -> SetupPlan {
  let mut sections = Vec::new();

  if config.install_deps {
    sections.push(Section::new("Install dependencies", bootstrap_steps()));
  }

  if !config.cached {
    sections.push(Section::new("Download source code", download_steps(config)));
    sections.push(Section::new("Compile and install", compile_steps(config)));
    sections.push(Section::new(
      "Cleanup",
      vec![
        Step::RemoveDir(PathBuf::from(SOURCE_DIR)),
        // Removed even when extra modules were never cloned; tolerated no-op.
        Step::RemoveDir(PathBuf::from(CONTRIB_DIR)),
      ],
    ));
  }

  // Installation from the (possibly cached) build directory always runs.
  let install_dir = config.install_dir.display().to_string();
  sections.push(Section::new(
    "Install",
    vec![Step::Run(Invocation::new(
      "sudo",
      ["make", "-C", install_dir.as_str(), "install"],
    ))],
  ));

  SetupPlan { sections }
}

/// OS package bootstrap: add the codec repository, refresh indices, drop the
/// conflicting x264 packages, install the build/runtime dependency set.
fn bootstrap_steps() -> Vec<Step> {
  let mut remove_args = vec!["apt-get".to_string(), "remove".to_string()];
  remove_args.extend(CONFLICTING_PACKAGES.iter().map(|p| p.to_string()));
  remove_args.push("-y".to_string());

  let mut install_args = vec!["apt-get".to_string(), "install".to_string(), "-y".to_string()];
  install_args.extend(APT_PACKAGES.iter().map(|p| p.to_string()));

  vec![
    Step::Run(Invocation::new("sudo", ["add-apt-repository", SECURITY_REPO])),
    Step::Run(Invocation::new("sudo", ["apt-get", "update"])),
    Step::Run(Invocation::new("sudo", remove_args)),
    Step::Run(Invocation::new("sudo", install_args)),
  ]
}

/// Create the install directory and shallow-clone the sources at the
/// resolved version.
fn download_steps(config: &Config) -> Vec<Step> {
  let mut steps = vec![
    Step::CreateDir(config.install_dir.clone()),
    Step::Run(clone_invocation(OPENCV_REPO, &config.version)),
  ];

  if config.extra_modules {
    steps.push(Step::Run(clone_invocation(OPENCV_CONTRIB_REPO, &config.version)));
  }

  steps
}

fn clone_invocation(repo: &str, version: &str) -> Invocation {
  Invocation::new("git", ["clone", repo, "--branch", version, "--depth", "1"])
}

/// Configure, compile, and relocate the build output.
fn compile_steps(config: &Config) -> Vec<Step> {
  vec![
    Step::Run(cmake_invocation(&config.cmake, config.extra_modules)),
    Step::Run(Invocation::new("make", [MAKE_JOBS, "-C", BUILD_DIR])),
    Step::Move {
      from: PathBuf::from(BUILD_DIR),
      to: config.install_dir.clone(),
    },
  ]
}

/// Build the configure command line.
///
/// Every toggle is emitted, with an empty value when unset; only the
/// extra-modules path define is conditional.
fn cmake_invocation(options: &CmakeOptions, extra_modules: bool) -> Invocation {
  let mut args: Vec<String> = vec!["-S".into(), SOURCE_DIR.into(), "-B".into(), BUILD_DIR.into()];

  let defines = [
    ("CMAKE_CXX_COMPILER", &options.cxx_compiler),
    ("CMAKE_INSTALL_PREFIX", &options.install_prefix),
    ("WITH_TBB", &options.with_tbb),
    ("WITH_IPP", &options.with_ipp),
    ("BUILD_NEW_PYTHON_SUPPORT", &options.build_new_python_support),
    ("WITH_V4L", &options.with_v4l),
    ("ENABLE_PRECOMPILED_HEADERS", &options.enable_precompiled_headers),
    ("INSTALL_C_EXAMPLES", &options.install_c_examples),
    ("INSTALL_PYTHON_EXAMPLES", &options.install_python_examples),
    ("BUILD_EXAMPLES", &options.build_examples),
    ("WITH_QT", &options.with_qt),
    ("WITH_OPENGL", &options.with_opengl),
    ("OPENCV_GENERATE_PKGCONFIG", &options.generate_pkgconfig),
  ];

  for (name, value) in defines {
    args.push("-D".into());
    args.push(format!("{}={}", name, value));
  }

  if extra_modules {
    args.push("-D".into());
    args.push(format!("OPENCV_EXTRA_MODULES_PATH={}", CONTRIB_MODULES_PATH));
  }

  Invocation::new("cmake", args)
}
