//! Action configuration.
//!
//! All inputs are read once at startup into an immutable [`Config`] that is
//! passed explicitly through the rest of the procedure; nothing else in the
//! crate reads the environment.

use std::path::PathBuf;

use crate::actions::get_input;
use crate::consts::{DEFAULT_VERSION, MASTER_BRANCH};

/// Version strings that select the unstable development branch instead of a
/// literal tag.
const MASTER_ALIASES: &[&str] = &["master", "dev", "latest", "last"];

/// Configuration for one run of the setup procedure.
#[derive(Debug, Clone)]
pub struct Config {
  /// Directory the finished build is moved to and installed from, relative
  /// to the job workspace (`./<dir>`).
  pub install_dir: PathBuf,

  /// Resolved git reference to build: a tag, a branch, or the unstable
  /// branch when the requested version was an alias.
  pub version: String,

  /// Skip clone and compile, reuse an existing install directory.
  pub cached: bool,

  /// Also clone and build the opencv_contrib modules.
  pub extra_modules: bool,

  /// Run the OS package bootstrap before building. Defaults to on: only an
  /// explicit non-"true" value suppresses it.
  pub install_deps: bool,

  /// CMake toggles passed through to the configure step.
  pub cmake: CmakeOptions,
}

/// CMake configuration toggles, passed through verbatim.
///
/// Unset toggles are still emitted with an empty value; CMake treats a
/// defined-empty variable the same way the action always has.
#[derive(Debug, Clone, Default)]
pub struct CmakeOptions {
  pub cxx_compiler: String,
  pub install_prefix: String,
  pub with_tbb: String,
  pub with_ipp: String,
  pub build_new_python_support: String,
  pub with_v4l: String,
  pub enable_precompiled_headers: String,
  pub install_c_examples: String,
  pub install_python_examples: String,
  pub build_examples: String,
  pub with_qt: String,
  pub with_opengl: String,
  pub generate_pkgconfig: String,
}

impl Config {
  /// Build the configuration from the action inputs in the environment.
  pub fn from_env() -> Self {
    let dir = get_input("dir").unwrap_or_default();
    let requested = get_input("opencv-version").unwrap_or_else(|| DEFAULT_VERSION.to_string());

    Self {
      install_dir: PathBuf::from(format!("./{}", dir)),
      version: resolve_version(&requested),
      cached: flag_input("cached"),
      extra_modules: flag_input("opencv-extra-modules"),
      install_deps: match get_input("install-deps") {
        None => true,
        Some(value) => value == "true",
      },
      cmake: CmakeOptions {
        cxx_compiler: passthrough("CMAKE_CXX_COMPILER"),
        install_prefix: passthrough("CMAKE_INSTALL_PREFIX"),
        with_tbb: passthrough("WITH_TBB"),
        with_ipp: passthrough("WITH_IPP"),
        build_new_python_support: passthrough("BUILD_NEW_PYTHON_SUPPORT"),
        with_v4l: passthrough("WITH_V4L"),
        enable_precompiled_headers: passthrough("ENABLE_PRECOMPILED_HEADERS"),
        install_c_examples: passthrough("INSTALL_C_EXAMPLES"),
        install_python_examples: passthrough("INSTALL_PYTHON_EXAMPLES"),
        build_examples: passthrough("BUILD_EXAMPLES"),
        with_qt: passthrough("WITH_QT"),
        with_opengl: passthrough("WITH_OPENGL"),
        generate_pkgconfig: passthrough("GENERATE_PKGCONFIG"),
      },
    }
  }
}

/// Resolve a requested version to a git reference.
///
/// The aliases `master`, `dev`, `latest`, and `last` all mean "build the
/// unstable branch"; anything else is used verbatim as a tag or branch name.
pub fn resolve_version(requested: &str) -> String {
  if MASTER_ALIASES.contains(&requested) {
    MASTER_BRANCH.to_string()
  } else {
    requested.to_string()
  }
}

/// Boolean inputs are opt-in: only the literal string "true" enables them.
fn flag_input(name: &str) -> bool {
  get_input(name).as_deref() == Some("true")
}

fn passthrough(name: &str) -> String {
  get_input(name).unwrap_or_default()
}
