//! setup-opencv-lib: Core logic for the setup-opencv CI action
//!
//! This crate turns a set of action inputs into an installed OpenCV build:
//! - `Config`: immutable configuration read once from the job environment
//! - `SetupPlan`: the ordered list of steps the procedure will execute
//! - `apply`: sequential plan execution, stopping at the first failure
//!
//! The binary in `crates/cli` wires these together and maps failures to the
//! job runner's failure signal.

pub mod actions;
pub mod apply;
pub mod config;
pub mod consts;
pub mod exec;
pub mod plan;
