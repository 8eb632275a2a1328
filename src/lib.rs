//! depforge - synthetic Bazel workspace generator
//!
//! Builds a random dependency graph over generated target names and writes
//! it out as a workspace of `java_library` packages, for stress-testing
//! build tooling against workspaces of arbitrary size.

pub mod core;
pub mod ops;
pub mod util;

pub use crate::core::{BuildPackage, DependencyGraph, SrcsStyle, TargetName};
pub use ops::{GenerateConfig, GenerateError, GenerateOptions, GenerationSummary};
