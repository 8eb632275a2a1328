//! Core data types: target names, the dependency graph, and packages.

pub mod graph;
pub mod name;
pub mod package;

pub use graph::{build_graph, DependencyGraph, GraphStats};
pub use name::{generate_name, generate_names, NamePolicy, TargetName};
pub use package::{BuildPackage, SrcsStyle, StubSource};
