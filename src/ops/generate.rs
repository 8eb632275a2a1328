//! Implementation of workspace generation.
//!
//! Generation runs in three steps: draw target names, wire them into a
//! dependency graph, then write one package per target plus the workspace
//! marker. The same random generator is threaded through the first two
//! steps, so a seed fully determines the output tree.

use std::path::{Path, PathBuf};

use rand::Rng;
use serde::Serialize;

use crate::core::graph::{build_graph, DependencyGraph, GraphStats};
use crate::core::name::{generate_names, NamePolicy, TargetName, NAME_SPACE};
use crate::core::package::{BuildPackage, SrcsStyle, BUILD_FILE, WORKSPACE_FILE};
use crate::ops::errors::GenerateError;
use crate::util::fs::{create_new_dir, ensure_dir, write_string, DirState};
use crate::util::hash::TreeDigest;

/// Seed used when neither the command line nor config provides one.
pub const DEFAULT_SEED: u64 = 0;

/// Per-package layout options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Number of stub sources in every package. Must be positive.
    pub sources_per_target: usize,

    /// How descriptors list their sources.
    pub srcs_style: SrcsStyle,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            sources_per_target: 1,
            srcs_style: SrcsStyle::Glob,
        }
    }
}

impl GenerateOptions {
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.sources_per_target == 0 {
            return Err(GenerateError::InvalidOption(
                "sources per target must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything a full generation run needs besides the random generator.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Workspace root.
    pub root: PathBuf,

    /// Number of targets to generate.
    pub target_count: usize,

    /// Whether generated names may collide.
    pub name_policy: NamePolicy,

    pub options: GenerateOptions,
}

impl GenerateConfig {
    /// Reject configurations that cannot finish: no sources per package, or
    /// more targets than there are distinct names.
    pub fn validate(&self) -> Result<(), GenerateError> {
        self.options.validate()?;
        if self.target_count as u64 > NAME_SPACE {
            return Err(GenerateError::InvalidOption(format!(
                "target count {} exceeds the {} available names",
                self.target_count, NAME_SPACE
            )));
        }
        Ok(())
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    /// Workspace root that was written.
    pub root: PathBuf,

    /// Packages materialized.
    pub targets: usize,

    /// Stub source files written across all packages.
    pub sources: usize,

    pub stats: GraphStats,

    /// SHA-256 over every written file, in write order.
    pub digest: String,
}

/// Make sure the workspace root exists.
///
/// An existing root is not an error; it is reported with a warning and
/// generation continues into it.
pub fn prepare_root(root: &Path) -> Result<DirState, GenerateError> {
    let state = ensure_dir(root)?;
    if state == DirState::Existing {
        tracing::warn!(
            "workspace directory `{}` already exists, generating into it",
            root.display()
        );
    }
    Ok(state)
}

/// Write `graph` to disk under `root`.
pub fn materialize(
    root: &Path,
    graph: &DependencyGraph,
    opts: &GenerateOptions,
) -> Result<GenerationSummary, GenerateError> {
    materialize_with_progress(root, graph, opts, |_, _| {})
}

/// Like [`materialize`], calling `on_package(written, total)` after each
/// package is complete.
pub fn materialize_with_progress<F>(
    root: &Path,
    graph: &DependencyGraph,
    opts: &GenerateOptions,
    mut on_package: F,
) -> Result<GenerationSummary, GenerateError>
where
    F: FnMut(usize, usize),
{
    opts.validate()?;
    ensure_dir(root)?;

    let total = graph.len();
    let mut digest = TreeDigest::new();
    let mut sources = 0;

    for (written, (target, deps)) in graph.iter().enumerate() {
        let pkg_dir = root.join(target.as_str());
        create_new_dir(&pkg_dir)?;

        let package = BuildPackage::new(target, deps, opts.sources_per_target, opts.srcs_style);

        let descriptor = package.render_descriptor();
        write_string(&pkg_dir.join(BUILD_FILE), &descriptor)?;
        digest.update_file(&format!("{}/{}", target, BUILD_FILE), &descriptor);

        for stub in &package.sources {
            let file_name = stub.file_name();
            let contents = stub.render();
            write_string(&pkg_dir.join(&file_name), &contents)?;
            digest.update_file(&format!("{}/{}", target, file_name), &contents);
            sources += 1;
        }

        tracing::debug!(
            "wrote package `{}` ({} deps, {} sources)",
            target,
            deps.len(),
            package.sources.len()
        );
        on_package(written + 1, total);
    }

    write_string(&root.join(WORKSPACE_FILE), "")?;
    digest.update_file(WORKSPACE_FILE, "");

    let stats = graph.stats();
    tracing::debug!(
        "graph: {} edges, max fan-out {}, {} roots, {} leaves, acyclic: {}",
        stats.edges,
        stats.max_fan_out,
        stats.roots,
        stats.leaves,
        stats.acyclic
    );

    Ok(GenerationSummary {
        root: root.to_path_buf(),
        targets: total,
        sources,
        stats,
        digest: digest.finish(),
    })
}

/// Generate the names and graph for `config` without touching the disk.
pub fn plan<R: Rng + ?Sized>(config: &GenerateConfig, rng: &mut R) -> DependencyGraph {
    let names: Vec<TargetName> = generate_names(rng, config.target_count, config.name_policy);
    build_graph(&names, rng)
}

/// Run a full generation: prepare the root, plan, and materialize.
pub fn generate<R: Rng + ?Sized>(
    config: &GenerateConfig,
    rng: &mut R,
) -> Result<GenerationSummary, GenerateError> {
    generate_with_progress(config, rng, |_, _| {})
}

/// Like [`generate`], reporting package progress through `on_package`.
pub fn generate_with_progress<R, F>(
    config: &GenerateConfig,
    rng: &mut R,
    on_package: F,
) -> Result<GenerationSummary, GenerateError>
where
    R: Rng + ?Sized,
    F: FnMut(usize, usize),
{
    config.validate()?;
    prepare_root(&config.root)?;

    let graph = plan(config, rng);
    if graph.len() < config.target_count {
        tracing::warn!(
            "{} generated names collided; writing {} packages",
            config.target_count - graph.len(),
            graph.len()
        );
    }

    let summary = materialize_with_progress(&config.root, &graph, &config.options, on_package)?;
    tracing::info!(
        "generated {} targets in {}",
        summary.targets,
        summary.root.display()
    );
    Ok(summary)
}
