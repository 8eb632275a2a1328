//! depforge CLI - synthetic Bazel workspace generator

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, MessageFormat};
use depforge::core::NamePolicy;
use depforge::ops::{generate_with_progress, GenerateConfig, GenerateOptions, DEFAULT_SEED};
use depforge::util::config::{global_config_path, load_config, project_config_path};
use depforge::util::{Shell, Status};
use depforge::SrcsStyle;

fn main() {
    let cli = Cli::parse();
    let json = cli.message_format == MessageFormat::Json;
    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color, json);

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("depforge=debug")
    } else if cli.quiet {
        EnvFilter::new("depforge=error")
    } else {
        EnvFilter::new("depforge=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(cli, &shell) {
        if shell.is_json() {
            shell.error(format!("{:#}", e));
        } else {
            eprintln!("error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, shell: &Shell) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let config = load_config(
        global_config_path().as_deref(),
        &project_config_path(&cwd),
    );

    let seed = cli.seed.or(config.generate.seed).unwrap_or(DEFAULT_SEED);
    let sources_per_target = cli
        .sources_per_target
        .map(|n| n as usize)
        .or(config.generate.sources_per_target)
        .unwrap_or(1);
    let name_policy = if cli.unique_names || config.generate.unique_names {
        NamePolicy::Unique
    } else {
        NamePolicy::AllowCollisions
    };
    let srcs_style = if cli.explicit_srcs || config.generate.explicit_srcs {
        SrcsStyle::Explicit
    } else {
        SrcsStyle::Glob
    };

    let gen_config = GenerateConfig {
        root: cli.project_dir,
        target_count: cli.target_count,
        name_policy,
        options: GenerateOptions {
            sources_per_target,
            srcs_style,
        },
    };

    shell.status(
        Status::Generating,
        format!(
            "{} targets into `{}` (seed {})",
            gen_config.target_count,
            gen_config.root.display(),
            seed
        ),
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let progress = shell.progress(gen_config.target_count as u64, "packages");
    let summary = generate_with_progress(&gen_config, &mut rng, |done, _| {
        progress.set_position(done as u64)
    })
    .with_context(|| {
        format!(
            "failed to generate workspace `{}`",
            gen_config.root.display()
        )
    })?;
    progress.finish();

    shell.json(&summary);
    shell.status(
        Status::Generated,
        format!(
            "{} targets in {} ({} sources, {} dependency edges)",
            summary.targets,
            summary.root.display(),
            summary.sources,
            summary.stats.edges
        ),
    );

    Ok(())
}
