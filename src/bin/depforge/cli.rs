//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use depforge::util::ColorChoice;

/// depforge - generate synthetic Bazel workspaces with random dependency graphs
#[derive(Parser, Debug)]
#[command(name = "depforge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Workspace directory to generate into
    pub project_dir: PathBuf,

    /// Number of targets to generate
    pub target_count: usize,

    /// Stub source files per target [default: 1]
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub sources_per_target: Option<u64>,

    /// Seed for the random generator [default: 0]
    #[arg(long, env = "DEPFORGE_SEED")]
    pub seed: Option<u64>,

    /// Resample target names that collide
    #[arg(long)]
    pub unique_names: bool,

    /// List sources by name in BUILD files instead of using a glob
    #[arg(long)]
    pub explicit_srcs: bool,

    /// Output format for the generation summary
    #[arg(long, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    Human,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args)
    }

    #[test]
    fn test_positional_only() {
        let cli = parse(&["depforge", "ws", "10"]).unwrap();
        assert_eq!(cli.project_dir, PathBuf::from("ws"));
        assert_eq!(cli.target_count, 10);
        assert!(cli.sources_per_target.is_none());
        assert!(!cli.unique_names);
        assert!(!cli.explicit_srcs);
        assert_eq!(cli.message_format, MessageFormat::Human);
        assert_eq!(cli.color, ColorChoice::Auto);
    }

    #[test]
    fn test_all_flags() {
        let cli = parse(&[
            "depforge",
            "out/ws",
            "0",
            "--sources-per-target",
            "3",
            "--seed",
            "77",
            "--unique-names",
            "--explicit-srcs",
            "--message-format",
            "json",
            "--color",
            "never",
        ])
        .unwrap();

        assert_eq!(cli.target_count, 0);
        assert_eq!(cli.sources_per_target, Some(3));
        assert_eq!(cli.seed, Some(77));
        assert!(cli.unique_names);
        assert!(cli.explicit_srcs);
        assert_eq!(cli.message_format, MessageFormat::Json);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn test_short_sources_flag() {
        let cli = parse(&["depforge", "ws", "5", "-s", "2"]).unwrap();
        assert_eq!(cli.sources_per_target, Some(2));
    }

    #[test]
    fn test_zero_sources_rejected() {
        assert!(parse(&["depforge", "ws", "5", "-s", "0"]).is_err());
    }

    #[test]
    fn test_negative_count_rejected() {
        assert!(parse(&["depforge", "ws", "-3"]).is_err());
    }

    #[test]
    fn test_missing_count_rejected() {
        assert!(parse(&["depforge", "ws"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(parse(&["depforge", "ws", "1", "-q", "-v"]).is_err());
    }
}
