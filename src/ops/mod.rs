//! High-level operations.

pub mod errors;
pub mod generate;

pub use errors::GenerateError;
pub use generate::{
    generate, generate_with_progress, materialize, materialize_with_progress, plan, prepare_root,
    GenerateConfig, GenerateOptions, GenerationSummary, DEFAULT_SEED,
};
