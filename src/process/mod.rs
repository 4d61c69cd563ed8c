//! Declaration emission pipeline.
//!
//! - [`TscOptions`] - One request: target file, entries, tsconfig, build modes
//! - [`Emitter`] - Engine handle plus optional front-end, the main entry point
//! - [`tsc_emit`] - One-shot emission with default settings
//! - [`StripPrivateFields`] - After-declarations transform applied to every emit

mod emit;
mod options;
mod transform;

pub use emit::{Emitter, SourceMap, TscResult, tsc_emit};
pub use options::TscOptions;
pub use transform::StripPrivateFields;
