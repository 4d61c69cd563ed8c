//! Composite project support.
//!
//! For a root tsconfig with `references`, the whole graph is built once and
//! the sub-project owning a file is located before a program is created for
//! it:
//!
//! ```text
//! build_solution(root)                 find_project_containing_file(...)
//!   │ engine builds every project        │ parse each visited config in order
//!   │ on_project(config) per compile     │ first config listing the file wins
//!   ▼                                    ▼
//! [shared, app, node, root]  ────────►  Some(ResolvedProject) | None
//! ```

mod resolve;
mod solution;

pub use resolve::{ResolvedProject, find_project_containing_file, parse_tsconfig};
pub use solution::{build_solution, dedup_paths};
