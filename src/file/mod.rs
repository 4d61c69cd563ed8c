//! File system abstraction with in-memory overlay support.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    File Access Flow                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  CompilerHost / config parsing / solution build             │
//! │                    │                                        │
//! │                    ▼                                        │
//! │               OverlayFs ──► FileMap (shared with Context)   │
//! │                    │                                        │
//! │                    └─► miss ──► DiskFs                      │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes follow a [`WritePolicy`]: persistent builds mirror every write to
//! disk, ephemeral builds keep everything in the [`FileMap`].

mod overlay;
mod path;
mod store;
mod vfs;

pub use overlay::{OverlayFs, WritePolicy};
pub use path::{normalize_path, parent_dir};
pub use store::FileMap;
pub use vfs::{DiskFs, FileSystem};
