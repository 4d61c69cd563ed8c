//! Optional alternate front-end.
//!
//! Some sources (single-file components of a templating language) need a
//! different program construction strategy. It is provided by an external
//! [`FrontendLoader`], loaded on first use and memoized, including failure:
//! a missing front-end fails every request that asks for it with the same
//! [`EmitError::PluginLoad`] while other requests keep working.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use crate::diagnostic::EmitError;
use crate::engine::{ProgramFactory, StandardProgramFactory, TypeEngine};

/// Produces the alternate program construction strategy.
pub trait FrontendLoader: Send + Sync {
    /// Wrap `standard` into the alternate strategy.
    ///
    /// An `Err` carries a human-readable reason (e.g. the package is not
    /// installed).
    fn load(
        &self,
        engine: &dyn TypeEngine,
        standard: Arc<dyn ProgramFactory>,
    ) -> Result<Arc<dyn ProgramFactory>, String>;
}

type Slot = Result<Arc<dyn ProgramFactory>, String>;

/// Lazily loaded alternate front-end.
pub struct Frontend {
    loader: Box<dyn FrontendLoader>,
    slot: OnceLock<Slot>,
}

impl Frontend {
    /// Register a loader. Nothing is loaded until the first request.
    pub fn new(loader: impl FrontendLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            slot: OnceLock::new(),
        }
    }

    /// The alternate strategy, loading it on first call.
    pub fn factory(&self, engine: &dyn TypeEngine) -> Result<Arc<dyn ProgramFactory>, EmitError> {
        let slot = self.slot.get_or_init(|| {
            debug!("loading alternate front-end");
            let loaded = self.loader.load(engine, Arc::new(StandardProgramFactory));
            if let Err(reason) = &loaded {
                warn!(%reason, "alternate front-end unavailable");
            }
            loaded
        });

        match slot {
            Ok(factory) => Ok(Arc::clone(factory)),
            Err(reason) => Err(EmitError::PluginLoad {
                reason: reason.clone(),
            }),
        }
    }

    /// `None` before the first load attempt, then whether it succeeded.
    pub fn is_loaded(&self) -> Option<bool> {
        self.slot.get().map(Result::is_ok)
    }
}

impl fmt::Debug for Frontend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frontend")
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}

/// Pick the construction strategy for a request.
pub(crate) fn select_factory(
    frontend: Option<&Frontend>,
    requested: bool,
    engine: &dyn TypeEngine,
) -> Result<Arc<dyn ProgramFactory>, EmitError> {
    if !requested {
        return Ok(Arc::new(StandardProgramFactory));
    }
    frontend.ok_or(EmitError::NoFrontend)?.factory(engine)
}
