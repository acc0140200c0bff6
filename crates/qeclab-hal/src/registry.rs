//! Engine lookup by name.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::backend::{Backend, BackendConfig, BackendFactory};
use crate::error::{HalError, HalResult};

type Constructor = Box<dyn Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync>;

/// Engine constructors keyed by the name users type on the command line
/// or in a sweep file.
#[derive(Default)]
pub struct BackendRegistry {
    constructors: FxHashMap<String, Constructor>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `B` constructible as `name`.
    pub fn register<B>(&mut self, name: impl Into<String>)
    where
        B: BackendFactory + 'static,
    {
        self.register_with(name, |config| {
            B::from_config(config).map(|b| Box::new(b) as Box<dyn Backend>)
        });
    }

    /// Make `name` constructible through an arbitrary closure. A second
    /// registration under the same name replaces the first.
    pub fn register_with(
        &mut self,
        name: impl Into<String>,
        build: impl Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync + 'static,
    ) {
        let name = name.into();
        debug!(engine = %name, "registered");
        self.constructors.insert(name, Box::new(build));
    }

    /// Build the engine registered as `name`.
    pub fn create(&self, name: &str, config: BackendConfig) -> HalResult<Box<dyn Backend>> {
        let build = self.constructors.get(name).ok_or_else(|| {
            HalError::BackendUnavailable(format!("'{name}' (known: {})", self.names().join(", ")))
        })?;
        build(config)
    }

    /// Registered names in alphabetical order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }
}
