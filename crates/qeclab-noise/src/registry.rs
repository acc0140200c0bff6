//! Name-keyed registry of noise builders.

use rustc_hash::FxHashMap;
use tracing::debug;

use qeclab_ir::GateNoise;

use crate::builders::NoiseType;
use crate::error::{NoiseError, NoiseResult};

/// A function that turns a strength into a noise channel.
pub type NoiseBuilder = fn(f64) -> NoiseResult<GateNoise>;

/// Maps noise-type names to builders.
///
/// Sweeps resolve their noise type here before running anything, so an
/// unknown name fails fast.
#[derive(Clone)]
pub struct NoiseRegistry {
    builders: FxHashMap<String, NoiseBuilder>,
}

impl NoiseRegistry {
    /// Create a registry with no builders.
    pub fn new() -> Self {
        Self {
            builders: FxHashMap::default(),
        }
    }

    /// Create a registry holding every built-in channel.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NoiseType::BitFlip.name(), crate::bit_flip);
        registry.register(NoiseType::PhaseFlip.name(), crate::phase_flip);
        registry.register(NoiseType::Depolarizing.name(), crate::depolarizing);
        registry.register(NoiseType::AmplitudeDamping.name(), crate::amplitude_damping);
        registry
    }

    /// Register or replace a builder.
    pub fn register(&mut self, name: impl Into<String>, builder: NoiseBuilder) {
        let name = name.into();
        debug!("Registering noise builder: {}", name);
        self.builders.insert(name, builder);
    }

    /// Look up a builder by name.
    pub fn get(&self, name: &str) -> NoiseResult<NoiseBuilder> {
        self.builders
            .get(name)
            .copied()
            .ok_or_else(|| NoiseError::UnknownNoiseType {
                name: name.to_string(),
                available: self.names(),
            })
    }

    /// Build the named channel at `strength`.
    pub fn build(&self, name: &str, strength: f64) -> NoiseResult<GateNoise> {
        (self.get(name)?)(strength)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.builders.keys().cloned().collect();
        names.sort();
        names
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }
}

impl Default for NoiseRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for NoiseRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseRegistry")
            .field("builders", &self.names())
            .finish()
    }
}
